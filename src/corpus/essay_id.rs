//! Canonical essay identifiers.
//!
//! Essay ids reach the pipeline in three shapes: file names (`essay01.txt`),
//! display labels (`Essay 1`) and bare numbers from the authorship table
//! (`1`, or `1.0` when the column was read as floating point). All of them
//! parse to the same [`EssayId`], whose display form is the canonical
//! `Essay N` without leading zeros.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FederalistError, Result};

/// Number of essays in the collection.
pub const ESSAY_COUNT: usize = 85;

/// An essay number in `1..=85`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct EssayId(u16);

impl EssayId {
    /// Smallest valid essay number.
    pub const MIN: u16 = 1;

    /// Largest valid essay number.
    pub const MAX: u16 = ESSAY_COUNT as u16;

    /// Create an id, rejecting numbers outside `1..=85`.
    pub fn new(number: u16) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&number) {
            Ok(EssayId(number))
        } else {
            Err(FederalistError::corpus(format!(
                "essay number {number} is outside {}..={}",
                Self::MIN,
                Self::MAX
            )))
        }
    }

    /// The essay number.
    pub fn get(self) -> u16 {
        self.0
    }

    /// Zero-based index of this essay in a full collection.
    pub fn index(self) -> usize {
        usize::from(self.0 - 1)
    }

    /// Iterate over every valid id in ascending order.
    pub fn all() -> impl Iterator<Item = EssayId> {
        (Self::MIN..=Self::MAX).map(EssayId)
    }

    /// Parse a file name such as `essay01.txt`, `Essay22.txt` or `essay85`.
    ///
    /// Only the file stem is considered; the number may be zero-padded.
    pub fn parse_file_name(name: &str) -> Result<Self> {
        let stem = Path::new(name)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(name);
        let rest = strip_prefix_ignore_case(stem.trim(), "essay")
            .ok_or_else(|| invalid(name, "file name does not start with 'essay'"))?;
        let digits = rest.trim_start_matches(['_', '-', ' ']);
        Self::parse_digits(name, digits)
    }

    /// Parse a display label such as `Essay 1`.
    pub fn parse_label(label: &str) -> Result<Self> {
        let rest = strip_prefix_ignore_case(label.trim(), "essay")
            .ok_or_else(|| invalid(label, "label does not start with 'Essay'"))?;
        Self::parse_digits(label, rest.trim())
    }

    /// Parse a bare essay number such as `1` or `1.0`.
    pub fn parse_number(text: &str) -> Result<Self> {
        let text = text.trim();
        let integral = match text.split_once('.') {
            Some((whole, fraction)) if fraction.bytes().all(|b| b == b'0') => whole,
            Some(_) => return Err(invalid(text, "essay number is not an integer")),
            None => text,
        };
        Self::parse_digits(text, integral)
    }

    fn parse_digits(source: &str, digits: &str) -> Result<Self> {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid(source, "no essay number found"));
        }
        let number: u16 = digits
            .parse()
            .map_err(|_| invalid(source, "essay number is too large"))?;
        Self::new(number)
    }
}

fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &text[prefix.len()..])
}

fn invalid(source: &str, reason: &str) -> FederalistError {
    FederalistError::corpus(format!("invalid essay id '{source}': {reason}"))
}

impl fmt::Display for EssayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Essay {}", self.0)
    }
}

impl FromStr for EssayId {
    type Err = FederalistError;

    /// Accepts labels, bare numbers and file names.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.bytes().next().is_some_and(|b| b.is_ascii_digit()) {
            return Self::parse_number(trimmed);
        }
        Self::parse_label(trimmed).or_else(|_| Self::parse_file_name(trimmed))
    }
}

impl From<EssayId> for String {
    fn from(id: EssayId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for EssayId {
    type Error = FederalistError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<EssayId> for u16 {
    fn from(id: EssayId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range() {
        assert!(EssayId::new(0).is_err());
        assert!(EssayId::new(86).is_err());
        assert_eq!(EssayId::new(1).unwrap().get(), 1);
        assert_eq!(EssayId::new(85).unwrap().index(), 84);
        assert_eq!(EssayId::all().count(), ESSAY_COUNT);
    }

    #[test]
    fn test_file_names() {
        for n in 1..=9u16 {
            let name = format!("essay0{n}.txt");
            let id = EssayId::parse_file_name(&name).unwrap();
            assert_eq!(id.to_string(), format!("Essay {n}"));
        }
        assert_eq!(EssayId::parse_file_name("Essay22.txt").unwrap().get(), 22);
        assert_eq!(EssayId::parse_file_name("essay85").unwrap().get(), 85);
        assert!(EssayId::parse_file_name("essay86.txt").is_err());
        assert!(EssayId::parse_file_name("notes.txt").is_err());
        assert!(EssayId::parse_file_name("essay.txt").is_err());
    }

    #[test]
    fn test_labels_and_numbers() {
        assert_eq!(EssayId::parse_label("Essay 1").unwrap().get(), 1);
        assert_eq!(EssayId::parse_label(" essay 10 ").unwrap().get(), 10);
        assert_eq!(EssayId::parse_number("7").unwrap().get(), 7);
        assert_eq!(EssayId::parse_number("7.0").unwrap().get(), 7);
        assert!(EssayId::parse_number("7.5").is_err());
        assert!(EssayId::parse_number("").is_err());
        assert!(EssayId::parse_number("99999999").is_err());
    }

    #[test]
    fn test_from_str() {
        let expected = EssayId::new(8).unwrap();
        assert_eq!("Essay 8".parse::<EssayId>().unwrap(), expected);
        assert_eq!("8".parse::<EssayId>().unwrap(), expected);
        assert_eq!("essay08.txt".parse::<EssayId>().unwrap(), expected);
        assert!("Hamilton".parse::<EssayId>().is_err());
    }

    #[test]
    fn test_zero_padded_ids_are_distinct() {
        let seven = EssayId::parse_file_name("essay07.txt").unwrap();
        let eight = EssayId::parse_file_name("essay08.txt").unwrap();
        assert_eq!(seven.to_string(), "Essay 7");
        assert_eq!(eight.to_string(), "Essay 8");
    }

    #[test]
    fn test_serde_uses_label() {
        let id = EssayId::new(51).unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"Essay 51\"");
        let back: EssayId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
