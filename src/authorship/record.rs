//! Authorship rows before and after cleaning.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::corpus::EssayId;
use crate::error::{FederalistError, Result};

/// Declared author of an essay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Author {
    Hamilton,
    Madison,
    Jay,
    Unknown,
}

impl Author {
    pub const ALL: [Author; 4] = [Author::Hamilton, Author::Madison, Author::Jay, Author::Unknown];

    pub fn as_str(&self) -> &'static str {
        match self {
            Author::Hamilton => "Hamilton",
            Author::Madison => "Madison",
            Author::Jay => "Jay",
            Author::Unknown => "Unknown",
        }
    }

    /// Match a label against the author names, ignoring case and padding.
    pub fn from_label(label: &str) -> Option<Author> {
        let label = label.trim();
        Author::ALL
            .into_iter()
            .find(|author| author.as_str().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Author {
    type Err = FederalistError;

    fn from_str(s: &str) -> Result<Self> {
        Author::from_label(s)
            .ok_or_else(|| FederalistError::authorship(format!("unknown author '{s}'")))
    }
}

/// One row of the authorship table as scraped, all cells as text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAuthorshipRow {
    #[serde(rename = "No.")]
    pub number: String,
    #[serde(rename = "Author")]
    pub author: String,
    #[serde(rename = "Publication")]
    pub publication: String,
    #[serde(rename = "Date")]
    pub date: String,
}

impl RawAuthorshipRow {
    pub fn new(number: &str, author: &str, publication: &str, date: &str) -> Self {
        RawAuthorshipRow {
            number: number.to_string(),
            author: author.to_string(),
            publication: publication.to_string(),
            date: date.to_string(),
        }
    }
}

/// A cleaned authorship record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorshipRecord {
    pub essay: EssayId,
    pub author: Author,
    /// Canonical publication label
    pub publication: String,
    /// Publication date, `None` when missing or unparseable
    pub date: Option<NaiveDate>,
}
