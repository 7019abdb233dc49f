use regex::Regex;

use super::CharFilter;
use crate::error::{FederalistError, Result};

/// Runs of characters outside the English alphabet.
pub const NON_ALPHABETIC_PATTERN: &str = r"[^A-Za-z]+";

/// A char filter that replaces characters matching a regex pattern.
#[derive(Clone, Debug)]
pub struct PatternReplaceCharFilter {
    pattern: Regex,
    replacement: String,
}

impl PatternReplaceCharFilter {
    /// Create a new pattern replace char filter.
    pub fn new(pattern: &str, replacement: &str) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)
                .map_err(|e| FederalistError::analysis(format!("Invalid regex pattern: {e}")))?,
            replacement: replacement.to_string(),
        })
    }

    /// Replace every run of non-alphabetic characters with a single space.
    pub fn non_alphabetic() -> Result<Self> {
        Self::new(NON_ALPHABETIC_PATTERN, " ")
    }

    /// Get the regex pattern used by this filter.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl CharFilter for PatternReplaceCharFilter {
    fn filter(&self, input: &str) -> String {
        self.pattern
            .replace_all(input, self.replacement.as_str())
            .into_owned()
    }

    fn name(&self) -> &'static str {
        "pattern_replace"
    }
}
