//! Configuration for the analysis pipeline.
//!
//! Every lookup table the pipeline relies on (stop words, author labels,
//! publication aliases) is an explicit value here, passed to each stage.
//!
//! # Examples
//!
//! ```
//! use federalist::config::PipelineConfig;
//!
//! // Use default configuration
//! let config = PipelineConfig::default();
//! assert_eq!(config.expected_essays, Some(85));
//! assert_eq!(config.similarity.top_k, 6);
//! assert!(config.validate().is_ok());
//!
//! // Analyze a partial corpus
//! let mut partial = PipelineConfig::default();
//! partial.expected_essays = None;
//! partial.normalizer.extra_stop_words.push("upon".to_string());
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::corpus::essay_id::ESSAY_COUNT;
use crate::error::{FederalistError, Result};

/// Top-level pipeline configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Number of essays the corpus must contain; `None` disables the check.
    pub expected_essays: Option<usize>,
    /// Text normalizer settings.
    pub normalizer: NormalizerConfig,
    /// Lemmatizer settings.
    pub lemmatizer: LemmatizerConfig,
    /// Authorship table cleaning settings.
    pub authorship: AuthorshipConfig,
    /// Similarity query settings.
    pub similarity: SimilarityConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            expected_essays: Some(ESSAY_COUNT),
            normalizer: NormalizerConfig::default(),
            lemmatizer: LemmatizerConfig::default(),
            authorship: AuthorshipConfig::default(),
            similarity: SimilarityConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            FederalistError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        let config: PipelineConfig = serde_json::from_str(&content).map_err(|e| {
            FederalistError::config(format!("cannot parse {}: {e}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for values the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if let Some(expected) = self.expected_essays {
            if !(1..=ESSAY_COUNT).contains(&expected) {
                return Err(FederalistError::config(format!(
                    "expected_essays must be within 1..={ESSAY_COUNT}, got {expected}"
                )));
            }
        }
        if self.similarity.top_k == 0 {
            return Err(FederalistError::config("similarity.top_k must be at least 1"));
        }
        if self.authorship.date_format.trim().is_empty() {
            return Err(FederalistError::config("authorship.date_format is empty"));
        }
        if self.authorship.missing_sentinel.is_empty() {
            return Err(FederalistError::config("authorship.missing_sentinel is empty"));
        }
        Ok(())
    }
}

/// Stop word settings for the text normalizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Start from the English list plus the domain filler words.
    pub use_default_stop_words: bool,
    /// Additional stop words, matched case-insensitively.
    pub extra_stop_words: Vec<String>,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            use_default_stop_words: true,
            extra_stop_words: Vec::new(),
        }
    }
}

/// Lemmatizer settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LemmatizerConfig {
    /// Validate lemma candidates against the corpus's own surface forms.
    pub corpus_lexicon: bool,
}

/// Cleaning rules for the authorship table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorshipConfig {
    /// Cell value meaning "no data".
    pub missing_sentinel: String,
    /// chrono format of the date column.
    pub date_format: String,
    /// Author labels that collapse to Unknown.
    pub unknown_author_labels: Vec<String>,
    /// Raw publication label to canonical label.
    pub publication_aliases: BTreeMap<String, String>,
}

impl Default for AuthorshipConfig {
    fn default() -> Self {
        let publication_aliases = [
            ("For the Independent Journal", "Independent Journal"),
            ("From the New York Packet", "New York Packet"),
            ("From The New York Packet", "New York Packet"),
            ("Frm the New York Packet", "New York Packet"),
            ("From McLEAN's Edition, New York", "McLEAN's Edition"),
            ("From McLEAN's Edition", "McLEAN's Edition"),
            ("From the Daily Advertiser", "Daily Advertiser"),
        ]
        .into_iter()
        .map(|(raw, canonical)| (raw.to_string(), canonical.to_string()))
        .collect();

        Self {
            missing_sentinel: "--".to_string(),
            date_format: "%A, %B %d, %Y".to_string(),
            unknown_author_labels: vec!["Hamilton or Madison".to_string()],
            publication_aliases,
        }
    }
}

/// Similarity query settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityConfig {
    /// Number of essays a top-K query returns, the query itself included.
    pub top_k: usize,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self { top_k: 6 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.expected_essays, Some(85));
        assert!(config.normalizer.use_default_stop_words);
        assert!(!config.lemmatizer.corpus_lexicon);
        assert_eq!(config.authorship.missing_sentinel, "--");
        assert_eq!(
            config.authorship.publication_aliases.get("Frm the New York Packet"),
            Some(&"New York Packet".to_string())
        );
        assert_eq!(config.similarity.top_k, 6);
        config.validate().unwrap();
    }

    #[test]
    fn test_validation() {
        let mut config = PipelineConfig::default();
        config.similarity.top_k = 0;
        assert!(config.validate().unwrap_err().is_config());

        let mut config = PipelineConfig::default();
        config.expected_essays = Some(86);
        assert!(config.validate().is_err());

        let mut config = PipelineConfig::default();
        config.authorship.date_format = " ".to_string();
        assert!(config.validate().is_err());

        let mut config = PipelineConfig::default();
        config.expected_essays = None;
        config.validate().unwrap();
    }

    #[test]
    fn test_from_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"expected_essays": null, "similarity": {{"top_k": 4}}}}"#
        )
        .unwrap();

        let config = PipelineConfig::from_file(file.path()).unwrap();
        assert_eq!(config.expected_essays, None);
        assert_eq!(config.similarity.top_k, 4);
        assert_eq!(config.authorship, AuthorshipConfig::default());
    }

    #[test]
    fn test_from_file_errors() {
        let err = PipelineConfig::from_file("/nonexistent/federalist.json").unwrap_err();
        assert!(err.is_config());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(PipelineConfig::from_file(file.path()).unwrap_err().is_config());
    }
}
