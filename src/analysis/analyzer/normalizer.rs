//! Essay text normalizer.
//!
//! Replaces every character outside the English alphabet with whitespace,
//! splits on whitespace (collapsing runs and trimming the ends), lowercases,
//! and drops stop words. Stop words are compared after lowercasing, so an
//! already-normalized line comes back unchanged.
//!
//! # Examples
//!
//! ```
//! use federalist::analysis::analyzer::normalizer::TextNormalizer;
//!
//! let normalizer = TextNormalizer::new().unwrap();
//! assert_eq!(
//!     normalizer.normalize_line("To the People of the State of New York:"),
//!     "people state new york"
//! );
//! assert_eq!(normalizer.normalize_line(""), "");
//! ```

use std::sync::Arc;

use crate::analysis::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::char_filter::pattern_replace::PatternReplaceCharFilter;
use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::tokenizer::whitespace::WhitespaceTokenizer;
use crate::config::NormalizerConfig;
use crate::error::Result;

/// Normalizer for raw essay lines.
#[derive(Clone, Debug)]
pub struct TextNormalizer {
    inner: PipelineAnalyzer,
    stop_filter: StopFilter,
}

impl TextNormalizer {
    /// Create a normalizer with the default stop word list.
    pub fn new() -> Result<Self> {
        Self::with_stop_filter(StopFilter::new())
    }

    /// Create a normalizer with a custom stop filter.
    pub fn with_stop_filter(stop_filter: StopFilter) -> Result<Self> {
        let inner = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
            .add_char_filter(Arc::new(PatternReplaceCharFilter::non_alphabetic()?))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(stop_filter.clone().remove_stopped(true)))
            .with_name("normalizer");

        Ok(TextNormalizer { inner, stop_filter })
    }

    /// Create a normalizer from configuration.
    pub fn from_config(config: &NormalizerConfig) -> Result<Self> {
        let stop_filter =
            StopFilter::extended(config.use_default_stop_words, &config.extra_stop_words);
        Self::with_stop_filter(stop_filter)
    }

    /// The stop filter in use.
    pub fn stop_filter(&self) -> &StopFilter {
        &self.stop_filter
    }

    /// The underlying analysis pipeline, for extension with further filters.
    pub fn pipeline(&self) -> &PipelineAnalyzer {
        &self.inner
    }

    /// Normalize a line into its tokens.
    ///
    /// Never fails: the pipeline stages used here are infallible, and an
    /// unexpected error is treated as an empty line.
    pub fn tokens(&self, line: &str) -> Vec<Token> {
        match self.inner.analyze(line) {
            Ok(tokens) => tokens.collect(),
            Err(e) => {
                log::warn!("Normalizer dropped a line: {e}");
                Vec::new()
            }
        }
    }

    /// Normalize a line into its cleaned text, tokens joined by one space.
    pub fn normalize_line(&self, line: &str) -> String {
        self.tokens(line)
            .iter()
            .map(|token| token.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Normalize a sequence of lines, one output line per input line.
    pub fn normalize_lines<I, S>(&self, lines: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        lines
            .into_iter()
            .map(|line| self.normalize_line(line.as_ref()))
            .collect()
    }
}

impl Analyzer for TextNormalizer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "normalizer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_non_alphabetic() {
        let normalizer = TextNormalizer::new().unwrap();
        assert_eq!(
            normalizer.normalize_line("FEDERALIST No. 10 -- The Union, as a Safeguard!"),
            "union safeguard"
        );
        assert_eq!(normalizer.normalize_line("   \t  "), "");
        assert_eq!(normalizer.normalize_line("1787; 1788."), "");
    }

    #[test]
    fn test_stop_words_after_lowercasing() {
        let normalizer = TextNormalizer::new().unwrap();
        assert_eq!(normalizer.normalize_line("THE Powers OF Congress"), "powers congress");
        assert_eq!(normalizer.normalize_line("PUBLIUS."), "");
    }

    #[test]
    fn test_idempotent() {
        let normalizer = TextNormalizer::new().unwrap();
        let line = "It has been frequently remarked, that it seems to have been reserved...";
        let once = normalizer.normalize_line(line);
        assert_eq!(once, "frequently remarked seems reserved");
        assert_eq!(normalizer.normalize_line(&once), once);
    }

    #[test]
    fn test_from_config() {
        let config = NormalizerConfig {
            use_default_stop_words: false,
            extra_stop_words: vec!["Union".to_string()],
        };
        let normalizer = TextNormalizer::from_config(&config).unwrap();
        assert_eq!(normalizer.normalize_line("The Union"), "the");
        assert_eq!(normalizer.stop_filter().len(), 1);
    }

    #[test]
    fn test_normalize_lines_keeps_line_count() {
        let normalizer = TextNormalizer::new().unwrap();
        let lines = normalizer.normalize_lines(["The Senate", "", "of the"]);
        assert_eq!(lines, vec!["senate".to_string(), String::new(), String::new()]);
    }

    #[test]
    fn test_token_positions() {
        let normalizer = TextNormalizer::new().unwrap();
        let tokens = normalizer.tokens("the people of America");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "people");
        assert_eq!(tokens[0].position, 1);
        assert_eq!(tokens[1].text, "america");
        assert_eq!(tokens[1].position, 3);
    }
}
