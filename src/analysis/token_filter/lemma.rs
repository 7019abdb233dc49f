//! Lemma filter implementation.
//!
//! Tags every live token of a line with a [`PosTagger`] and replaces its text
//! with the lemma produced by a [`Lemmatizer`]. The surface form, the tag and
//! whether the lemmatizer fell back to the surface form are kept in the
//! token metadata.
//!
//! # Examples
//!
//! ```
//! use federalist::analysis::token_filter::Filter;
//! use federalist::analysis::token_filter::lemma::LemmaFilter;
//! use federalist::analysis::token::Token;
//!
//! let filter = LemmaFilter::new();
//! let tokens = vec![Token::new("powers", 0), Token::new("delegated", 1)];
//!
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(result[0].text, "power");
//! assert_eq!(result[0].surface(), "powers");
//! assert_eq!(result[1].text, "delegate");
//! ```

use std::sync::Arc;

use crate::analysis::lemma::{Lemmatizer, PosTagger, RuleLemmatizer, SuffixTagger};
use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Filter that tags and lemmatizes tokens.
#[derive(Clone)]
pub struct LemmaFilter {
    tagger: Arc<dyn PosTagger>,
    lemmatizer: Arc<dyn Lemmatizer>,
}

impl std::fmt::Debug for LemmaFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LemmaFilter")
            .field("tagger", &self.tagger.name())
            .field("lemmatizer", &self.lemmatizer.name())
            .finish()
    }
}

impl LemmaFilter {
    /// Create a lemma filter with the suffix tagger and rule lemmatizer.
    pub fn new() -> Self {
        Self::with_components(Arc::new(SuffixTagger::new()), Arc::new(RuleLemmatizer::new()))
    }

    /// Create a lemma filter from a custom tagger and lemmatizer.
    pub fn with_components(tagger: Arc<dyn PosTagger>, lemmatizer: Arc<dyn Lemmatizer>) -> Self {
        LemmaFilter { tagger, lemmatizer }
    }

    /// Replace the lemmatizer.
    pub fn with_lemmatizer(mut self, lemmatizer: Arc<dyn Lemmatizer>) -> Self {
        self.lemmatizer = lemmatizer;
        self
    }

    /// Get the tagger.
    pub fn tagger(&self) -> &Arc<dyn PosTagger> {
        &self.tagger
    }

    /// Get the lemmatizer.
    pub fn lemmatizer(&self) -> &Arc<dyn Lemmatizer> {
        &self.lemmatizer
    }
}

impl Default for LemmaFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for LemmaFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let tokens: Vec<Token> = tokens.collect();
        let live: Vec<&str> = tokens
            .iter()
            .filter(|token| !token.is_stopped())
            .map(|token| token.text.as_str())
            .collect();
        let mut tags = self.tagger.tag_line(&live).into_iter();

        let mut lemmatized = Vec::with_capacity(tokens.len());
        for token in tokens {
            if token.is_stopped() {
                lemmatized.push(token);
                continue;
            }
            let tag = tags.next().unwrap_or_else(|| self.tagger.tag(&token.text));
            let outcome = self.lemmatizer.lemmatize(&token.text, &tag);
            let surface = token.text.clone();
            lemmatized.push(
                token
                    .with_text(outcome.lemma())
                    .with_original_text(surface)
                    .with_part_of_speech(tag)
                    .with_lemma_fallback(outcome.is_fallback()),
            );
        }

        Ok(Box::new(lemmatized.into_iter()))
    }

    fn name(&self) -> &'static str {
        "lemma"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::lemma::{LemmaOutcome, PosTag};

    struct FixedTagger(&'static str);

    impl PosTagger for FixedTagger {
        fn tag(&self, _word: &str) -> PosTag {
            PosTag::new(self.0)
        }

        fn name(&self) -> &'static str {
            "fixed"
        }
    }

    #[test]
    fn test_lemma_filter() {
        let filter = LemmaFilter::new();
        let tokens = vec![
            Token::new("states", 0),
            Token::new("shall", 1),
            Token::new("the", 2).stop(),
            Token::new("decided", 3),
        ];

        let result: Vec<Token> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();

        assert_eq!(result.len(), 4);
        assert_eq!(result[0].text, "state");
        assert_eq!(result[0].part_of_speech().map(|t| t.as_str()), Some("NNS"));
        assert!(!result[0].is_lemma_fallback());

        assert_eq!(result[1].text, "shall");
        assert!(result[1].is_lemma_fallback());

        assert!(result[2].is_stopped());
        assert!(result[2].metadata().is_none());

        assert_eq!(result[3].text, "decide");
        assert_eq!(result[3].surface(), "decided");
        assert_eq!(result[3].position, 3);
    }

    #[test]
    fn test_custom_tagger() {
        let filter = LemmaFilter::with_components(
            Arc::new(FixedTagger("VBG")),
            Arc::new(RuleLemmatizer::new()),
        );
        let tokens = vec![Token::new("taking", 0)];
        let result: Vec<Token> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();
        assert_eq!(result[0].text, "take");

        let outcome = filter.lemmatizer().lemmatize("taking", &PosTag::new("VBG"));
        assert_eq!(outcome, LemmaOutcome::Found("take".to_string()));
        assert_eq!(filter.tagger().name(), "fixed");
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(LemmaFilter::new().name(), "lemma");
    }
}
