//! Token types for text analysis.
//!
//! A [`Token`] is the unit that flows through the analysis pipeline: the
//! tokenizer creates it from a cleaned line, token filters lowercase it, stop
//! it, and finally replace its text with a lemma. The surface form and the
//! part-of-speech tag assigned on the way are kept in [`TokenMetadata`].
//!
//! # Examples
//!
//! ```
//! use federalist::analysis::token::Token;
//!
//! let token = Token::new("states", 0);
//! assert_eq!(token.text, "states");
//! assert_eq!(token.position, 0);
//! assert!(!token.is_stopped());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analysis::lemma::PosTag;

/// A single unit of text produced by tokenization.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The text content of the token
    pub text: String,

    /// The position of the token in the token stream (0-based)
    pub position: usize,

    /// Whether this token has been marked as stopped (removed) by a filter
    pub stopped: bool,

    /// Additional metadata attached by filters
    pub metadata: Option<TokenMetadata>,
}

/// Metadata attached to a token by the lemma stage.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenMetadata {
    /// The text before the lemma replaced it
    pub original_text: Option<String>,

    /// Part-of-speech tag assigned by the tagger
    pub part_of_speech: Option<PosTag>,

    /// Whether the lemma is the lowercased surface form used as a fallback
    pub lemma_fallback: bool,
}

impl Token {
    /// Create a new token with the given text and position.
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Token {
            text: text.into(),
            position,
            stopped: false,
            metadata: None,
        }
    }

    /// Get the length of the token text.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the token is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Mark this token as stopped.
    pub fn stop(mut self) -> Self {
        self.stopped = true;
        self
    }

    /// Check if this token is stopped.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Get a reference to the metadata.
    pub fn metadata(&self) -> Option<&TokenMetadata> {
        self.metadata.as_ref()
    }

    /// Set the original text in metadata.
    pub fn with_original_text<S: Into<String>>(mut self, original: S) -> Self {
        let metadata = self.metadata.get_or_insert_with(TokenMetadata::default);
        metadata.original_text = Some(original.into());
        self
    }

    /// Set the part-of-speech tag in metadata.
    pub fn with_part_of_speech(mut self, tag: PosTag) -> Self {
        let metadata = self.metadata.get_or_insert_with(TokenMetadata::default);
        metadata.part_of_speech = Some(tag);
        self
    }

    /// Record whether the lemma stage fell back to the surface form.
    pub fn with_lemma_fallback(mut self, fallback: bool) -> Self {
        let metadata = self.metadata.get_or_insert_with(TokenMetadata::default);
        metadata.lemma_fallback = fallback;
        self
    }

    /// Clone this token with updated text.
    pub fn with_text<S: Into<String>>(&self, text: S) -> Self {
        let mut token = self.clone();
        token.text = text.into();
        token
    }

    /// The text before any lemma replaced it.
    pub fn surface(&self) -> &str {
        self.metadata
            .as_ref()
            .and_then(|m| m.original_text.as_deref())
            .unwrap_or(&self.text)
    }

    /// The part-of-speech tag, if the token went through a tagger.
    pub fn part_of_speech(&self) -> Option<&PosTag> {
        self.metadata.as_ref().and_then(|m| m.part_of_speech.as_ref())
    }

    /// Whether the lemma stage used the fallback path for this token.
    pub fn is_lemma_fallback(&self) -> bool {
        self.metadata.as_ref().is_some_and(|m| m.lemma_fallback)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// A token stream represents a sequence of tokens from the analysis pipeline.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;

/// Trait for types that can produce a token stream.
pub trait IntoTokenStream {
    /// Convert this type into a token stream.
    fn into_token_stream(self) -> TokenStream;
}

impl IntoTokenStream for Vec<Token> {
    fn into_token_stream(self) -> TokenStream {
        Box::new(self.into_iter())
    }
}
