//! Token filter implementations for token transformation.
//!
//! Filters receive a token stream and produce a new one, implementing
//! lowercasing, stop word removal, alphabetic screening and lemmatization.
//!
//! # Available Filters
//!
//! - [`lowercase::LowercaseFilter`] - Converts tokens to lowercase
//! - [`stop::StopFilter`] - Removes stop words
//! - [`alphabetic::AlphabeticFilter`] - Drops empty, stopped and non-alphabetic tokens
//! - [`lemma::LemmaFilter`] - Tags each token and replaces it with its lemma
//!
//! # Filter Chaining
//!
//! ```text
//! Tokenizer → Lowercase → Stop Words → Alphabetic → Lemma
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod alphabetic;
pub mod lemma;
pub mod lowercase;
pub mod stop;

pub use alphabetic::AlphabeticFilter;
pub use lemma::LemmaFilter;
pub use lowercase::LowercaseFilter;
pub use stop::StopFilter;
