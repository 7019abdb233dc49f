//! Analyzers that combine char filters, a tokenizer and token filters.
//!
//! ```text
//! Raw line → Char Filters → Tokenizer → Filter 1 → ... → Filter N → Tokens
//! ```
//!
//! - [`PipelineAnalyzer`](pipeline::PipelineAnalyzer) - Custom char filter, tokenizer and filter chains
//! - [`TextNormalizer`](normalizer::TextNormalizer) - The essay text normalizer
//!
//! # Examples
//!
//! Implementing a custom analyzer:
//!
//! ```
//! use federalist::analysis::analyzer::Analyzer;
//! use federalist::analysis::token::TokenStream;
//! use federalist::error::Result;
//!
//! struct MyAnalyzer;
//!
//! impl Analyzer for MyAnalyzer {
//!     fn analyze(&self, text: &str) -> Result<TokenStream> {
//!         Ok(Box::new(std::iter::empty()))
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "my_analyzer"
//!     }
//! }
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for analyzers that convert text into processed tokens.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text and return a stream of tokens.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod normalizer;
pub mod pipeline;

pub use normalizer::TextNormalizer;
pub use pipeline::PipelineAnalyzer;
