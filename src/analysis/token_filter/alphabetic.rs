//! Alphabetic filter implementation.
//!
//! Keeps only tokens that can reach the lemma stage: non-empty, not stopped,
//! and made of ASCII letters only. Pure punctuation and tokens mixing letters
//! with digits or symbols are dropped.
//!
//! # Examples
//!
//! ```
//! use federalist::analysis::token_filter::Filter;
//! use federalist::analysis::token_filter::alphabetic::AlphabeticFilter;
//! use federalist::analysis::token::Token;
//!
//! let filter = AlphabeticFilter::new();
//! let tokens = vec![
//!     Token::new("union", 0),
//!     Token::new(";", 1),
//!     Token::new("", 2),
//!     Token::new("art1", 3),
//! ];
//!
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(result.len(), 1);
//! assert_eq!(result[0].text, "union");
//! ```

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// A filter that drops empty, stopped and non-alphabetic tokens.
#[derive(Clone, Debug, Default)]
pub struct AlphabeticFilter;

impl AlphabeticFilter {
    /// Create a new alphabetic filter.
    pub fn new() -> Self {
        AlphabeticFilter
    }

    /// Whether a word consists of ASCII letters only.
    pub fn is_alphabetic(word: &str) -> bool {
        !word.is_empty() && word.bytes().all(|b| b.is_ascii_alphabetic())
    }
}

impl Filter for AlphabeticFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens: Vec<Token> = tokens
            .filter(|token| !token.is_stopped() && Self::is_alphabetic(&token.text))
            .collect();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "alphabetic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabetic_filter() {
        let filter = AlphabeticFilter::new();
        let tokens = vec![
            Token::new("hello", 0),
            Token::new("", 1),
            Token::new("world", 2),
            Token::new("test", 3).stop(),
            Token::new("--", 4),
            Token::new("caf\u{e9}", 5),
        ];

        let result: Vec<Token> = filter.filter(Box::new(tokens.into_iter())).unwrap().collect();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].text, "hello");
        assert_eq!(result[1].text, "world");
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(AlphabeticFilter::new().name(), "alphabetic");
    }
}
