//! Text analysis for essay text.
//!
//! Provides char filters, tokenization, token filters, part-of-speech tagging
//! and lemmatization, composed into analysis pipelines.

pub mod analyzer;
pub mod char_filter;
pub mod lemma;
pub mod token;
pub mod token_filter;
pub mod tokenizer;
