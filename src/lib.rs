//! # Federalist
//!
//! Stylometric analysis of the Federalist Papers in Rust.
//!
//! ## Features
//!
//! - Text normalization as an analysis pipeline (char filter, tokenizer, token filters)
//! - Part-of-speech tagging and rule-based lemmatization with an observable fallback
//! - Corpus construction keyed by canonical essay ids
//! - TF-IDF term weighting over sparse vectors
//! - Cosine similarity rankings and the full similarity matrix
//! - Authorship table cleaning and an inner join that reports what it drops

pub mod analysis;
pub mod authorship;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod dataset;
pub mod error;
pub mod ingest;
pub mod pipeline;
pub mod similarity;
pub mod vector;
pub mod weighting;

pub mod prelude {
    pub use crate::authorship::{Author, AuthorshipCleaner, AuthorshipTable, join};
    pub use crate::config::PipelineConfig;
    pub use crate::corpus::{Corpus, CorpusBuilder, EssayId, EssaySource};
    pub use crate::error::{FederalistError, Result};
    pub use crate::pipeline::{Analysis, Pipeline, RunReport};
    pub use crate::similarity::{SimilarityEngine, SimilarityReport};
    pub use crate::weighting::TermWeights;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
