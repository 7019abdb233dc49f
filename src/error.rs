//! Error types for the federalist library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`FederalistError`] enum. Conditions that the analysis can recover from
//! (a skipped line, a lemma fallback, a join miss) are never errors; they are
//! counted in the report structs of the stage that met them.
//!
//! # Examples
//!
//! ```
//! use federalist::error::{FederalistError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(FederalistError::config("authorship table is empty"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

use crate::corpus::EssayId;

/// The main error type for federalist operations.
#[derive(Error, Debug)]
pub enum FederalistError {
    /// I/O errors (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// CSV reading or writing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Analysis-related errors (tokenization, filtering, tagging)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Corpus construction errors
    #[error("Corpus error: {0}")]
    Corpus(String),

    /// Authorship table errors
    #[error("Authorship error: {0}")]
    Authorship(String),

    /// Invalid or missing configuration; aborts the pipeline
    #[error("Configuration error: {0}")]
    Config(String),

    /// An essay whose weight vector is all zeros has no defined similarity
    #[error("Degenerate vector: {0} has an all-zero weight vector")]
    DegenerateVector(EssayId),

    /// A requested item does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with FederalistError.
pub type Result<T> = std::result::Result<T, FederalistError>;

impl FederalistError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        FederalistError::Analysis(msg.into())
    }

    /// Create a new corpus error.
    pub fn corpus<S: Into<String>>(msg: S) -> Self {
        FederalistError::Corpus(msg.into())
    }

    /// Create a new authorship error.
    pub fn authorship<S: Into<String>>(msg: S) -> Self {
        FederalistError::Authorship(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        FederalistError::Config(msg.into())
    }

    /// Create a new not found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        FederalistError::NotFound(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        FederalistError::Other(msg.into())
    }

    /// Whether this error aborts a pipeline run before any computation.
    pub fn is_config(&self) -> bool {
        matches!(self, FederalistError::Config(_))
    }
}
