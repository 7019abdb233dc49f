//! Essay similarity by cosine over TF-IDF vectors.
//!
//! An essay with an all-zero weight vector has no defined similarity to
//! anything. Pairwise queries report it as
//! [`DegenerateVector`](crate::error::FederalistError::DegenerateVector);
//! rankings list such candidates in [`SimilarityReport::excluded`].

pub mod engine;
pub mod matrix;
pub mod report;

pub use engine::SimilarityEngine;
pub use matrix::SimilarityMatrix;
pub use report::{SimilarityHit, SimilarityReport};
