//! Term counting and TF-IDF weighting over the corpus vocabulary.
//!
//! # Examples
//!
//! ```
//! use federalist::corpus::{CorpusBuilder, EssayId, EssaySource};
//! use federalist::weighting::TermWeights;
//!
//! let (corpus, _) = CorpusBuilder::new()
//!     .unwrap()
//!     .build(vec![
//!         EssaySource::from_text("essay01.txt", "factions and factions"),
//!         EssaySource::from_text("essay02.txt", "the union"),
//!     ])
//!     .unwrap();
//!
//! let weights = TermWeights::from_corpus(&corpus).unwrap();
//! let first = EssayId::new(1).unwrap();
//! assert_eq!(weights.tf(first, "faction").unwrap(), 1.0);
//! assert_eq!(weights.df("faction"), 1);
//! assert!((weights.idf("faction").unwrap() - 2f64.ln()).abs() < 1e-12);
//! ```

pub mod term_matrix;
pub mod tfidf;
pub mod vocabulary;

pub use term_matrix::{DocumentRow, DocumentTermMatrix, TermFrequency};
pub use tfidf::{TermWeight, TermWeights};
pub use vocabulary::{TermId, Vocabulary};
