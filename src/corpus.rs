//! Essay collection indexed by canonical essay id.
//!
//! # Examples
//!
//! ```
//! use federalist::corpus::{CorpusBuilder, EssaySource};
//!
//! let builder = CorpusBuilder::new().unwrap();
//! let (corpus, report) = builder
//!     .build(vec![
//!         EssaySource::from_text("essay01.txt", "To the People of the State of New York:"),
//!         EssaySource::from_text("essay02.txt", "Concerning Dangers from Foreign Force"),
//!     ])
//!     .unwrap();
//!
//! assert_eq!(corpus.len(), 2);
//! assert_eq!(report.accepted, 2);
//! assert_eq!(corpus.essays()[0].id().to_string(), "Essay 1");
//! ```

pub mod builder;
pub mod essay;
pub mod essay_id;

pub use builder::{BuildReport, CorpusBuilder, EssaySource};
pub use essay::{Essay, TokenOccurrence};
pub use essay_id::EssayId;

use crate::error::{FederalistError, Result};

/// The essays under analysis, one per id, sorted by id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Corpus {
    essays: Vec<Essay>,
}

impl Corpus {
    /// Create a corpus from essays in any order. Duplicate ids are an error.
    pub fn from_essays(mut essays: Vec<Essay>) -> Result<Self> {
        essays.sort_by_key(Essay::id);
        if let Some(pair) = essays.windows(2).find(|pair| pair[0].id() == pair[1].id()) {
            return Err(FederalistError::corpus(format!(
                "{} appears more than once",
                pair[0].id()
            )));
        }
        Ok(Corpus { essays })
    }

    /// Wrap essays already sorted by unique id.
    pub(crate) fn from_sorted(essays: Vec<Essay>) -> Self {
        debug_assert!(essays.windows(2).all(|pair| pair[0].id() < pair[1].id()));
        Corpus { essays }
    }

    pub fn len(&self) -> usize {
        self.essays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.essays.is_empty()
    }

    pub fn essays(&self) -> &[Essay] {
        &self.essays
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Essay> {
        self.essays.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = EssayId> + '_ {
        self.essays.iter().map(Essay::id)
    }

    /// Look up an essay by id.
    pub fn get(&self, id: EssayId) -> Option<&Essay> {
        self.position(id).map(|index| &self.essays[index])
    }

    /// Index of an essay within [`Corpus::essays`].
    pub fn position(&self, id: EssayId) -> Option<usize> {
        self.essays.binary_search_by_key(&id, Essay::id).ok()
    }

    pub fn contains(&self, id: EssayId) -> bool {
        self.position(id).is_some()
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Essay;
    type IntoIter = std::slice::Iter<'a, Essay>;

    fn into_iter(self) -> Self::IntoIter {
        self.essays.iter()
    }
}
