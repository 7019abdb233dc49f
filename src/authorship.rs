//! Authorship metadata: cleaning the scraped table and joining it with the
//! corpus.
//!
//! # Examples
//!
//! ```
//! use federalist::authorship::{Author, AuthorshipCleaner, RawAuthorshipRow};
//!
//! let cleaner = AuthorshipCleaner::default();
//! let (table, report) = cleaner
//!     .clean(vec![
//!         RawAuthorshipRow::new("1", "Hamilton", "For the Independent Journal", "Saturday, October 27, 1787"),
//!         RawAuthorshipRow::new("50", "Hamilton or Madison", "--", "--"),
//!     ])
//!     .unwrap();
//!
//! assert_eq!(table.len(), 2);
//! assert_eq!(table.records()[1].author, Author::Unknown);
//! assert_eq!(table.records()[1].publication, "Unknown");
//! assert_eq!(report.unknown_authors, 1);
//! ```

pub mod cleaner;
pub mod join;
pub mod record;

pub use cleaner::{AuthorshipCleaner, AuthorshipTable, CleaningReport, UNKNOWN_PUBLICATION};
pub use join::{JoinReport, JoinedCorpus, JoinedEssay, join};
pub use record::{Author, AuthorshipRecord, RawAuthorshipRow};
