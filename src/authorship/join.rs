//! Inner join of the corpus with the authorship table.
//!
//! Both sides are sorted by essay id, so the join is a single merge pass.
//! Essays found on only one side are dropped from the result and listed in
//! the [`JoinReport`].

use std::cmp::Ordering;
use std::collections::BTreeMap;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::authorship::cleaner::AuthorshipTable;
use crate::authorship::record::{Author, AuthorshipRecord};
use crate::corpus::{Corpus, Essay, EssayId};

/// An essay paired with its authorship record.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JoinedEssay<'a> {
    pub essay: &'a Essay,
    pub record: &'a AuthorshipRecord,
}

impl JoinedEssay<'_> {
    pub fn id(&self) -> EssayId {
        self.essay.id()
    }

    pub fn author(&self) -> Author {
        self.record.author
    }
}

/// Counts of what the join matched and dropped.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinReport {
    pub corpus_essays: usize,
    pub authorship_records: usize,
    pub joined: usize,
    /// Corpus essays without an authorship record
    pub missing_authorship: Vec<EssayId>,
    /// Authorship records without a corpus essay
    pub missing_essays: Vec<EssayId>,
}

impl JoinReport {
    /// Total number of rows dropped from either side.
    pub fn dropped(&self) -> usize {
        self.missing_authorship.len() + self.missing_essays.len()
    }
}

/// The essays present in both inputs, sorted by id.
#[derive(Clone, Debug, PartialEq)]
pub struct JoinedCorpus<'a> {
    essays: Vec<JoinedEssay<'a>>,
    report: JoinReport,
}

impl<'a> JoinedCorpus<'a> {
    pub fn essays(&self) -> &[JoinedEssay<'a>] {
        &self.essays
    }

    pub fn iter(&self) -> std::slice::Iter<'_, JoinedEssay<'a>> {
        self.essays.iter()
    }

    pub fn len(&self) -> usize {
        self.essays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.essays.is_empty()
    }

    pub fn report(&self) -> &JoinReport {
        &self.report
    }

    pub fn get(&self, essay: EssayId) -> Option<&JoinedEssay<'a>> {
        self.essays
            .binary_search_by_key(&essay, JoinedEssay::id)
            .ok()
            .map(|index| &self.essays[index])
    }

    /// Essays written by one author.
    pub fn by_author(&self, author: Author) -> impl Iterator<Item = &JoinedEssay<'a>> {
        self.essays.iter().filter(move |joined| joined.author() == author)
    }

    /// Number of joined essays per author.
    pub fn author_counts(&self) -> BTreeMap<Author, usize> {
        let mut counts = BTreeMap::new();
        for joined in &self.essays {
            *counts.entry(joined.author()).or_insert(0) += 1;
        }
        counts
    }
}

/// Join essays with their authorship records on essay id.
pub fn join<'a>(corpus: &'a Corpus, table: &'a AuthorshipTable) -> JoinedCorpus<'a> {
    let mut report = JoinReport {
        corpus_essays: corpus.len(),
        authorship_records: table.len(),
        ..JoinReport::default()
    };
    let mut essays = Vec::with_capacity(corpus.len().min(table.len()));

    let mut left = corpus.essays().iter().peekable();
    let mut right = table.records().iter().peekable();
    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (Some(essay), Some(record)) => match essay.id().cmp(&record.essay) {
                Ordering::Equal => {
                    essays.push(JoinedEssay { essay, record });
                    left.next();
                    right.next();
                }
                Ordering::Less => {
                    report.missing_authorship.push(essay.id());
                    left.next();
                }
                Ordering::Greater => {
                    report.missing_essays.push(record.essay);
                    right.next();
                }
            },
            (Some(essay), None) => {
                report.missing_authorship.push(essay.id());
                left.next();
            }
            (None, Some(record)) => {
                report.missing_essays.push(record.essay);
                right.next();
            }
            (None, None) => break,
        }
    }
    report.joined = essays.len();

    if !report.missing_authorship.is_empty() {
        warn!(
            "{} essays have no authorship record and were dropped",
            report.missing_authorship.len()
        );
    }
    if !report.missing_essays.is_empty() {
        warn!(
            "{} authorship records have no essay and were dropped",
            report.missing_essays.len()
        );
    }
    info!("Joined {} essays with authorship data", report.joined);

    JoinedCorpus { essays, report }
}
