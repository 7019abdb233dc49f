//! Document-term count matrix.
//!
//! One sparse row of `(TermId, count)` pairs per essay. The counts of a row
//! always sum to the essay's cleaned token count.

use std::cmp::Reverse;

use ahash::AHashMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::corpus::{Corpus, EssayId};
use crate::weighting::vocabulary::{TermId, Vocabulary};

/// Term counts of one essay.
#[derive(Clone, Debug, PartialEq)]
pub struct DocumentRow {
    pub essay: EssayId,
    /// Non-zero counts sorted by term id
    pub counts: Vec<(TermId, u32)>,
    /// Cleaned token count of the essay
    pub total: usize,
}

impl DocumentRow {
    /// Count of a term in this essay.
    pub fn count(&self, term: TermId) -> u32 {
        self.counts
            .binary_search_by_key(&term, |(t, _)| *t)
            .map(|index| self.counts[index].1)
            .unwrap_or(0)
    }
}

/// A lemma with its corpus-wide occurrence count.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermFrequency {
    pub term: String,
    pub count: u64,
}

/// Raw counts of every vocabulary term in every essay.
#[derive(Clone, Debug)]
pub struct DocumentTermMatrix {
    vocabulary: Vocabulary,
    rows: Vec<DocumentRow>,
}

impl DocumentTermMatrix {
    /// Count lemmas per essay. Rows follow corpus order.
    pub fn from_corpus(corpus: &Corpus) -> Self {
        let vocabulary = Vocabulary::from_corpus(corpus);

        let rows = corpus
            .essays()
            .par_iter()
            .map(|essay| {
                let mut counts: AHashMap<TermId, u32> = AHashMap::new();
                for lemma in essay.lemmas() {
                    if let Some(term) = vocabulary.id(lemma) {
                        *counts.entry(term).or_insert(0) += 1;
                    }
                }
                let mut counts: Vec<(TermId, u32)> = counts.into_iter().collect();
                counts.sort_unstable_by_key(|(term, _)| *term);
                DocumentRow {
                    essay: essay.id(),
                    counts,
                    total: essay.token_count(),
                }
            })
            .collect();

        DocumentTermMatrix { vocabulary, rows }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn rows(&self) -> &[DocumentRow] {
        &self.rows
    }

    /// Number of essays (rows).
    pub fn document_count(&self) -> usize {
        self.rows.len()
    }

    /// Row of an essay.
    pub fn row(&self, essay: EssayId) -> Option<&DocumentRow> {
        self.rows
            .binary_search_by_key(&essay, |row| row.essay)
            .ok()
            .map(|index| &self.rows[index])
    }

    /// Raw count of `term` in `essay`; zero when either is unknown.
    pub fn count(&self, essay: EssayId, term: &str) -> u32 {
        match (self.row(essay), self.vocabulary.id(term)) {
            (Some(row), Some(term)) => row.count(term),
            _ => 0,
        }
    }

    /// Cleaned token count of an essay.
    pub fn total_tokens(&self, essay: EssayId) -> Option<usize> {
        self.row(essay).map(|row| row.total)
    }

    /// Number of essays containing each term, indexed by term id.
    pub fn document_frequencies(&self) -> Vec<u32> {
        let mut df = vec![0u32; self.vocabulary.len()];
        for row in &self.rows {
            for (term, _) in &row.counts {
                df[term.index()] += 1;
            }
        }
        df
    }

    /// The `n` most frequent lemmas across the corpus, ties by term.
    pub fn most_common(&self, n: usize) -> Vec<TermFrequency> {
        let mut totals = vec![0u64; self.vocabulary.len()];
        for row in &self.rows {
            for &(term, count) in &row.counts {
                totals[term.index()] += u64::from(count);
            }
        }

        let mut ranked: Vec<(TermId, u64)> = totals
            .into_iter()
            .enumerate()
            .map(|(index, count)| (TermId(index as u32), count))
            .collect();
        // Term ids follow lexicographic order, so the id breaks ties by term.
        ranked.sort_by_key(|&(term, count)| (Reverse(count), term));

        ranked
            .into_iter()
            .take(n)
            .filter_map(|(term, count)| {
                self.vocabulary.term(term).map(|text| TermFrequency {
                    term: text.to_string(),
                    count,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{CorpusBuilder, EssaySource};

    fn corpus() -> Corpus {
        CorpusBuilder::new()
            .unwrap()
            .build(vec![
                EssaySource::from_text("essay01.txt", "union union liberty"),
                EssaySource::from_text("essay02.txt", "liberty faction"),
                EssaySource::from_text("essay03.txt", "The of"),
            ])
            .unwrap()
            .0
    }

    #[test]
    fn test_counts_sum_to_totals() {
        let matrix = DocumentTermMatrix::from_corpus(&corpus());
        assert_eq!(matrix.document_count(), 3);
        assert_eq!(matrix.vocabulary().len(), 3);

        for row in matrix.rows() {
            let sum: u32 = row.counts.iter().map(|(_, c)| c).sum();
            assert_eq!(sum as usize, row.total);
        }

        let one = EssayId::new(1).unwrap();
        assert_eq!(matrix.count(one, "union"), 2);
        assert_eq!(matrix.count(one, "faction"), 0);
        assert_eq!(matrix.count(one, "unknown"), 0);
        assert_eq!(matrix.total_tokens(one), Some(3));
        assert_eq!(matrix.total_tokens(EssayId::new(3).unwrap()), Some(0));
        assert_eq!(matrix.total_tokens(EssayId::new(4).unwrap()), None);
    }

    #[test]
    fn test_document_frequencies() {
        let matrix = DocumentTermMatrix::from_corpus(&corpus());
        let df = matrix.document_frequencies();
        let liberty = matrix.vocabulary().id("liberty").unwrap();
        let union = matrix.vocabulary().id("union").unwrap();
        assert_eq!(df[liberty.index()], 2);
        assert_eq!(df[union.index()], 1);
    }

    #[test]
    fn test_most_common() {
        let matrix = DocumentTermMatrix::from_corpus(&corpus());
        let common = matrix.most_common(2);
        assert_eq!(
            common,
            vec![
                TermFrequency { term: "liberty".to_string(), count: 2 },
                TermFrequency { term: "union".to_string(), count: 2 },
            ]
        );
        assert_eq!(matrix.most_common(10).len(), 3);
    }
}
