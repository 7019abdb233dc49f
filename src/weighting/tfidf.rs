//! TF-IDF weights.
//!
//! For an essay `e` with `T(e)` cleaned tokens, over a corpus of `N` essays:
//!
//! - `tf(t, e) = count(t, e) / T(e)`
//! - `df(t)` is the number of essays containing `t`
//! - `idf(t) = ln(N / df(t))`
//! - `tfidf(t, e) = tf(t, e) * idf(t)`
//!
//! Every vocabulary term occurs somewhere, so `1 <= df(t) <= N` and idf is
//! finite and non-negative. A term found in every essay weighs zero.

use std::cmp::Ordering;

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::corpus::{Corpus, EssayId};
use crate::error::{FederalistError, Result};
use crate::vector::SparseVector;
use crate::weighting::term_matrix::{DocumentRow, DocumentTermMatrix};
use crate::weighting::vocabulary::{TermId, Vocabulary};

/// A term and its weight in one essay.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TermWeight {
    pub term: String,
    pub count: u32,
    pub tf: f64,
    pub idf: f64,
    pub tfidf: f64,
}

/// TF-IDF weights of every essay, derived from a [`DocumentTermMatrix`].
///
/// Immutable once computed; a changed corpus means a new `TermWeights`.
#[derive(Clone, Debug)]
pub struct TermWeights {
    matrix: DocumentTermMatrix,
    df: Vec<u32>,
    idf: Vec<f64>,
    vectors: Vec<SparseVector>,
}

impl TermWeights {
    /// Count and weigh the lemmas of a corpus.
    pub fn from_corpus(corpus: &Corpus) -> Result<Self> {
        Self::from_matrix(DocumentTermMatrix::from_corpus(corpus))
    }

    /// Weigh an existing count matrix.
    pub fn from_matrix(matrix: DocumentTermMatrix) -> Result<Self> {
        let n = matrix.document_count();
        if n == 0 {
            return Err(FederalistError::corpus("cannot weigh an empty corpus"));
        }

        let df = matrix.document_frequencies();
        let idf: Vec<f64> = df
            .iter()
            .map(|&df| (n as f64 / f64::from(df)).ln())
            .collect();

        let vectors = matrix
            .rows()
            .par_iter()
            .map(|row| Self::weigh_row(row, &idf))
            .collect();

        debug!(
            "Weighted {} essays over a vocabulary of {} terms",
            n,
            matrix.vocabulary().len()
        );

        Ok(TermWeights {
            matrix,
            df,
            idf,
            vectors,
        })
    }

    fn weigh_row(row: &DocumentRow, idf: &[f64]) -> SparseVector {
        if row.total == 0 {
            return SparseVector::default();
        }
        let total = row.total as f64;
        SparseVector::from_entries(
            row.counts
                .iter()
                .map(|&(term, count)| (term, f64::from(count) / total * idf[term.index()]))
                .collect(),
        )
    }

    pub fn matrix(&self) -> &DocumentTermMatrix {
        &self.matrix
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        self.matrix.vocabulary()
    }

    /// Number of essays `N`.
    pub fn corpus_size(&self) -> usize {
        self.matrix.document_count()
    }

    /// Essay ids in row order.
    pub fn essay_ids(&self) -> impl Iterator<Item = EssayId> + '_ {
        self.matrix.rows().iter().map(|row| row.essay)
    }

    fn row(&self, essay: EssayId) -> Result<(usize, &DocumentRow)> {
        self.matrix
            .rows()
            .binary_search_by_key(&essay, |row| row.essay)
            .map(|index| (index, &self.matrix.rows()[index]))
            .map_err(|_| FederalistError::not_found(format!("{essay} is not in the corpus")))
    }

    /// Term frequency. Zero for terms outside the vocabulary or the essay.
    pub fn tf(&self, essay: EssayId, term: &str) -> Result<f64> {
        let (_, row) = self.row(essay)?;
        match self.vocabulary().id(term) {
            Some(id) if row.total > 0 => Ok(f64::from(row.count(id)) / row.total as f64),
            _ => Ok(0.0),
        }
    }

    /// Number of essays containing the term.
    pub fn df(&self, term: &str) -> usize {
        self.vocabulary()
            .id(term)
            .map_or(0, |id| self.df[id.index()] as usize)
    }

    /// Inverse document frequency, `None` for terms outside the vocabulary.
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocabulary().id(term).map(|id| self.idf[id.index()])
    }

    /// Inverse document frequency by term id.
    pub fn idf_of(&self, term: TermId) -> Option<f64> {
        self.idf.get(term.index()).copied()
    }

    /// TF-IDF weight of a term in an essay.
    pub fn tfidf(&self, essay: EssayId, term: &str) -> Result<f64> {
        let (index, _) = self.row(essay)?;
        Ok(self
            .vocabulary()
            .id(term)
            .map_or(0.0, |id| self.vectors[index].get(id)))
    }

    /// Weight vector of an essay.
    pub fn vector(&self, essay: EssayId) -> Option<&SparseVector> {
        self.row(essay).ok().map(|(index, _)| &self.vectors[index])
    }

    /// Weight vectors in row order.
    pub fn vectors(&self) -> &[SparseVector] {
        &self.vectors
    }

    /// The `n` highest-weighted terms of an essay, ties by term.
    ///
    /// Terms with zero weight are never listed.
    pub fn top_terms(&self, essay: EssayId, n: usize) -> Result<Vec<TermWeight>> {
        let (index, row) = self.row(essay)?;
        let mut entries: Vec<(TermId, f64)> = self.vectors[index].entries().to_vec();
        entries.sort_by(|a, b| match b.1.total_cmp(&a.1) {
            Ordering::Equal => a.0.cmp(&b.0),
            ordering => ordering,
        });

        Ok(entries
            .into_iter()
            .take(n)
            .filter_map(|(id, tfidf)| {
                let term = self.vocabulary().term(id)?;
                let count = row.count(id);
                Some(TermWeight {
                    term: term.to_string(),
                    count,
                    tf: f64::from(count) / row.total as f64,
                    idf: self.idf[id.index()],
                    tfidf,
                })
            })
            .collect())
    }
}
