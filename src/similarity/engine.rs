//! Cosine similarity over essay weight vectors.

use std::sync::Arc;

use log::debug;
use rayon::prelude::*;

use crate::corpus::EssayId;
use crate::error::{FederalistError, Result};
use crate::similarity::matrix::SimilarityMatrix;
use crate::similarity::report::{SimilarityHit, SimilarityReport};
use crate::vector::SparseVector;
use crate::weighting::TermWeights;

/// Answers similarity queries against a fixed set of TF-IDF weights.
///
/// The weights are shared read-only, so an engine can be cloned freely and
/// queried from any number of threads.
#[derive(Clone, Debug)]
pub struct SimilarityEngine {
    weights: Arc<TermWeights>,
    essays: Vec<EssayId>,
}

impl SimilarityEngine {
    pub fn new(weights: Arc<TermWeights>) -> Self {
        let essays = weights.essay_ids().collect();
        SimilarityEngine { weights, essays }
    }

    pub fn weights(&self) -> &TermWeights {
        &self.weights
    }

    /// Essays known to the engine, ascending.
    pub fn essays(&self) -> &[EssayId] {
        &self.essays
    }

    fn index_of(&self, essay: EssayId) -> Result<usize> {
        self.essays
            .binary_search(&essay)
            .map_err(|_| FederalistError::not_found(format!("{essay} is not in the corpus")))
    }

    fn vector_at(&self, index: usize) -> &SparseVector {
        &self.weights.vectors()[index]
    }

    /// Similarity of two rows, `None` when either vector is all zeros.
    pub(crate) fn score_at(&self, a: usize, b: usize) -> Option<f64> {
        let (va, vb) = (self.vector_at(a), self.vector_at(b));
        if va.is_zero() || vb.is_zero() {
            return None;
        }
        if a == b || va == vb {
            return Some(1.0);
        }
        // Weights are non-negative, so only rounding can leave [0, 1].
        va.cosine(vb).map(|cosine| cosine.clamp(0.0, 1.0))
    }

    /// Cosine similarity of two essays.
    ///
    /// Returns [`FederalistError::DegenerateVector`] when either essay has
    /// an all-zero weight vector.
    pub fn similarity(&self, a: EssayId, b: EssayId) -> Result<f64> {
        let (ia, ib) = (self.index_of(a)?, self.index_of(b)?);
        for (essay, index) in [(a, ia), (b, ib)] {
            if self.vector_at(index).is_zero() {
                return Err(FederalistError::DegenerateVector(essay));
            }
        }
        self.score_at(ia, ib)
            .ok_or_else(|| FederalistError::other("similarity undefined for non-zero vectors"))
    }

    /// Every essay ranked by similarity to `query`, the query included.
    pub fn rank(&self, query: EssayId) -> Result<SimilarityReport> {
        let q = self.index_of(query)?;
        if self.vector_at(q).is_zero() {
            return Err(FederalistError::DegenerateVector(query));
        }

        let mut report = SimilarityReport::new(query);
        for (index, &essay) in self.essays.iter().enumerate() {
            match self.score_at(q, index) {
                Some(score) => report.hits.push(SimilarityHit { essay, score }),
                None => report.excluded.push(essay),
            }
        }
        report.sort();

        if !report.excluded.is_empty() {
            debug!(
                "Excluded {} essays with empty weight vectors from the ranking of {query}",
                report.excluded.len()
            );
        }
        Ok(report)
    }

    /// The `k` most similar essays, the query itself included.
    pub fn top_k(&self, query: EssayId, k: usize) -> Result<SimilarityReport> {
        let mut report = self.rank(query)?;
        report.take_top_k(k);
        Ok(report)
    }

    /// The `n` most similar other essays.
    pub fn nearest(&self, query: EssayId, n: usize) -> Result<SimilarityReport> {
        let mut report = self.rank(query)?;
        report.exclude_query();
        report.take_top_k(n);
        Ok(report)
    }

    /// The full essay-by-essay similarity matrix, rows computed in parallel.
    pub fn matrix(&self) -> SimilarityMatrix {
        let n = self.essays.len();
        let cells: Vec<Option<f64>> = (0..n)
            .into_par_iter()
            .flat_map_iter(|a| (0..n).map(move |b| self.score_at(a, b)))
            .collect();
        SimilarityMatrix::new(self.essays.clone(), cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{CorpusBuilder, EssaySource};

    fn id(n: u16) -> EssayId {
        EssayId::new(n).unwrap()
    }

    fn engine(texts: &[(&str, &str)]) -> SimilarityEngine {
        let sources = texts
            .iter()
            .map(|(name, text)| EssaySource::from_text(*name, text))
            .collect();
        let (corpus, _) = CorpusBuilder::new().unwrap().build(sources).unwrap();
        SimilarityEngine::new(Arc::new(TermWeights::from_corpus(&corpus).unwrap()))
    }

    #[test]
    fn test_identical_and_disjoint() {
        let engine = engine(&[
            ("essay01.txt", "union liberty"),
            ("essay02.txt", "union union liberty liberty"),
            ("essay03.txt", "faction"),
        ]);

        assert!((engine.similarity(id(1), id(2)).unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(engine.similarity(id(1), id(3)).unwrap(), 0.0);
        assert_eq!(engine.similarity(id(3), id(3)).unwrap(), 1.0);
        assert!(engine.similarity(id(1), id(4)).is_err());
    }

    #[test]
    fn test_degenerate_vectors() {
        let engine = engine(&[
            ("essay01.txt", "union"),
            ("essay02.txt", "faction"),
            ("essay03.txt", "The of"),
        ]);

        match engine.similarity(id(1), id(3)) {
            Err(FederalistError::DegenerateVector(essay)) => assert_eq!(essay, id(3)),
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(matches!(
            engine.top_k(id(3), 2),
            Err(FederalistError::DegenerateVector(_))
        ));

        let report = engine.rank(id(1)).unwrap();
        assert_eq!(report.excluded, vec![id(3)]);
        assert_eq!(report.len(), 2);
    }

    #[test]
    fn test_top_k_and_nearest() {
        let engine = engine(&[
            ("essay01.txt", "union power"),
            ("essay02.txt", "union power"),
            ("essay03.txt", "union faction"),
            ("essay04.txt", "faction"),
        ]);

        // Essays 1 and 2 are identical, so the tie goes to the lower id.
        let top = engine.top_k(id(2), 3).unwrap();
        let order: Vec<u16> = top.hits.iter().map(|h| h.essay.get()).collect();
        assert_eq!(order, vec![1, 2, 3]);

        let nearest = engine.nearest(id(2), 2).unwrap();
        assert_eq!(nearest.len(), 2);
        assert!(nearest.hits.iter().all(|h| h.essay != id(2)));
        assert!(nearest.hits.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_matrix_symmetric() {
        let engine = engine(&[
            ("essay01.txt", "union power liberty"),
            ("essay02.txt", "union faction"),
            ("essay03.txt", "power faction faction"),
        ]);
        let matrix = engine.matrix();
        assert_eq!(matrix.len(), 3);
        for &a in engine.essays() {
            assert_eq!(matrix.get(a, a), Some(1.0));
            for &b in engine.essays() {
                assert_eq!(matrix.get(a, b), matrix.get(b, a));
            }
        }
    }
}
