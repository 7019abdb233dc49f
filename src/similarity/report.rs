//! Ranked similarity results.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::corpus::EssayId;

/// One ranked essay.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimilarityHit {
    pub essay: EssayId,
    /// Cosine similarity in `[0, 1]`
    pub score: f64,
}

impl SimilarityHit {
    /// Ranking order: score descending, then essay id ascending.
    pub fn rank_cmp(&self, other: &SimilarityHit) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| self.essay.cmp(&other.essay))
    }
}

/// Essays ranked by similarity to a query essay.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimilarityReport {
    pub query: EssayId,
    pub hits: Vec<SimilarityHit>,
    /// Candidates with an all-zero weight vector, left out of the ranking
    pub excluded: Vec<EssayId>,
}

impl SimilarityReport {
    pub fn new(query: EssayId) -> Self {
        SimilarityReport {
            query,
            hits: Vec::new(),
            excluded: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// Sort hits into ranking order.
    pub fn sort(&mut self) {
        self.hits.sort_by(SimilarityHit::rank_cmp);
    }

    /// Keep the first `k` hits.
    pub fn take_top_k(&mut self, k: usize) {
        self.hits.truncate(k);
    }

    /// Drop the query essay from the hits.
    pub fn exclude_query(&mut self) {
        let query = self.query;
        self.hits.retain(|hit| hit.essay != query);
    }

    /// Highest ranked hit.
    pub fn best_hit(&self) -> Option<&SimilarityHit> {
        self.hits.first()
    }

    /// Score of an essay, if it is among the hits.
    pub fn score_of(&self, essay: EssayId) -> Option<f64> {
        self.hits
            .iter()
            .find(|hit| hit.essay == essay)
            .map(|hit| hit.score)
    }
}
