//! Sparse term-weight vectors.
//!
//! Essays are represented over the corpus vocabulary, where almost every
//! coordinate is zero, so a vector stores only its non-zero `(TermId,
//! weight)` entries sorted by term id. Dot products are a merge join over
//! the two entry lists.
//!
//! # Examples
//!
//! ```
//! use federalist::vector::SparseVector;
//! use federalist::weighting::TermId;
//!
//! let a = SparseVector::from_entries(vec![(TermId(0), 1.0), (TermId(2), 1.0)]);
//! let b = SparseVector::from_entries(vec![(TermId(2), 3.0), (TermId(0), 3.0)]);
//! let c = SparseVector::from_entries(vec![(TermId(1), 5.0)]);
//!
//! assert!((a.cosine(&b).unwrap() - 1.0).abs() < 1e-12);
//! assert_eq!(a.cosine(&c), Some(0.0));
//! assert_eq!(a.cosine(&SparseVector::default()), None);
//! ```

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::weighting::TermId;

/// A sparse vector of term weights.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseVector {
    entries: Vec<(TermId, f64)>,
    norm: f64,
}

impl SparseVector {
    /// Create a vector from entries in any order.
    ///
    /// Entries for the same term are summed; zero weights are dropped.
    pub fn from_entries(mut entries: Vec<(TermId, f64)>) -> Self {
        entries.sort_by_key(|(term, _)| *term);
        let mut merged: Vec<(TermId, f64)> = Vec::with_capacity(entries.len());
        for (term, weight) in entries {
            match merged.last_mut() {
                Some((last, total)) if *last == term => *total += weight,
                _ => merged.push((term, weight)),
            }
        }
        merged.retain(|(_, weight)| *weight != 0.0);

        let norm = merged.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        SparseVector {
            entries: merged,
            norm,
        }
    }

    /// Weight of a term; zero when absent.
    pub fn get(&self, term: TermId) -> f64 {
        self.entries
            .binary_search_by_key(&term, |(t, _)| *t)
            .map(|index| self.entries[index].1)
            .unwrap_or(0.0)
    }

    /// Non-zero entries sorted by term id.
    pub fn entries(&self) -> &[(TermId, f64)] {
        &self.entries
    }

    /// Number of non-zero entries.
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 {
        self.norm
    }

    /// Whether every coordinate is zero.
    pub fn is_zero(&self) -> bool {
        self.norm == 0.0
    }

    /// Dot product with another vector.
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a_term, a_weight) = self.entries[i];
            let (b_term, b_weight) = other.entries[j];
            match a_term.cmp(&b_term) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    sum += a_weight * b_weight;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    /// Cosine similarity, or `None` when either vector is all zeros.
    ///
    /// The result is clamped to `[-1, 1]` against rounding.
    pub fn cosine(&self, other: &SparseVector) -> Option<f64> {
        if self.is_zero() || other.is_zero() {
            return None;
        }
        let cosine = self.dot(other) / (self.norm * other.norm);
        Some(cosine.clamp(-1.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(entries: &[(u32, f64)]) -> SparseVector {
        SparseVector::from_entries(entries.iter().map(|&(t, w)| (TermId(t), w)).collect())
    }

    #[test]
    fn test_from_entries_merges_and_drops_zeros() {
        let v = vector(&[(3, 1.0), (1, 2.0), (3, 1.5), (2, 0.0)]);
        assert_eq!(v.entries(), &[(TermId(1), 2.0), (TermId(3), 2.5)]);
        assert_eq!(v.nnz(), 2);
        assert_eq!(v.get(TermId(3)), 2.5);
        assert_eq!(v.get(TermId(2)), 0.0);
    }

    #[test]
    fn test_dot_and_norm() {
        let a = vector(&[(0, 3.0), (1, 4.0)]);
        let b = vector(&[(1, 2.0), (5, 7.0)]);
        assert_eq!(a.norm(), 5.0);
        assert_eq!(a.dot(&b), 8.0);
        assert_eq!(b.dot(&a), 8.0);
    }

    #[test]
    fn test_cosine() {
        let a = vector(&[(0, 1.0), (1, 1.0)]);
        let b = vector(&[(0, 1.0)]);
        let cosine = a.cosine(&b).unwrap();
        assert!((cosine - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
        assert_eq!(a.cosine(&b), b.cosine(&a));
    }

    #[test]
    fn test_zero_vector() {
        let zero = SparseVector::default();
        assert!(zero.is_zero());
        assert_eq!(zero.cosine(&zero), None);
        assert!(vector(&[(1, 0.0)]).is_zero());
    }
}
