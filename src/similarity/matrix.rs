//! Essay-by-essay similarity matrix.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::corpus::EssayId;
use crate::error::Result;

/// Symmetric matrix of pairwise similarities.
///
/// Cells involving an essay with an all-zero weight vector are `None`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimilarityMatrix {
    essays: Vec<EssayId>,
    cells: Vec<Option<f64>>,
}

impl SimilarityMatrix {
    /// Create a matrix from row-major cells over `essays`.
    pub(crate) fn new(essays: Vec<EssayId>, cells: Vec<Option<f64>>) -> Self {
        debug_assert_eq!(cells.len(), essays.len() * essays.len());
        SimilarityMatrix { essays, cells }
    }

    /// Number of essays (rows and columns).
    pub fn len(&self) -> usize {
        self.essays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.essays.is_empty()
    }

    pub fn essays(&self) -> &[EssayId] {
        &self.essays
    }

    fn index_of(&self, essay: EssayId) -> Option<usize> {
        self.essays.binary_search(&essay).ok()
    }

    /// Similarity of two essays; `None` when undefined or unknown.
    pub fn get(&self, a: EssayId, b: EssayId) -> Option<f64> {
        let (a, b) = (self.index_of(a)?, self.index_of(b)?);
        self.cells[a * self.len() + b]
    }

    /// The row of one essay.
    pub fn row(&self, essay: EssayId) -> Option<&[Option<f64>]> {
        let n = self.len();
        self.index_of(essay)
            .map(|index| &self.cells[index * n..(index + 1) * n])
    }

    /// Write the matrix as CSV: a header of essay labels, then one row per
    /// essay. Undefined cells are left empty.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv = csv::Writer::from_writer(writer);

        let mut header = Vec::with_capacity(self.len() + 1);
        header.push("essay".to_string());
        header.extend(self.essays.iter().map(EssayId::to_string));
        csv.write_record(&header)?;

        for (index, essay) in self.essays.iter().enumerate() {
            let row = &self.cells[index * self.len()..(index + 1) * self.len()];
            let mut record = Vec::with_capacity(row.len() + 1);
            record.push(essay.to_string());
            record.extend(
                row.iter()
                    .map(|cell| cell.map(|score| format!("{score:.6}")).unwrap_or_default()),
            );
            csv.write_record(&record)?;
        }

        csv.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_csv() {
        let essays = vec![EssayId::new(1).unwrap(), EssayId::new(2).unwrap()];
        let matrix = SimilarityMatrix::new(essays.clone(), vec![Some(1.0), Some(0.25), Some(0.25), None]);

        assert_eq!(matrix.get(essays[0], essays[1]), Some(0.25));
        assert_eq!(matrix.get(essays[1], essays[1]), None);
        assert_eq!(matrix.get(essays[0], EssayId::new(3).unwrap()), None);
        assert_eq!(matrix.row(essays[1]).unwrap(), &[Some(0.25), None]);

        let mut out = Vec::new();
        matrix.write_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "essay,Essay 1,Essay 2\nEssay 1,1.000000,0.250000\nEssay 2,0.250000,\n"
        );
    }
}
