use crate::matrix::error::{MatrixError, Result};
use crate::matrix::matrix_dense::MatrixDense;

/// Supplies cell values for bulk entry.
///
/// A source is expected to retry on its own side (e.g. re-prompting on bad
/// input) and only fail when no value can be produced at all.
pub trait CellSource {
    fn next_value(&mut self, row: usize, column: usize) -> Result<f64>;
}

impl<I: Iterator<Item = f64>> CellSource for I {
    fn next_value(&mut self, row: usize, column: usize) -> Result<f64> {
        self.next().ok_or_else(|| MatrixError::InvalidInput {
            row,
            column,
            reason: "no more values".into(),
        })
    }
}

impl MatrixDense {
    /// Fills the whole matrix row by row from `source`.
    pub fn enter(&mut self, source: &mut impl CellSource) -> Result<()> {
        self.enter_range(0, 0, self.rows - 1, self.columns - 1, source)
    }

    /// Fills the inclusive block `[i0, i1] x [j0, j1]` row by row from
    /// `source`.
    pub fn enter_range(
        &mut self,
        i0: usize,
        j0: usize,
        i1: usize,
        j1: usize,
        source: &mut impl CellSource,
    ) -> Result<()> {
        self.check_range(i0, j0, i1, j1)?;

        // cells written before a failure stay written
        self.determinant = None;
        for i in i0..=i1 {
            for j in j0..=j1 {
                self.cells[i][j] = source.next_value(i, j)?;
            }
        }
        Ok(())
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
