use log::{debug, trace};
use num_traits::{One, Zero};

use crate::matrix::error::{MatrixError, Result};
use crate::matrix::matrix::Matrix;
use crate::matrix::matrix_dense::MatrixDense;

/// Elementary row operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOp {
    /// Exchanges `row0` and `row1`. Negates the determinant.
    Swap,
    /// Multiplies `row0` by `multiple`, and so the determinant.
    Scale,
    /// Adds `multiple` times `row0` to `row1`. The determinant is unchanged.
    AddMultiple,
}

impl MatrixDense {
    pub fn row_operation(
        &mut self,
        operation: RowOp,
        row0: usize,
        row1: usize,
        multiple: f64,
    ) -> Result<()> {
        for row in [row0, row1] {
            if row >= self.rows {
                return Err(MatrixError::RowOutOfBounds {
                    row,
                    rows: self.rows,
                });
            }
        }

        match operation {
            RowOp::Swap => self.swap_rows(row0, row1),
            RowOp::Scale => self.scale_row(row0, multiple),
            RowOp::AddMultiple => self.add_row_multiple(row0, row1, multiple),
        }
        Ok(())
    }

    fn swap_rows(&mut self, row0: usize, row1: usize) {
        if row0 == row1 {
            return;
        }
        self.cells.swap(row0, row1);
        if let Some(det) = self.determinant.as_mut() {
            *det = -*det;
        }
    }

    fn scale_row(&mut self, row: usize, multiple: f64) {
        for x in self.cells[row].iter_mut() {
            *x *= multiple;
        }
        if let Some(det) = self.determinant.as_mut() {
            *det *= multiple;
        }
    }

    fn add_row_multiple(&mut self, source: usize, target: usize, multiple: f64) {
        for j in 0..self.columns {
            let x = self.cells[source][j] * multiple;
            self.cells[target][j] += x;
        }
    }

    // Clears `cells[row][col]` using the pivot at (`pivot_row`, `col`).
    fn eliminate(&mut self, pivot_row: usize, row: usize, col: usize) {
        let entry = self.cells[row][col];
        if entry.is_zero() {
            return;
        }
        let pivot = self.cells[pivot_row][col];
        self.add_row_multiple(pivot_row, row, -entry / pivot);
        self.cells[row][col] = f64::zero();
    }

    /// Reduces the matrix to row echelon form with partial pivoting.
    ///
    /// For a square matrix the determinant is recomputed along the way as the
    /// product of the pivots, with a sign flip for every row swap.
    pub fn echelon(&mut self) -> &mut Self {
        if self.is_square() {
            self.determinant = Some(f64::one());
        }

        let mut pivot_row = 0;
        for col in 0..self.columns {
            if pivot_row >= self.rows {
                break;
            }

            let found = (pivot_row..self.rows).find(|&r| !self.cells[r][col].is_zero());
            let Some(found) = found else {
                if let Some(det) = self.determinant.as_mut() {
                    *det = f64::zero();
                }
                continue;
            };

            self.swap_rows(found, pivot_row);
            for r in pivot_row + 1..self.rows {
                self.eliminate(pivot_row, r, col);
            }

            let pivot = self.cells[pivot_row][col];
            if let Some(det) = self.determinant.as_mut() {
                *det *= pivot;
            }
            pivot_row += 1;
        }

        trace!(
            "echelon: {}x{} => {} pivots.",
            self.rows,
            self.columns,
            pivot_row
        );
        self
    }

    /// Reduces the matrix to reduced row echelon form. Pivots keep their
    /// values, only the entries above them are cleared.
    pub fn reduced_echelon(&mut self) -> &mut Self {
        self.echelon();

        let mut column_limit = self.columns;
        for row in (0..self.rows).rev() {
            let Some(pivot_col) = self.leading_column(row, column_limit) else {
                continue;
            };
            column_limit = pivot_col;
            for above in 0..row {
                self.eliminate(row, above, pivot_col);
            }
        }
        self
    }

    /// Transposes in place. The determinant cache is kept as is.
    pub fn transpose(&mut self) -> &mut Self {
        let (rows, columns) = (self.rows, self.columns);
        let short_side = rows.min(columns);
        let tall_side = rows.max(columns);

        // grow to a tall_side x tall_side working shape
        for row in self.cells.iter_mut() {
            row.resize(tall_side, f64::zero());
        }
        self.cells
            .resize_with(tall_side, || vec![f64::zero(); tall_side]);

        for i in 0..short_side {
            for j in i + 1..tall_side {
                let (upper, lower) = self.cells.split_at_mut(j);
                std::mem::swap(&mut upper[i][j], &mut lower[0][i]);
            }
        }

        self.cells.truncate(columns);
        for row in self.cells.iter_mut() {
            row.truncate(rows);
        }
        self.rows = columns;
        self.columns = rows;

        let keep = self.separators.partition_point(|&s| s + 1 < self.columns);
        if keep < self.separators.len() {
            debug!(
                "transpose drops {} separators",
                self.separators.len() - keep
            );
            self.separators.truncate(keep);
        }
        self
    }

    /// Recomputes the determinant cache. Clears it for a non-square matrix.
    pub fn calculate_determinant(&mut self) {
        if !self.is_square() {
            self.determinant = None;
            return;
        }

        let det = match self.rows {
            1 => self.at(0, 0),
            2 => self.at(0, 0) * self.at(1, 1) - self.at(0, 1) * self.at(1, 0),
            _ => {
                let mut echelon_formed = self.clone();
                echelon_formed.echelon();
                echelon_formed.determinant.unwrap_or_else(f64::zero)
            }
        };
        self.determinant = Some(det);
    }

    /// Returns the determinant, computing and caching it if unknown.
    pub fn determinant(&mut self) -> Result<f64> {
        if self.determinant.is_none() {
            self.calculate_determinant();
        }
        self.determinant.ok_or(MatrixError::NoDeterminant {
            rows: self.rows,
            columns: self.columns,
        })
    }

    /// Replaces the matrix with its inverse by Gauss-Jordan elimination on
    /// `[A | I]`. The inverse gets `1 / det(A)` as its determinant.
    pub fn invert(&mut self) -> Result<&mut Self> {
        self.require_square()?;
        let determinant = self.determinant()?;
        if determinant.is_zero() {
            return Err(MatrixError::SingularMatrix);
        }
        debug!("invert: {}x{}, det = {}", self.rows, self.columns, determinant);

        let seam = self.separators.len();
        let mut augmented = self.clone();
        augmented.augment(&MatrixDense::identity(self.rows)?)?;
        augmented.reduced_echelon();

        for i in 0..self.rows {
            let diagonal = augmented.cells[i][i];
            if diagonal.is_zero() {
                return Err(MatrixError::SingularMatrix);
            }
            augmented.scale_row(i, diagonal.recip());
        }

        let mut inverse = augmented.unaugment(seam)?;
        inverse.determinant = Some(determinant.recip());
        *self = inverse;
        Ok(self)
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
