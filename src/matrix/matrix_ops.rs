use itertools::Itertools;
use std::ops;

use crate::matrix::error::{MatrixError, Result};
use crate::matrix::matrix::Matrix;
use crate::matrix::matrix_dense::MatrixDense;

impl MatrixDense {
    fn map_cells(&self, f: impl Fn(f64) -> f64) -> MatrixDense {
        MatrixDense::from_cells(
            self.cells
                .iter()
                .map(|row| row.iter().map(|&x| f(x)).collect())
                .collect(),
        )
    }

    pub fn add_in_place(&mut self, rhs: &MatrixDense) -> Result<&mut Self> {
        *self = (&*self + rhs)?;
        Ok(self)
    }

    pub fn multiply_in_place(&mut self, rhs: &MatrixDense) -> Result<&mut Self> {
        *self = (&*self * rhs)?;
        Ok(self)
    }
}

impl ops::Neg for &MatrixDense {
    type Output = MatrixDense;

    fn neg(self) -> MatrixDense {
        self.map_cells(|x| -x)
    }
}

impl ops::Add<&MatrixDense> for &MatrixDense {
    type Output = Result<MatrixDense>;

    fn add(self, rhs: &MatrixDense) -> Result<MatrixDense> {
        if self.rows != rhs.rows || self.columns != rhs.columns {
            return Err(MatrixError::ShapeMismatch {
                left: (self.rows, self.columns),
                right: (rhs.rows, rhs.columns),
            });
        }

        Ok(MatrixDense::from_cells(
            self.cells
                .iter()
                .zip_eq(rhs.cells.iter())
                .map(|(a, b)| a.iter().zip_eq(b.iter()).map(|(x, y)| x + y).collect())
                .collect(),
        ))
    }
}

impl ops::Sub<&MatrixDense> for &MatrixDense {
    type Output = Result<MatrixDense>;

    fn sub(self, rhs: &MatrixDense) -> Result<MatrixDense> {
        self + &(-rhs)
    }
}

impl ops::Mul<&MatrixDense> for &MatrixDense {
    type Output = Result<MatrixDense>;

    fn mul(self, rhs: &MatrixDense) -> Result<MatrixDense> {
        if self.columns != rhs.rows {
            return Err(MatrixError::DimensionMismatch {
                left_columns: self.columns,
                right_rows: rhs.rows,
            });
        }

        let mut result = MatrixDense::from_cells(
            (0..self.rows)
                .map(|i| {
                    (0..rhs.columns)
                        .map(|j| (0..self.columns).map(|k| self.at(i, k) * rhs.at(k, j)).sum())
                        .collect()
                })
                .collect(),
        );

        // det(AB) = det(A) det(B) for square factors of the same order
        if self.is_square() && rhs.is_square() {
            if let (Some(a), Some(b)) = (self.determinant, rhs.determinant) {
                result.determinant = Some(a * b);
            }
        }
        Ok(result)
    }
}

impl ops::Mul<f64> for &MatrixDense {
    type Output = MatrixDense;

    fn mul(self, constant: f64) -> MatrixDense {
        let mut result = self.map_cells(|x| x * constant);
        result.separators = self.separators.clone();
        result.determinant = self
            .determinant
            .map(|det| scaled_determinant(det, constant, self.rows));
        result
    }
}

// det(cA) = c^n det(A) for A of order n
fn scaled_determinant(det: f64, constant: f64, order: usize) -> f64 {
    constant.powf(order as f64) * det
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
