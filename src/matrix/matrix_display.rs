use std::fmt;

use crate::matrix::error::Result;
use crate::matrix::matrix_dense::MatrixDense;

/// Number of digits after the decimal point when the formatter gives none.
pub const DEFAULT_PRECISION: usize = 3;

/// A checked rectangular view of a matrix, ready to be displayed.
pub struct RangeDisplay<'a> {
    matrix: &'a MatrixDense,
    i0: usize,
    j0: usize,
    i1: usize,
    j1: usize,
}

impl MatrixDense {
    pub fn display_range(
        &self,
        i0: usize,
        j0: usize,
        i1: usize,
        j1: usize,
    ) -> Result<RangeDisplay<'_>> {
        self.check_range(i0, j0, i1, j1)?;
        Ok(RangeDisplay {
            matrix: self,
            i0,
            j0,
            i1,
            j1,
        })
    }

    fn write_block(
        &self,
        f: &mut fmt::Formatter<'_>,
        (i0, j0): (usize, usize),
        (i1, j1): (usize, usize),
    ) -> fmt::Result {
        let precision = f.precision().unwrap_or(DEFAULT_PRECISION);

        for row in &self.cells[i0..=i1] {
            write!(f, "[ ")?;
            for (j, value) in row.iter().enumerate().take(j1 + 1).skip(j0) {
                if !value.is_sign_negative() {
                    write!(f, " ")?;
                }
                write!(f, "{:.*e} ", precision, value)?;
                if j != j1 && self.separators.binary_search(&j).is_ok() {
                    write!(f, "| ")?;
                }
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}

impl fmt::Display for MatrixDense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_block(f, (0, 0), (self.rows - 1, self.columns - 1))
    }
}

impl fmt::Display for RangeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.matrix
            .write_block(f, (self.i0, self.j0), (self.i1, self.j1))
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
