use log::debug;
use num_traits::{One, Zero};

use crate::matrix::error::{MatrixError, Result};
use crate::matrix::matrix::Matrix;

/// Dense `f64` matrix that carries an optional cached determinant and a
/// sorted list of augmentation separators.
///
/// A separator `s` marks a seam right after column `s`, so `[A | I]` built by
/// [`MatrixDense::augment`] keeps track of where `A` ends. Separators always
/// satisfy `s < columns - 1`.
///
/// The determinant cache is `None` when the value is unknown (or when the
/// matrix is not square). Most mutations clear it. Row swaps and row scaling
/// update it in place, adding a multiple of a row leaves it untouched.
#[derive(Debug, Clone)]
pub struct MatrixDense {
    pub(crate) rows: usize,
    pub(crate) columns: usize,
    pub(crate) cells: Vec<Vec<f64>>,
    pub(crate) determinant: Option<f64>,
    pub(crate) separators: Vec<usize>,
}

impl MatrixDense {
    /// Zero matrix of `rows` x `columns`. The determinant of a square zero
    /// matrix is known to be zero.
    pub fn new(rows: usize, columns: usize) -> Result<MatrixDense> {
        if rows == 0 || columns == 0 {
            return Err(MatrixError::InvalidDimension { rows, columns });
        }

        Ok(MatrixDense {
            rows,
            columns,
            cells: vec![vec![f64::zero(); columns]; rows],
            determinant: (rows == columns).then(f64::zero),
            separators: Vec::new(),
        })
    }

    pub fn square(length: usize) -> Result<MatrixDense> {
        MatrixDense::new(length, length)
    }

    /// Copies the inclusive block `[i0, i1] x [j0, j1]`.
    ///
    /// Separators inside the block are carried over, shifted by `-j0`. The
    /// copy never has a determinant cache.
    pub fn submatrix(&self, i0: usize, j0: usize, i1: usize, j1: usize) -> Result<MatrixDense> {
        self.check_range(i0, j0, i1, j1)?;

        Ok(MatrixDense {
            rows: i1 - i0 + 1,
            columns: j1 - j0 + 1,
            cells: self.cells[i0..=i1]
                .iter()
                .map(|row| row[j0..=j1].to_vec())
                .collect(),
            determinant: None,
            separators: self
                .separators
                .iter()
                .filter(|&&s| s >= j0 && s < j1)
                .map(|s| s - j0)
                .collect(),
        })
    }

    pub(crate) fn from_cells(cells: Vec<Vec<f64>>) -> MatrixDense {
        MatrixDense {
            rows: cells.len(),
            columns: cells.first().map_or(0, |row| row.len()),
            cells,
            determinant: None,
            separators: Vec::new(),
        }
    }

    pub(crate) fn check_range(&self, i0: usize, j0: usize, i1: usize, j1: usize) -> Result<()> {
        if i0 > i1 || j0 > j1 {
            return Err(MatrixError::InvalidRange { i0, j0, i1, j1 });
        }
        if i1 >= self.rows || j1 >= self.columns {
            return Err(MatrixError::OutOfBounds {
                row: i1,
                column: j1,
                rows: self.rows,
                columns: self.columns,
            });
        }
        Ok(())
    }

    fn check_cell(&self, row: usize, column: usize) -> Result<()> {
        if row >= self.rows || column >= self.columns {
            return Err(MatrixError::OutOfBounds {
                row,
                column,
                rows: self.rows,
                columns: self.columns,
            });
        }
        Ok(())
    }

    pub(crate) fn require_square(&self) -> Result<()> {
        if !self.is_square() {
            return Err(MatrixError::NotSquare {
                rows: self.rows,
                columns: self.columns,
            });
        }
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.columns
    }

    pub fn separators(&self) -> &[usize] {
        &self.separators
    }

    /// Cached determinant, without computing it.
    pub fn determinant_cache(&self) -> Option<f64> {
        self.determinant
    }

    pub fn cell(&self, row: usize, column: usize) -> Result<f64> {
        self.check_cell(row, column)?;
        Ok(self.cells[row][column])
    }

    pub fn set_cell(&mut self, row: usize, column: usize, value: f64) -> Result<()> {
        self.check_cell(row, column)?;
        self.cells[row][column] = value;
        self.determinant = None;
        Ok(())
    }

    pub fn set_identity(&mut self) -> Result<()> {
        self.require_square()?;
        for (i, row) in self.cells.iter_mut().enumerate() {
            row.fill(f64::zero());
            row[i] = f64::one();
        }
        self.determinant = Some(f64::one());
        Ok(())
    }

    /// Sets every cell to `constant`. A constant square matrix of order two or
    /// more is singular, the 1x1 one has the constant as determinant.
    pub fn fill(&mut self, constant: f64) {
        for row in self.cells.iter_mut() {
            row.fill(constant);
        }
        if self.is_square() {
            self.determinant = Some(if self.rows == 1 { constant } else { f64::zero() });
        }
    }

    /// Reshapes in place. Surviving cells keep their values, new cells are
    /// zero. Separators that no longer fit are dropped.
    pub fn resize(&mut self, rows: usize, columns: usize) -> Result<()> {
        if rows == 0 || columns == 0 {
            return Err(MatrixError::InvalidDimension { rows, columns });
        }
        if rows == self.rows && columns == self.columns {
            return Ok(());
        }

        if columns < self.columns {
            let keep = self.separators.partition_point(|&s| s < columns - 1);
            if keep < self.separators.len() {
                debug!(
                    "resize to {rows}x{columns} drops {} separators",
                    self.separators.len() - keep
                );
            }
            self.separators.truncate(keep);
        }

        self.cells.resize_with(rows, || vec![f64::zero(); columns]);
        for row in self.cells.iter_mut() {
            row.resize(columns, f64::zero());
        }
        self.rows = rows;
        self.columns = columns;
        self.determinant = None;
        Ok(())
    }

    // --------------------------------------------------
    //                  AUGMENTATION
    // --------------------------------------------------

    /// Appends the columns of `other`, placing a separator after the current
    /// last column.
    pub fn augment(&mut self, other: &MatrixDense) -> Result<()> {
        if self.rows != other.rows {
            return Err(MatrixError::RowMismatch {
                left: self.rows,
                right: other.rows,
            });
        }

        let offset = self.columns;
        self.separators.push(offset - 1);
        self.separators
            .extend(other.separators.iter().map(|s| s + offset));
        for (row, tail) in self.cells.iter_mut().zip(other.cells.iter()) {
            row.extend_from_slice(tail);
        }
        self.columns += other.columns;
        self.determinant = None;
        Ok(())
    }

    /// Splits the matrix at separator `index`.
    ///
    /// Returns the block that starts right after the separator and ends at the
    /// next one (or at the last column). `self` keeps only the columns before
    /// that block.
    pub fn unaugment(&mut self, index: usize) -> Result<MatrixDense> {
        if self.separators.is_empty() {
            return Err(MatrixError::NoAugmentation);
        }
        if index >= self.separators.len() {
            return Err(MatrixError::SeparatorOutOfBounds {
                index,
                count: self.separators.len(),
            });
        }

        let start = self.separators[index] + 1;
        let end = self
            .separators
            .get(index + 1)
            .copied()
            .unwrap_or(self.columns - 1);

        let block = self.submatrix(0, start, self.rows - 1, end)?;
        *self = self.submatrix(0, 0, self.rows - 1, start - 1)?;
        Ok(block)
    }

    pub fn add_separator(&mut self, index: usize) -> Result<()> {
        if index >= self.columns - 1 {
            return Err(MatrixError::InvalidSeparator {
                index,
                columns: self.columns,
            });
        }
        if let Err(position) = self.separators.binary_search(&index) {
            self.separators.insert(position, index);
            self.determinant = None;
        }
        Ok(())
    }

    pub fn remove_separator(&mut self, index: usize) -> bool {
        match self.separators.binary_search(&index) {
            Ok(position) => {
                self.separators.remove(position);
                self.determinant = None;
                true
            }
            Err(_) => false,
        }
    }

    pub fn remove_separators(&mut self) -> bool {
        if self.separators.is_empty() {
            return false;
        }
        self.separators.clear();
        self.determinant = None;
        true
    }

    /// Index of the leftmost nonzero entry of `row` among the first `limit`
    /// columns.
    pub(crate) fn leading_column(&self, row: usize, limit: usize) -> Option<usize> {
        self.cells[row][..limit].iter().position(|x| !x.is_zero())
    }
}

impl Default for MatrixDense {
    fn default() -> Self {
        MatrixDense {
            rows: 1,
            columns: 1,
            cells: vec![vec![f64::zero()]],
            determinant: Some(f64::zero()),
            separators: Vec::new(),
        }
    }
}

// The determinant cache is derived state and takes no part in equality.
impl PartialEq for MatrixDense {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows
            && self.columns == other.columns
            && self.separators == other.separators
            && self.cells == other.cells
    }
}

impl Matrix<f64> for MatrixDense {
    fn from_list(lines: Vec<Vec<f64>>) -> Result<Self> {
        let cols = lines.iter().map(|l| l.len()).max().unwrap_or(0);
        let rows = lines.len();
        if rows == 0 || cols == 0 {
            return Err(MatrixError::InvalidDimension {
                rows,
                columns: cols,
            });
        }

        Ok(MatrixDense::from_cells(
            lines
                .into_iter()
                .map(|mut l| {
                    l.resize(cols, f64::zero());
                    l
                })
                .collect(),
        ))
    }

    fn to_list(&self) -> Vec<Vec<f64>> {
        self.cells.clone()
    }

    fn is_echelon(&self) -> bool {
        let mut last_pivot_col = None;

        for row in 0..self.rows {
            match self.leading_column(row, self.columns) {
                None => {
                    return (row + 1..self.rows)
                        .all(|r| self.leading_column(r, self.columns).is_none());
                }
                Some(pivot_col) => {
                    if let Some(last) = last_pivot_col {
                        if pivot_col <= last {
                            return false;
                        }
                    }
                    last_pivot_col = Some(pivot_col);
                }
            }
        }
        true
    }

    fn is_rref(&self) -> bool {
        if !self.is_echelon() {
            return false;
        }

        (0..self.rows).all(|row| match self.leading_column(row, self.columns) {
            None => true,
            Some(pivot_col) => (0..self.rows)
                .all(|r| r == row || self.cells[r][pivot_col].is_zero()),
        })
    }

    fn identity(n: usize) -> Result<Self> {
        let mut identity = MatrixDense::square(n)?;
        identity.set_identity()?;
        Ok(identity)
    }

    #[inline(always)]
    fn at(&self, row: usize, col: usize) -> f64 {
        self.cells[row][col]
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MatrixDense {
        MatrixDense::from_list(vec![
            vec![1., 2., 3., 4.],
            vec![5., 6., 7., 8.],
            vec![9., 10., 11., 12.],
        ])
        .unwrap()
    }

    #[test]
    fn test_construction() {
        let m = MatrixDense::square(3).unwrap();
        assert_eq!(m.rows(), 3);
        assert_eq!(m.columns(), 3);
        assert_eq!(m.determinant_cache(), Some(0.));
        assert!(m.to_list().iter().flatten().all(|x| *x == 0.));

        let m = MatrixDense::new(2, 3).unwrap();
        assert_eq!(m.determinant_cache(), None);
        assert_eq!(m.to_list(), vec![vec![0.; 3]; 2]);

        assert_eq!(
            MatrixDense::square(0),
            Err(MatrixError::InvalidDimension {
                rows: 0,
                columns: 0
            })
        );
        assert!(MatrixDense::new(2, 0).is_err());
        assert!(MatrixDense::from_list(vec![]).is_err());
        assert!(MatrixDense::from_list(vec![vec![], vec![]]).is_err());

        let default = MatrixDense::default();
        assert_eq!(default, MatrixDense::square(1).unwrap());
        assert_eq!(default.determinant_cache(), Some(0.));
    }

    #[test]
    fn test_from_list_pads_rows() {
        let m = MatrixDense::from_list(vec![vec![1.], vec![2., 3.]]).unwrap();
        assert_eq!(m.to_list(), vec![vec![1., 0.], vec![2., 3.]]);
        assert_eq!(m.determinant_cache(), None);
    }

    #[test]
    fn test_copy_is_independent() {
        let mut m = MatrixDense::identity(2).unwrap();
        m.add_separator(0).unwrap();
        let mut copy = m.clone();
        assert_eq!(copy.determinant_cache(), m.determinant_cache());
        assert_eq!(copy.separators(), m.separators());

        copy.set_cell(0, 1, 5.).unwrap();
        assert_eq!(m.at(0, 1), 0.);
        assert_eq!(copy.at(0, 1), 5.);
    }

    #[test]
    fn test_submatrix() {
        let mut m = sample();
        m.add_separator(0).unwrap();
        m.add_separator(1).unwrap();
        m.add_separator(2).unwrap();

        let sub = m.submatrix(1, 1, 2, 3).unwrap();
        assert_eq!(sub.to_list(), vec![vec![6., 7., 8.], vec![10., 11., 12.]]);
        // separators 1 and 2 fall inside [1, 3), rebased to 0 and 1
        assert_eq!(sub.separators(), &[0, 1]);
        assert_eq!(sub.determinant_cache(), None);

        let square = MatrixDense::identity(3).unwrap();
        assert_eq!(square.submatrix(0, 0, 1, 1).unwrap().determinant_cache(), None);

        assert_eq!(
            m.submatrix(2, 0, 1, 1),
            Err(MatrixError::InvalidRange {
                i0: 2,
                j0: 0,
                i1: 1,
                j1: 1
            })
        );
        assert!(matches!(
            m.submatrix(0, 0, 3, 1),
            Err(MatrixError::OutOfBounds { .. })
        ));
        assert!(matches!(
            m.submatrix(0, 0, 1, 4),
            Err(MatrixError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_cell_access() {
        let mut m = sample();
        assert_eq!(m.cell(2, 3), Ok(12.));
        assert!(matches!(m.cell(3, 0), Err(MatrixError::OutOfBounds { .. })));
        assert!(m.set_cell(0, 4, 1.).is_err());

        let mut id = MatrixDense::identity(2).unwrap();
        id.set_cell(1, 0, 3.).unwrap();
        assert_eq!(id.determinant_cache(), None);
        m.set_cell(1, 1, -1.).unwrap();
        assert_eq!(m.at(1, 1), -1.);
    }

    #[test]
    fn test_identity_and_fill() {
        let mut m = MatrixDense::new(2, 3).unwrap();
        assert_eq!(
            m.set_identity(),
            Err(MatrixError::NotSquare {
                rows: 2,
                columns: 3
            })
        );

        let mut m = MatrixDense::from_list(vec![vec![4., 4.], vec![1., 2.]]).unwrap();
        m.set_identity().unwrap();
        assert_eq!(m.to_list(), vec![vec![1., 0.], vec![0., 1.]]);
        assert_eq!(m.determinant_cache(), Some(1.));

        m.fill(7.);
        assert_eq!(m.to_list(), vec![vec![7., 7.], vec![7., 7.]]);
        assert_eq!(m.determinant_cache(), Some(0.));

        let mut one = MatrixDense::square(1).unwrap();
        one.fill(7.);
        assert_eq!(one.determinant_cache(), Some(7.));

        let mut rect = MatrixDense::new(2, 3).unwrap();
        rect.fill(1.);
        assert_eq!(rect.determinant_cache(), None);
    }

    #[test]
    fn test_resize() {
        let mut m = sample();
        m.add_separator(0).unwrap();
        m.add_separator(2).unwrap();

        m.resize(3, 4).unwrap();
        assert_eq!(m, sample_with(&[0, 2]));

        m.resize(2, 3).unwrap();
        assert_eq!(m.to_list(), vec![vec![1., 2., 3.], vec![5., 6., 7.]]);
        assert_eq!(m.separators(), &[0]);

        m.resize(3, 4).unwrap();
        assert_eq!(
            m.to_list(),
            vec![
                vec![1., 2., 3., 0.],
                vec![5., 6., 7., 0.],
                vec![0., 0., 0., 0.]
            ]
        );
        assert_eq!(m.separators(), &[0]);

        let mut id = MatrixDense::identity(2).unwrap();
        id.resize(3, 3).unwrap();
        assert_eq!(id.determinant_cache(), None);
        assert!(id.resize(0, 3).is_err());
    }

    fn sample_with(separators: &[usize]) -> MatrixDense {
        let mut m = sample();
        for &s in separators {
            m.add_separator(s).unwrap();
        }
        m
    }

    #[test]
    fn test_augment_unaugment() {
        let original = MatrixDense::from_list(vec![vec![1., 2.], vec![3., 4.]]).unwrap();
        let tail = MatrixDense::from_list(vec![vec![5.], vec![6.]]).unwrap();

        let mut m = original.clone();
        m.augment(&tail).unwrap();
        assert_eq!(m.to_list(), vec![vec![1., 2., 5.], vec![3., 4., 6.]]);
        assert_eq!(m.separators(), &[1]);
        assert_eq!(m.determinant_cache(), None);

        let block = m.unaugment(0).unwrap();
        assert_eq!(m, original);
        assert_eq!(block, tail);

        let three_rows = MatrixDense::new(3, 1).unwrap();
        assert_eq!(
            m.augment(&three_rows),
            Err(MatrixError::RowMismatch { left: 2, right: 3 })
        );
        assert_eq!(m.unaugment(0), Err(MatrixError::NoAugmentation));
    }

    #[test]
    fn test_augment_keeps_nested_separators() {
        let mut left = MatrixDense::new(2, 3).unwrap();
        left.add_separator(0).unwrap();
        let mut right = MatrixDense::new(2, 4).unwrap();
        right.add_separator(1).unwrap();

        let mut m = left.clone();
        m.augment(&right).unwrap();
        assert_eq!(m.columns(), 7);
        assert_eq!(m.separators(), &[0, 2, 4]);

        assert_eq!(
            m.unaugment(3),
            Err(MatrixError::SeparatorOutOfBounds { index: 3, count: 3 })
        );

        // the block after separator 2 runs up to the next one
        let mut split = m.clone();
        let block = split.unaugment(1).unwrap();
        assert_eq!(block.columns(), 2);
        assert_eq!(block.separators(), &[] as &[usize]);
        assert_eq!(split, left);

        let mut last = m.clone();
        let block = last.unaugment(2).unwrap();
        assert_eq!(block.columns(), 2);
        assert_eq!(last.columns(), 5);
        assert_eq!(last.separators(), &[0, 2]);
    }

    #[test]
    fn test_separators() {
        let mut m = sample();
        m.add_separator(2).unwrap();
        m.add_separator(0).unwrap();
        m.add_separator(2).unwrap();
        assert_eq!(m.separators(), &[0, 2]);
        assert_eq!(
            m.add_separator(3),
            Err(MatrixError::InvalidSeparator {
                index: 3,
                columns: 4
            })
        );
        assert_eq!(
            m.add_separator(usize::MAX),
            Err(MatrixError::InvalidSeparator {
                index: usize::MAX,
                columns: 4
            })
        );

        assert!(m.remove_separator(2));
        assert!(!m.remove_separator(2));
        assert_eq!(m.separators(), &[0]);
        assert!(m.remove_separators());
        assert!(!m.remove_separators());

        let mut id = MatrixDense::identity(2).unwrap();
        id.add_separator(0).unwrap();
        assert_eq!(id.determinant_cache(), None);
    }

    #[test]
    fn test_echelon_checks() {
        let m = MatrixDense::from_list(vec![vec![1., 2., 0.], vec![0., 0., 3.]]).unwrap();
        assert!(m.is_echelon());
        assert!(m.is_rref());

        let m = MatrixDense::from_list(vec![vec![1., 2., 1.], vec![0., 0., 3.]]).unwrap();
        assert!(m.is_echelon());
        assert!(!m.is_rref());

        let m = MatrixDense::from_list(vec![vec![0., 0.], vec![1., 0.]]).unwrap();
        assert!(!m.is_echelon());
    }
}
