use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatrixError {
    #[error("number of rows and columns must be positive, got {rows}x{columns}")]
    InvalidDimension { rows: usize, columns: usize },

    #[error("invalid range: rows {i0}..={i1}, columns {j0}..={j1}")]
    InvalidRange {
        i0: usize,
        j0: usize,
        i1: usize,
        j1: usize,
    },

    #[error("cell ({row}, {column}) is outside of a {rows}x{columns} matrix")]
    OutOfBounds {
        row: usize,
        column: usize,
        rows: usize,
        columns: usize,
    },

    #[error("row {row} is outside of a matrix with {rows} rows")]
    RowOutOfBounds { row: usize, rows: usize },

    #[error("matrix is not square ({rows}x{columns})")]
    NotSquare { rows: usize, columns: usize },

    #[error("matrix with zero determinant has no inverse")]
    SingularMatrix,

    #[error("number of rows doesn't match: {left} and {right}")]
    RowMismatch { left: usize, right: usize },

    #[error("matrix is not augmented")]
    NoAugmentation,

    #[error("augmentation index {index} is out of bounds ({count} separators)")]
    SeparatorOutOfBounds { index: usize, count: usize },

    #[error("separator after column {index} is invalid for a matrix with {columns} columns")]
    InvalidSeparator { index: usize, columns: usize },

    #[error("{rows}x{columns} matrix has no determinant")]
    NoDeterminant { rows: usize, columns: usize },

    #[error("shapes not compatible: {left:?} and {right:?}")]
    ShapeMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("columns of the left matrix ({left_columns}) differ from rows of the right one ({right_rows})")]
    DimensionMismatch {
        left_columns: usize,
        right_rows: usize,
    },

    #[error("invalid input for cell ({row}, {column}): {reason}")]
    InvalidInput {
        row: usize,
        column: usize,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, MatrixError>;
