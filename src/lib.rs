pub mod matrix {
    pub mod error;
    pub mod matrix;
    pub mod matrix_dense;
    pub mod matrix_display;
    pub mod matrix_entry;
    pub mod matrix_ops;
    #[cfg(feature = "python")]
    pub mod matrix_py;
    pub mod matrix_reduce;
}

pub use matrix::error::{MatrixError, Result};
pub use matrix::matrix::Matrix;
pub use matrix::matrix_dense::MatrixDense;
pub use matrix::matrix_display::{RangeDisplay, DEFAULT_PRECISION};
pub use matrix::matrix_entry::CellSource;
pub use matrix::matrix_reduce::RowOp;

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// A Python module implemented in Rust.
#[cfg(feature = "python")]
#[pymodule]
fn matrix_engine(_py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<matrix::matrix_py::PyMatrix>()?;
    Ok(())
}
