use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyType;

use crate::matrix::error::MatrixError;
use crate::matrix::matrix::Matrix;
use crate::matrix::matrix_dense::MatrixDense;

impl From<MatrixError> for PyErr {
    fn from(error: MatrixError) -> PyErr {
        PyValueError::new_err(error.to_string())
    }
}

#[derive(Debug, Clone)]
#[pyclass(name = "Matrix")]
pub struct PyMatrix {
    pub inner: MatrixDense,
}

#[pymethods]
impl PyMatrix {
    #[classmethod]
    pub fn from_list(_cls: &Bound<PyType>, lines: Vec<Vec<f64>>) -> PyResult<Self> {
        Ok(PyMatrix {
            inner: MatrixDense::from_list(lines)?,
        })
    }

    #[classmethod]
    pub fn zeros(_cls: &Bound<PyType>, rows: usize, cols: usize) -> PyResult<Self> {
        Ok(PyMatrix {
            inner: MatrixDense::new(rows, cols)?,
        })
    }

    #[classmethod]
    pub fn identity(_cls: &Bound<PyType>, n: usize) -> PyResult<Self> {
        Ok(PyMatrix {
            inner: MatrixDense::identity(n)?,
        })
    }

    pub fn to_list(&self) -> Vec<Vec<f64>> {
        self.inner.to_list()
    }

    #[getter]
    pub fn rows(&self) -> usize {
        self.inner.rows()
    }

    #[getter]
    pub fn cols(&self) -> usize {
        self.inner.columns()
    }

    #[getter]
    #[allow(non_snake_case)]
    pub fn T(&self) -> PyMatrix {
        let mut inner = self.inner.clone();
        inner.transpose();
        PyMatrix { inner }
    }

    pub fn determinant(&mut self) -> PyResult<f64> {
        Ok(self.inner.determinant()?)
    }

    pub fn echelon(&mut self) {
        self.inner.echelon();
    }

    pub fn reduced_echelon(&mut self) {
        self.inner.reduced_echelon();
    }

    pub fn transpose(&mut self) {
        self.inner.transpose();
    }

    pub fn invert(&mut self) -> PyResult<()> {
        self.inner.invert()?;
        Ok(())
    }

    pub fn augment(&mut self, other: &PyMatrix) -> PyResult<()> {
        Ok(self.inner.augment(&other.inner)?)
    }

    pub fn unaugment(&mut self, index: usize) -> PyResult<PyMatrix> {
        Ok(PyMatrix {
            inner: self.inner.unaugment(index)?,
        })
    }

    pub fn __add__(&self, rhs: &PyMatrix) -> PyResult<PyMatrix> {
        Ok(PyMatrix {
            inner: (&self.inner + &rhs.inner)?,
        })
    }

    pub fn __sub__(&self, rhs: &PyMatrix) -> PyResult<PyMatrix> {
        Ok(PyMatrix {
            inner: (&self.inner - &rhs.inner)?,
        })
    }

    pub fn __mul__(&self, rhs: &PyMatrix) -> PyResult<PyMatrix> {
        Ok(PyMatrix {
            inner: (&self.inner * &rhs.inner)?,
        })
    }

    pub fn scale(&self, constant: f64) -> PyMatrix {
        PyMatrix {
            inner: &self.inner * constant,
        }
    }

    pub fn __neg__(&self) -> PyMatrix {
        PyMatrix { inner: -&self.inner }
    }

    pub fn __str__(&self) -> String {
        self.inner.to_string()
    }
}
