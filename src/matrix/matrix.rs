use crate::matrix::error::Result;

pub trait Matrix<T>
where
    Self: Sized,
{
    fn from_list(lines: Vec<Vec<T>>) -> Result<Self>;
    fn to_list(&self) -> Vec<Vec<T>>;

    fn is_echelon(&self) -> bool;
    // Every pivot is the only nonzero entry of its column. Pivots are not
    // required to be normalized to one.
    fn is_rref(&self) -> bool;
    fn identity(n: usize) -> Result<Self>;
    fn at(&self, row: usize, col: usize) -> T;
}
