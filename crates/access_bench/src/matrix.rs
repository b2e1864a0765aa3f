// Square matrices stored as one contiguous row-major block.

use std::ops::{Index, IndexMut};

use ndarray::{Array2, Zip};
use rayon::ThreadPool;

use crate::error::{BenchError, Result, try_filled_vec};

/// Every `DIFF_PERIOD`th element of the second comparison matrix differs.
pub const DIFF_PERIOD: usize = 1000;

/// An `N x N` matrix; element `(row, col)` lives at offset `row * N + col`.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    data: Array2<T>,
}

impl<T: Copy + Default> Matrix<T> {
    /// Allocate an `n x n` matrix of default values.
    pub fn square(n: usize) -> Result<Self> {
        let elements = n.checked_mul(n).ok_or_else(|| {
            BenchError::InvalidArgument(format!("Matrix side {n} is too large."))
        })?;
        let block = try_filled_vec("matrix data", elements, T::default())?;
        let data = Array2::from_shape_vec((n, n), block)
            .map_err(|err| BenchError::InvalidArgument(err.to_string()))?;

        Ok(Self { data })
    }

    /// Row length (and number of rows).
    pub fn side(&self) -> usize {
        self.data.nrows()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        self.data.get((row, col)).copied()
    }

    /// The backing block in row-major order.
    pub fn as_slice(&self) -> &[T] {
        self.data.as_slice().unwrap_or_default()
    }

    pub(crate) fn array_mut(&mut self) -> &mut Array2<T> {
        &mut self.data
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;
    // index is (row, column)
    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.data[index]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        &mut self.data[index]
    }
}

/// Two `n x n` matrices for the comparison benchmark.
///
/// `a[i] = i mod 100` and `b[i] = a[i]`, except that `b[i] = a[i] + 1` at every
/// flat index `i` that is a multiple of [`DIFF_PERIOD`]. The number of
/// differences is therefore `ceil(n * n / DIFF_PERIOD)`.
pub fn comparison_pair(n: usize, pool: &ThreadPool) -> Result<(Matrix<u64>, Matrix<u64>)> {
    let mut a = Matrix::<u64>::square(n)?;
    let mut b = Matrix::<u64>::square(n)?;

    pool.install(|| {
        Zip::indexed(a.array_mut())
            .and(b.array_mut())
            .par_for_each(|(row, col), a, b| {
                let i = row * n + col;
                *a = (i % 100) as u64;
                *b = if i % DIFF_PERIOD == 0 { *a + 1 } else { *a };
            })
    });

    Ok((a, b))
}

/// Number of differing elements produced by [`comparison_pair`].
pub fn expected_differences(elements: usize) -> usize {
    elements.div_ceil(DIFF_PERIOD)
}
