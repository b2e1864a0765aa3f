// Error type shared by every benchmark operation.

use thiserror::Error;

/// Errors that abort a benchmark run.
///
/// There is no recovery path for any of these: a run is a single measurement
/// pass, so callers report the error and exit.
#[derive(Debug, Error)]
pub enum BenchError {
    /// A buffer, matrix, permutation or accumulator array could not be allocated.
    #[error("Memory allocation failed for {what} ({elements} elements).")]
    Allocation { what: &'static str, elements: usize },

    /// A size, thread count, stride or mode was rejected.
    #[error("{0}")]
    InvalidArgument(String),

    #[error("Failed to build worker thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// The two inputs of a comparison run have different element counts.
    #[error("Comparison inputs differ in length: {left} vs. {right}")]
    LengthMismatch { left: usize, right: usize },
}

pub type Result<T> = std::result::Result<T, BenchError>;

/// Allocate a vector of `len` copies of `value`, reporting failure instead of
/// aborting the process.
pub(crate) fn try_filled_vec<T: Clone>(what: &'static str, len: usize, value: T) -> Result<Vec<T>> {
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|_| BenchError::Allocation { what, elements: len })?;
    data.resize(len, value);
    Ok(data)
}
