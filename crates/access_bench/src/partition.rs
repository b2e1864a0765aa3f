// Static partitioning of an index space across a fixed number of workers.

use std::ops::Range;

use crate::error::{BenchError, Result};

/// Splits `[0, len)` into one contiguous range per worker.
///
/// Every worker gets `len / workers` indices, and the last worker's range is
/// extended to `len` so it absorbs the remainder. Ranges never overlap and
/// together cover the whole index space; when there are more workers than
/// indices the leading ranges are empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    len: usize,
    workers: usize,
}

impl Partition {
    pub fn new(len: usize, workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(BenchError::InvalidArgument(
                "Number of workers must be a positive integer.".to_string(),
            ));
        }
        Ok(Self { len, workers })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Number of indices given to every worker but the last.
    pub fn chunk_len(&self) -> usize {
        self.len / self.workers
    }

    /// Index range owned by `worker`.
    ///
    /// Panics if `worker` is not below the worker count.
    pub fn range(&self, worker: usize) -> Range<usize> {
        assert!(worker < self.workers, "worker {worker} out of range");

        let chunk = self.chunk_len();
        let start = worker * chunk;
        let end = if worker == self.workers - 1 {
            self.len
        } else {
            start + chunk
        };

        start..end
    }

    pub fn ranges(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        (0..self.workers).map(|worker| self.range(worker))
    }

    /// Cut `data` into the per-worker pieces, each paired with the offset of
    /// its first element. `data` must be exactly `len` long.
    pub fn split_mut<'a, T>(&self, data: &'a mut [T]) -> Vec<(usize, &'a mut [T])> {
        assert_eq!(data.len(), self.len, "slice does not match partition");

        let mut pieces = Vec::with_capacity(self.workers);
        let mut rest = data;
        for range in self.ranges() {
            let (head, tail) = std::mem::take(&mut rest).split_at_mut(range.len());
            pieces.push((range.start, head));
            rest = tail;
        }
        pieces
    }
}
