// The one-dimensional input array of the sum benchmarks.

use rayon::{ThreadPool, prelude::*};

use crate::error::{Result, try_filled_vec};
use crate::partition::Partition;

/// Owned array of `u64` values, allocated once and never resized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    data: Vec<u64>,
}

impl Buffer {
    pub fn zeroed(len: usize) -> Result<Self> {
        Ok(Self {
            data: try_filled_vec("the array", len, 0u64)?,
        })
    }

    /// Allocate and fill with `data[i] = i + first`.
    ///
    /// The fill runs inside `pool`, each pool thread writing one disjoint
    /// static chunk of the array.
    pub fn sequential(len: usize, first: u64, pool: &ThreadPool) -> Result<Self> {
        let mut buffer = Self::zeroed(len)?;
        buffer.fill_sequential(first, pool)?;
        Ok(buffer)
    }

    pub fn fill_sequential(&mut self, first: u64, pool: &ThreadPool) -> Result<()> {
        let partition = Partition::new(self.data.len(), pool.current_num_threads())?;
        let pieces = partition.split_mut(&mut self.data);

        pool.install(|| {
            pieces.into_par_iter().for_each(|(offset, piece)| {
                for (i, value) in piece.iter_mut().enumerate() {
                    *value = (offset + i) as u64 + first;
                }
            })
        });

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [u64] {
        &mut self.data
    }
}
