// Random index permutations for the random access benchmarks.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::error::{BenchError, Result};

/// A permutation of `[0, len)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexPermutation {
    indices: Vec<usize>,
}

impl IndexPermutation {
    pub fn identity(len: usize) -> Result<Self> {
        let mut indices = Vec::new();
        indices
            .try_reserve_exact(len)
            .map_err(|_| BenchError::Allocation {
                what: "shuffled indices",
                elements: len,
            })?;
        indices.extend(0..len);
        Ok(Self { indices })
    }

    /// Identity permutation shuffled with [`IndexPermutation::shuffle`].
    pub fn shuffled(len: usize, seed: u64) -> Result<Self> {
        let mut permutation = Self::identity(len)?;
        permutation.shuffle(seed);
        Ok(permutation)
    }

    /// Fisher-Yates shuffle: for `i` from `len - 1` down to 1, swap position
    /// `i` with a position drawn uniformly from `[0, i]`.
    ///
    /// The same seed always produces the same permutation.
    pub fn shuffle(&mut self, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        for i in (1..self.indices.len()).rev() {
            let j = rng.random_range(0..=i);
            self.indices.swap(i, j);
        }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.indices
    }
}

/// Seed derived from the wall clock, used when the caller does not pick one.
pub fn time_seed() -> u64 {
    chrono::Utc::now().timestamp_micros() as u64
}
