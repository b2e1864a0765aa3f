// The configurable benchmark: workload kind, access pattern and accumulator
// layout chosen independently, then prepared and run.

use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::access::{AccessPattern, IndexPlan};
use crate::buffer::Buffer;
use crate::error::{BenchError, Result};
use crate::matrix::{self, Matrix};
use crate::mode::Mode;
use crate::reduce::{self, ReductionOutcome, Workload};
use crate::shuffle::{self, IndexPermutation};
use crate::slot::Padding;

/// What is computed, and over how much data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkloadKind {
    /// Sum of `elements` values `1, 2, ..., elements`.
    Sum { elements: usize },
    /// Difference count between two `side x side` matrices
    /// (see [`matrix::comparison_pair`]).
    Compare { side: usize },
}

impl WorkloadKind {
    /// Number of elements visited by one run.
    pub fn elements(self) -> Result<usize> {
        match self {
            WorkloadKind::Sum { elements } => Ok(elements),
            WorkloadKind::Compare { side } => side.checked_mul(side).ok_or_else(|| {
                BenchError::InvalidArgument(format!("Matrix side {side} is too large."))
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Benchmark {
    pub workload: WorkloadKind,
    pub access: AccessPattern,
    pub padding: Padding,
    pub threads: usize,
    /// Shuffle seed for random access.
    pub seed: u64,
}

impl Benchmark {
    /// Linear, padded benchmark with a time-derived seed.
    pub fn new(workload: WorkloadKind, threads: usize) -> Self {
        Self {
            workload,
            access: AccessPattern::Linear,
            padding: Padding::Padded,
            threads,
            seed: shuffle::time_seed(),
        }
    }

    /// Configuration named by `mode`; `bad_access` is the pattern the program
    /// uses for its cache-unfriendly mode.
    pub fn for_mode(
        mode: Mode,
        workload: WorkloadKind,
        threads: usize,
        bad_access: AccessPattern,
    ) -> Self {
        let access = if mode.bad_access() {
            bad_access
        } else {
            AccessPattern::Linear
        };
        Self::new(workload, threads)
            .with_access(access)
            .with_padding(mode.padding())
    }

    pub fn with_access(mut self, access: AccessPattern) -> Self {
        self.access = access;
        self
    }

    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.threads == 0 {
            return Err(BenchError::InvalidArgument(
                "Number of threads must be a positive integer.".to_string(),
            ));
        }
        if self.workload.elements()? == 0 {
            return Err(BenchError::InvalidArgument(
                "Size must be a positive integer.".to_string(),
            ));
        }
        self.access.validate()?;
        Ok(())
    }

    /// Allocate and fill the inputs, and shuffle indices if the access pattern
    /// is random. Nothing here is timed.
    pub fn prepare(&self) -> Result<PreparedRun> {
        self.validate()?;

        let pool = worker_pool(self.threads)?;
        log::info!("Worker pool ready with {} threads.", pool.current_num_threads());

        let input = match self.workload {
            WorkloadKind::Sum { elements } => Input::Array(Buffer::sequential(elements, 1, &pool)?),
            WorkloadKind::Compare { side } => {
                let (a, b) = matrix::comparison_pair(side, &pool)?;
                Input::Pair(a, b)
            }
        };
        log::info!("Initialized {} elements.", input.len());

        let mut permutation = None;
        if self.access.needs_permutation() {
            permutation_for(&mut permutation, input.len(), self.seed)?;
        }

        Ok(PreparedRun {
            config: *self,
            pool,
            input,
            permutation,
        })
    }
}

/// Build a pool of exactly `threads` worker threads.
pub fn worker_pool(threads: usize) -> Result<ThreadPool> {
    if threads == 0 {
        return Err(BenchError::InvalidArgument(
            "Number of threads must be a positive integer.".to_string(),
        ));
    }
    let pool = ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("bench-worker-{i}"))
        .build()?;
    Ok(pool)
}

#[derive(Debug)]
enum Input {
    Array(Buffer),
    Pair(Matrix<u64>, Matrix<u64>),
}

impl Input {
    fn len(&self) -> usize {
        match self {
            Input::Array(buffer) => buffer.len(),
            Input::Pair(a, _) => a.len(),
        }
    }
}

/// A benchmark with its inputs in place, ready to be measured.
#[derive(Debug)]
pub struct PreparedRun {
    config: Benchmark,
    pool: ThreadPool,
    input: Input,
    permutation: Option<IndexPermutation>,
}

impl PreparedRun {
    pub fn permutation(&self) -> Option<&IndexPermutation> {
        self.permutation.as_ref()
    }

    /// The sum input, if this is a sum benchmark.
    pub fn buffer(&self) -> Option<&Buffer> {
        match &self.input {
            Input::Array(buffer) => Some(buffer),
            Input::Pair(..) => None,
        }
    }

    /// Run the configured access pattern.
    pub fn run(&mut self) -> Result<ReductionOutcome> {
        self.run_as(self.config.access)
    }

    /// Run over the same inputs with a different access pattern.
    pub fn run_as(&mut self, access: AccessPattern) -> Result<ReductionOutcome> {
        let access = access.validate()?;

        let len = self.input.len();
        let plan = match access {
            AccessPattern::Linear => IndexPlan::Linear,
            AccessPattern::Strided { stride } => IndexPlan::Strided { stride, len },
            AccessPattern::Stepped { step } => IndexPlan::Stepped { step },
            AccessPattern::Random => {
                let permutation = permutation_for(&mut self.permutation, len, self.config.seed)?;
                IndexPlan::Random(permutation.as_slice())
            }
        };
        let workload = match &self.input {
            Input::Array(buffer) => Workload::Sum(buffer.as_slice()),
            Input::Pair(a, b) => Workload::compare(a.as_slice(), b.as_slice())?,
        };

        log::debug!(
            "Running {:?} with {} access and {:?} accumulators.",
            self.config.workload,
            access,
            self.config.padding
        );
        reduce::reduce(&self.pool, workload, plan, self.config.padding)
    }

    /// Increment every element of the sum input, summing the new values.
    pub fn increment_and_sum(&mut self) -> Result<ReductionOutcome> {
        match &mut self.input {
            Input::Array(buffer) => reduce::increment_and_sum(&self.pool, buffer.as_mut_slice()),
            Input::Pair(..) => Err(BenchError::InvalidArgument(
                "Read-modify-write pass needs a sum workload.".to_string(),
            )),
        }
    }
}

/// The shuffled permutation in `slot`, built on first use.
fn permutation_for(
    slot: &mut Option<IndexPermutation>,
    len: usize,
    seed: u64,
) -> Result<&IndexPermutation> {
    let permutation = match slot.take() {
        Some(permutation) => permutation,
        None => {
            log::info!("Shuffling {len} indices with seed {seed}.");
            IndexPermutation::shuffled(len, seed)?
        }
    };
    Ok(&*slot.insert(permutation))
}
