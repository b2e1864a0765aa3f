#[cfg(test)]
mod tests;

// Memory access pattern and false sharing micro-benchmarks.
//
// Every benchmark is the same partitioned parallel reduction: the input is
// split into one contiguous range per thread, each thread accumulates into its
// own slot, and the slots are summed once all threads have joined. What varies
// is the order positions are read in (`access`), whether the slots share cache
// lines (`slot`), and whether the run sums one array or counts differences
// between two matrices (`reduce::Workload`).

pub mod access;
pub mod benchmark;
pub mod buffer;
pub mod error;
pub mod init;
pub mod matrix;
pub mod mode;
pub mod partition;
pub mod reduce;
pub mod shuffle;
pub mod slot;

pub use access::{AccessPattern, StrideWarning};
pub use benchmark::{Benchmark, PreparedRun, WorkloadKind, worker_pool};
pub use buffer::Buffer;
pub use error::{BenchError, Result};
pub use init::{InitOrder, InitOutcome};
pub use matrix::Matrix;
pub use mode::{Mode, PARALLEL_MODES, SERIAL_MODES, parse_mode};
pub use reduce::{ReductionOutcome, Workload};
pub use shuffle::IndexPermutation;
pub use slot::{CACHE_LINE_SIZE, Padding};
