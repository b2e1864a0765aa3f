// unit tests

use super::*;

mod shuffle;
mod slot;

// test helper functions

fn pool(threads: usize) -> rayon::ThreadPool {
    worker_pool(threads).unwrap()
}

/// 1 + 2 + ... + n
fn triangular(n: u64) -> u64 {
    n * (n + 1) / 2
}

fn sum_run(elements: usize, threads: usize) -> PreparedRun {
    Benchmark::new(WorkloadKind::Sum { elements }, threads)
        .with_seed(42)
        .prepare()
        .unwrap()
}
