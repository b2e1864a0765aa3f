//! Initializes an N x N matrix of 32-bit integers row by row (`good`), with
//! thread-interleaved rows (`bad-fs`) or column by column (`bad-ma`).

use std::process::ExitCode;

use access_bench::init::{self, PROBE};
use access_bench::{Matrix, PARALLEL_MODES};
use bench_programs::{ParallelArgs, ProgramError};

fn main() -> ExitCode {
    bench_programs::init_logging();
    let args = match bench_programs::parse_args::<ParallelArgs>("matrix_init") {
        Ok(args) => args,
        Err(code) => return code,
    };
    bench_programs::finish(run(args))
}

fn run(args: ParallelArgs) -> Result<(), ProgramError> {
    let mode = bench_programs::select_mode(&args.mode, PARALLEL_MODES)?;
    let side = bench_programs::to_usize(args.size, "size")?;

    let pool = access_bench::worker_pool(args.threads as usize)?;
    let mut matrix = Matrix::<i32>::square(side)?;
    log::info!("Allocated {side} x {side} matrix.");

    let outcome = init::initialize(&mut matrix, mode.init_order(), &pool)?;

    match outcome.probe {
        Some(value) => println!("a[{}][{}] = {value}", PROBE.0, PROBE.1),
        None => println!("a[{}][{}] is out of bounds.", PROBE.0, PROBE.1),
    }
    println!("Execution Time: {} seconds", bench_programs::seconds(outcome.elapsed));

    Ok(())
}
