//! Array sum over `size` sequential values, split across `threads` workers.
//!
//! `good` reads linearly into padded slots, `bad-fs` reads linearly into
//! packed slots, `bad-ma` reads through a shuffled index permutation.

use std::process::ExitCode;

use access_bench::{AccessPattern, Benchmark, Mode, PARALLEL_MODES, WorkloadKind};
use bench_programs::{ParallelArgs, ProgramError};

fn main() -> ExitCode {
    bench_programs::init_logging();
    let args = match bench_programs::parse_args::<ParallelArgs>("array_sum_random") {
        Ok(args) => args,
        Err(code) => return code,
    };
    bench_programs::finish(run(args))
}

fn run(args: ParallelArgs) -> Result<(), ProgramError> {
    let mode = bench_programs::select_mode(&args.mode, PARALLEL_MODES)?;
    let elements = bench_programs::to_usize(args.size, "size")?;

    let benchmark = Benchmark::for_mode(
        mode,
        WorkloadKind::Sum { elements },
        args.threads as usize,
        AccessPattern::Random,
    );
    let mut prepared = args.tuning.apply(benchmark).prepare()?;
    let outcome = prepared.run()?;

    let label = match mode {
        Mode::BadMa => "Bad-MA Mode (Random Access)",
        _ => bench_programs::mode_label(mode),
    };
    bench_programs::report(label, "Total Sum", outcome.total, outcome.elapsed);

    Ok(())
}
