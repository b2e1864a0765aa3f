//! A compact false sharing demo: one sum over `size` values, reported
//! together with the run parameters.
//!
//! `bad-ma` reads with a stride that must be given with `--stride`.

use std::process::ExitCode;

use access_bench::{AccessPattern, Benchmark, Mode, PARALLEL_MODES, WorkloadKind};
use bench_programs::{ParallelArgs, ProgramError};

fn main() -> ExitCode {
    bench_programs::init_logging();
    let args = match bench_programs::parse_args::<ParallelArgs>("false_sharing_sim") {
        Ok(args) => args,
        Err(code) => return code,
    };
    bench_programs::finish(run(args))
}

fn describe(mode: Mode) -> &'static str {
    match mode {
        Mode::Good => "good (no false sharing, no bad memory access)",
        Mode::BadFs => "bad-fs (with false sharing)",
        _ => "bad-ma (with inefficient memory access)",
    }
}

fn run(args: ParallelArgs) -> Result<(), ProgramError> {
    let mode = bench_programs::select_mode(&args.mode, PARALLEL_MODES)?;
    let elements = bench_programs::to_usize(args.size, "size")?;

    let bad_access = match (mode, args.tuning.stride) {
        (Mode::BadMa, None) => {
            return Err(ProgramError::Usage(
                "Error: bad-ma mode needs an explicit --stride.".to_string(),
            ));
        }
        (_, Some(stride)) => AccessPattern::Strided {
            stride: bench_programs::to_usize(stride, "stride")?,
        },
        (_, None) => AccessPattern::Linear,
    };

    let benchmark = Benchmark::for_mode(
        mode,
        WorkloadKind::Sum { elements },
        args.threads as usize,
        bad_access,
    );
    let mut prepared = args.tuning.apply(benchmark).prepare()?;

    println!("Mode: {}", describe(mode));
    let outcome = prepared.run()?;

    bench_programs::warn_coverage(&outcome);

    println!("Size: {}", args.size);
    println!("Threads: {}", args.threads);
    println!("Sum: {}", outcome.total);
    println!("Execution Time: {} seconds", bench_programs::seconds(outcome.elapsed));

    Ok(())
}
