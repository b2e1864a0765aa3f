//! Array sum where `bad-ma` walks the array with a fixed stride,
//! reading position `(i * stride) mod size`.
//!
//! The stride defaults to 7; a stride sharing a factor with `size` skips
//! elements and is reported as a warning.

use std::process::ExitCode;

use access_bench::{AccessPattern, Benchmark, Mode, PARALLEL_MODES, WorkloadKind};
use bench_programs::{ParallelArgs, ProgramError};

const DEFAULT_STRIDE: usize = 7;

fn main() -> ExitCode {
    bench_programs::init_logging();
    let args = match bench_programs::parse_args::<ParallelArgs>("array_sum_strided") {
        Ok(args) => args,
        Err(code) => return code,
    };
    bench_programs::finish(run(args))
}

fn run(args: ParallelArgs) -> Result<(), ProgramError> {
    let mode = bench_programs::select_mode(&args.mode, PARALLEL_MODES)?;
    let elements = bench_programs::to_usize(args.size, "size")?;
    let stride = args.tuning.stride_or(DEFAULT_STRIDE)?;

    let benchmark = Benchmark::for_mode(
        mode,
        WorkloadKind::Sum { elements },
        args.threads as usize,
        AccessPattern::Strided { stride },
    );
    let mut prepared = args.tuning.apply(benchmark).prepare()?;
    let outcome = prepared.run()?;

    bench_programs::warn_coverage(&outcome);

    let label = match mode {
        Mode::BadMa => format!("Bad-MA Mode (Stride {stride})"),
        _ => bench_programs::mode_label(mode).to_string(),
    };
    bench_programs::report(&label, "Total Sum", outcome.total, outcome.elapsed);

    Ok(())
}
