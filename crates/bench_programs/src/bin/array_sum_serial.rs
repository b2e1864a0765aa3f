//! Single-threaded array passes.
//!
//! `good` sums linearly, then increments every element and sums again.
//! `bad` sums through a shuffled index permutation, then sums every
//! fifth element (`--stride` to change the step).

use std::process::ExitCode;

use access_bench::{AccessPattern, Benchmark, Mode, SERIAL_MODES, WorkloadKind};
use bench_programs::{ProgramError, SerialArgs, seconds};

const DEFAULT_STEP: usize = 5;

fn main() -> ExitCode {
    bench_programs::init_logging();
    let args = match bench_programs::parse_args::<SerialArgs>("array_sum_serial") {
        Ok(args) => args,
        Err(code) => return code,
    };
    bench_programs::finish(run(args))
}

fn run(args: SerialArgs) -> Result<(), ProgramError> {
    let mode = bench_programs::select_mode(&args.mode, SERIAL_MODES)?;
    let elements = bench_programs::to_usize(args.size, "size")?;
    let step = args.tuning.stride_or(DEFAULT_STEP)?;

    let benchmark = Benchmark::for_mode(
        mode,
        WorkloadKind::Sum { elements },
        1,
        AccessPattern::Random,
    );
    let mut prepared = args.tuning.apply(benchmark).prepare()?;

    if mode == Mode::Good {
        let linear = prepared.run()?;
        println!("Linear Sum: {}", linear.total);
        println!("Linear Execution Time: {} seconds", seconds(linear.elapsed));

        let modified = prepared.increment_and_sum()?;
        println!("Modified Sum: {}", modified.total);
        println!(
            "Modification and Summing Execution Time: {} seconds",
            seconds(modified.elapsed)
        );
    } else {
        let random = prepared.run()?;
        println!("Random Sum: {}", random.total);
        println!("Random Execution Time: {} seconds", seconds(random.elapsed));

        let stepped = prepared.run_as(AccessPattern::Stepped { step })?;
        println!("Strided Sum (Stride {step}): {}", stepped.total);
        println!("Strided Execution Time: {} seconds", seconds(stepped.elapsed));
    }

    Ok(())
}
