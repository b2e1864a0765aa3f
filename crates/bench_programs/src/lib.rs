// Command line glue shared by the benchmark programs.
//
// Every program takes `<mode> <size> [threads]` positionally, prints its
// result lines to stdout and exits 1 on any failure, so an external driver
// can run it under a profiler and flag failed rows.

use std::process::ExitCode;
use std::time::Duration;

use access_bench::{BenchError, Benchmark, Mode, ReductionOutcome, mode};
use clap::{Args, CommandFactory, FromArgMatches, Parser};
use env_logger::Env;
use thiserror::Error;

/// Arguments of the multi-threaded programs.
#[derive(Debug, Parser)]
pub struct ParallelArgs {
    /// Benchmark mode: good, bad-fs or bad-ma
    pub mode: String,

    /// Number of elements (matrix programs: side length N)
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    pub size: u64,

    /// Number of worker threads
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pub threads: u32,

    #[command(flatten)]
    pub tuning: Tuning,
}

/// Arguments of the single-threaded program.
#[derive(Debug, Parser)]
pub struct SerialArgs {
    /// Benchmark mode: good or bad
    pub mode: String,

    /// Number of elements
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    pub size: u64,

    #[command(flatten)]
    pub tuning: Tuning,
}

/// Optional knobs for the cache-unfriendly modes.
#[derive(Debug, Args)]
pub struct Tuning {
    /// Stride for strided access
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub stride: Option<u64>,

    /// Shuffle seed for random access (default: derived from the clock)
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Tuning {
    /// Apply the seed override, if any.
    pub fn apply(&self, benchmark: Benchmark) -> Benchmark {
        match self.seed {
            Some(seed) => benchmark.with_seed(seed),
            None => benchmark,
        }
    }

    pub fn stride_or(&self, default: usize) -> Result<usize, ProgramError> {
        match self.stride {
            Some(stride) => to_usize(stride, "stride"),
            None => Ok(default),
        }
    }
}

#[derive(Debug, Error)]
pub enum ProgramError {
    #[error("Invalid mode: {given}\nValid modes are: {valid}")]
    InvalidMode { given: String, valid: String },

    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Bench(#[from] BenchError),
}

/// Start logging to stderr; warnings are shown unless `RUST_LOG` says otherwise.
pub fn init_logging() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
}

/// Parse the command line with `program` as the displayed name.
///
/// On failure clap's message is printed and the exit code to return is
/// handed back: 1 for usage errors, 0 for `--help` and `--version`.
pub fn parse_args<A: Parser>(program: &'static str) -> Result<A, ExitCode> {
    A::command()
        .name(program)
        .try_get_matches()
        .and_then(|matches| A::from_arg_matches(&matches))
        .map_err(|err| {
            err.print().ok();
            if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        })
}

/// Check `given` against the modes a program accepts.
pub fn select_mode(given: &str, allowed: &[Mode]) -> Result<Mode, ProgramError> {
    access_bench::parse_mode(given, allowed).map_err(|_| ProgramError::InvalidMode {
        given: given.to_string(),
        valid: mode::describe(allowed),
    })
}

pub fn to_usize(value: u64, what: &str) -> Result<usize, ProgramError> {
    usize::try_from(value)
        .map_err(|_| ProgramError::Usage(format!("Error: {what} {value} is too large.")))
}

/// Map the outcome of a program run to its exit code.
pub fn finish(result: Result<(), ProgramError>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::debug!("run failed: {err:?}");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

/// Elapsed time formatted like `printf("%f")`.
pub fn seconds(elapsed: Duration) -> String {
    format!("{:.6}", elapsed.as_secs_f64())
}

/// Print the two result lines every reduction program ends with.
pub fn report(label: &str, quantity: &str, total: u64, elapsed: Duration) {
    println!("{label} - {quantity}: {total}");
    println!("{label} - Execution Time: {} seconds", seconds(elapsed));
}

/// Print the stride coverage warning of a run, if it has one.
///
/// This goes straight to stderr; the library's log record of the same
/// warning can be filtered out with `RUST_LOG`.
pub fn warn_coverage(outcome: &ReductionOutcome) {
    if let Some(warning) = &outcome.warning {
        eprintln!("Warning: {warning}");
    }
}

/// "Good Mode", "Bad-FS Mode", ...
pub fn mode_label(mode: Mode) -> &'static str {
    match mode {
        Mode::Good => "Good Mode",
        Mode::BadFs => "Bad-FS Mode",
        Mode::BadMa => "Bad-MA Mode",
        Mode::Bad => "Bad Mode",
    }
}
