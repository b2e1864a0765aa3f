// Configurable front end: every combination of workload, access pattern and
// accumulator layout, not just the ones the named programs use.

use std::process::ExitCode;

use access_bench::init::{self, InitOrder, PROBE};
use access_bench::{AccessPattern, Benchmark, Matrix, Padding, WorkloadKind};
use bench_programs::{ProgramError, seconds, to_usize};
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(about = "Memory access pattern and false sharing benchmarks", long_about = None)]
struct CliArgs {
    #[clap(subcommand)]
    command: Command,

    /// Number of worker threads [default: number of logical CPUs]
    #[arg(long, global = true, value_parser = clap::value_parser!(u32).range(1..))]
    threads: Option<u32>,
}

#[derive(Subcommand)]
enum Command {
    /// Sum the values 1..=SIZE
    Sum(ReduceArgs),
    /// Count differences between two SIZE x SIZE matrices
    Compare(ReduceArgs),
    /// Fill a SIZE x SIZE matrix
    Init(InitArgs),
}

#[derive(Debug, Args)]
struct ReduceArgs {
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    size: u64,

    #[arg(long, value_enum, default_value_t = Access::Linear)]
    access: Access,

    #[arg(long, value_enum, default_value_t = Layout::Padded)]
    padding: Layout,

    /// Stride (strided access) or step (stepped access)
    #[arg(long, default_value_t = 7, value_parser = clap::value_parser!(u64).range(1..))]
    stride: u64,

    /// Shuffle seed for random access [default: derived from the clock]
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Debug, Args)]
struct InitArgs {
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    size: u64,

    #[arg(long, value_enum, default_value_t = Order::RowMajor)]
    order: Order,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Access {
    Linear,
    Strided,
    Stepped,
    Random,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Layout {
    Padded,
    Packed,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Order {
    RowMajor,
    Interleaved,
    ColumnMajor,
}

fn main() -> ExitCode {
    bench_programs::init_logging();
    let args = match bench_programs::parse_args::<CliArgs>("bench_programs") {
        Ok(args) => args,
        Err(code) => return code,
    };
    bench_programs::finish(run(args))
}

fn run(args: CliArgs) -> Result<(), ProgramError> {
    let threads = match args.threads {
        Some(threads) => threads as usize,
        None => num_cpus::get(),
    };

    match args.command {
        Command::Sum(reduce) => {
            let elements = to_usize(reduce.size, "size")?;
            run_reduction(WorkloadKind::Sum { elements }, &reduce, threads, "Total Sum")
        }
        Command::Compare(reduce) => {
            let side = to_usize(reduce.size, "size")?;
            run_reduction(
                WorkloadKind::Compare { side },
                &reduce,
                threads,
                "Total Differences",
            )
        }
        Command::Init(init) => run_init(&init, threads),
    }
}

fn run_reduction(
    workload: WorkloadKind,
    args: &ReduceArgs,
    threads: usize,
    quantity: &str,
) -> Result<(), ProgramError> {
    let stride = to_usize(args.stride, "stride")?;
    let access = match args.access {
        Access::Linear => AccessPattern::Linear,
        Access::Strided => AccessPattern::Strided { stride },
        Access::Stepped => AccessPattern::Stepped { step: stride },
        Access::Random => AccessPattern::Random,
    };
    let padding = match args.padding {
        Layout::Padded => Padding::Padded,
        Layout::Packed => Padding::Packed,
    };

    let mut benchmark = Benchmark::new(workload, threads)
        .with_access(access)
        .with_padding(padding);
    if let Some(seed) = args.seed {
        benchmark = benchmark.with_seed(seed);
    }

    let mut prepared = benchmark.prepare()?;
    let outcome = prepared.run()?;

    println!("Threads: {threads}, access: {access}, padding: {padding:?}");
    println!("{quantity}: {}", outcome.total);
    println!("Execution Time: {} seconds", seconds(outcome.elapsed));

    Ok(())
}

fn run_init(args: &InitArgs, threads: usize) -> Result<(), ProgramError> {
    let side = to_usize(args.size, "size")?;
    let order = match args.order {
        Order::RowMajor => InitOrder::RowMajor,
        Order::Interleaved => InitOrder::ThreadInterleaved,
        Order::ColumnMajor => InitOrder::ColumnMajor,
    };

    let pool = access_bench::worker_pool(threads)?;
    let mut matrix = Matrix::<i32>::square(side)?;
    let outcome = init::initialize(&mut matrix, order, &pool)?;

    println!("Threads: {threads}, order: {order:?}");
    match outcome.probe {
        Some(value) => println!("a[{}][{}] = {value}", PROBE.0, PROBE.1),
        None => println!("a[{}][{}] is out of bounds.", PROBE.0, PROBE.1),
    }
    println!("Execution Time: {} seconds", seconds(outcome.elapsed));

    Ok(())
}
