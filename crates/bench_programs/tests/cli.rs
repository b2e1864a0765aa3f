// Command line contract of the benchmark programs: positional arguments,
// result lines on stdout, exit code 1 on any failure.

use std::process::{Command, Output};

fn run(program: &str, args: &[&str]) -> Output {
    run_with_log(program, args, "warn")
}

fn run_with_log(program: &str, args: &[&str], filter: &str) -> Output {
    let path = match program {
        "array_sum_random" => env!("CARGO_BIN_EXE_array_sum_random"),
        "array_sum_strided" => env!("CARGO_BIN_EXE_array_sum_strided"),
        "array_sum_serial" => env!("CARGO_BIN_EXE_array_sum_serial"),
        "false_sharing_sim" => env!("CARGO_BIN_EXE_false_sharing_sim"),
        "matrix_compare" => env!("CARGO_BIN_EXE_matrix_compare"),
        "matrix_init" => env!("CARGO_BIN_EXE_matrix_init"),
        "bench_programs" => env!("CARGO_BIN_EXE_bench_programs"),
        _ => panic!("unknown program {program}"),
    };
    Command::new(path)
        .args(args)
        .env("RUST_LOG", filter)
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn random_sum_all_modes() {
    for (mode, label) in [
        ("good", "Good Mode"),
        ("bad-fs", "Bad-FS Mode"),
        ("bad-ma", "Bad-MA Mode (Random Access)"),
    ] {
        let output = run("array_sum_random", &[mode, "1000", "4"]);
        assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));

        let out = stdout(&output);
        assert!(out.contains(&format!("{label} - Total Sum: 500500")), "{out}");
        assert!(out.contains(&format!("{label} - Execution Time: ")), "{out}");
        assert!(out.contains(" seconds"));
    }
}

#[test]
fn execution_time_has_six_decimals() {
    let output = run("array_sum_random", &["good", "100", "2"]);
    let out = stdout(&output);
    let line = out
        .lines()
        .find(|line| line.contains("Execution Time"))
        .unwrap();
    let value = line
        .trim_end_matches(" seconds")
        .rsplit(' ')
        .next()
        .unwrap();
    let (_, decimals) = value.split_once('.').unwrap();
    assert_eq!(decimals.len(), 6);
}

#[test]
fn invalid_mode_fails_without_result() {
    let output = run("array_sum_random", &["fast", "1000", "4"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!stdout(&output).contains("Total Sum"));
    assert!(stderr(&output).contains("Invalid mode: fast"));

    // modes are case sensitive
    let output = run("matrix_compare", &["GOOD", "10", "1"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn missing_arguments_fail() {
    for args in [&[][..], &["good"][..], &["good", "1000"][..]] {
        let output = run("array_sum_random", args);
        assert_eq!(output.status.code(), Some(1), "{args:?}");
        assert!(!stdout(&output).contains("Total Sum"));
    }
}

#[test]
fn bad_numbers_fail() {
    for args in [
        ["good", "0", "4"],
        ["good", "abc", "4"],
        ["good", "100", "0"],
        ["good", "100", "-2"],
    ] {
        let output = run("array_sum_strided", &args);
        assert_eq!(output.status.code(), Some(1), "{args:?}");
        assert!(stdout(&output).is_empty());
    }
}

#[test]
fn coprime_stride_sums_everything() {
    let output = run("array_sum_strided", &["bad-ma", "1000", "3"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Bad-MA Mode (Stride 7) - Total Sum: 500500"));
    assert!(!stderr(&output).contains("co-prime"));
}

#[test]
fn non_coprime_stride_warns_but_succeeds() {
    let output = run("array_sum_strided", &["bad-ma", "1000", "2", "--stride", "10"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stderr(&output).contains("stride=10 and size=1000 are not co-prime"));

    let out = stdout(&output);
    let total: u64 = out
        .lines()
        .find_map(|line| line.strip_prefix("Bad-MA Mode (Stride 10) - Total Sum: "))
        .unwrap()
        .parse()
        .unwrap();
    assert!(total < 500_500);
}

#[test]
fn coverage_warning_survives_log_filter() {
    let output = run_with_log(
        "array_sum_strided",
        &["bad-ma", "1000", "2", "--stride", "10"],
        "off",
    );
    assert_eq!(output.status.code(), Some(0));
    assert!(stderr(&output).contains("Warning: stride=10 and size=1000 are not co-prime"));

    let output = run_with_log(
        "false_sharing_sim",
        &["bad-ma", "100", "2", "--stride", "4"],
        "off",
    );
    assert_eq!(output.status.code(), Some(0));
    assert!(stderr(&output).contains("Warning: stride=4 and size=100 are not co-prime"));
}

#[test]
fn allocation_failure_exits_with_error() {
    let output = run("array_sum_random", &["good", "18446744073709551615", "4"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Memory allocation failed for the array"));
    assert!(!stdout(&output).contains("Total Sum"));
}

#[test]
fn matrix_compare_counts_differences() {
    for mode in ["good", "bad-fs", "bad-ma"] {
        let output = run("matrix_compare", &[mode, "100", "3", "--seed", "5"]);
        assert_eq!(output.status.code(), Some(0));
        assert!(stdout(&output).contains("- Total Differences: 10"));
    }
}

#[test]
fn matrix_init_reports_probe() {
    for mode in ["good", "bad-ma"] {
        let output = run("matrix_init", &[mode, "64", "4"]);
        assert_eq!(output.status.code(), Some(0));
        assert!(stdout(&output).contains("a[17][17] = 17"));
    }

    // column 17 of 40 falls in worker 1's block, and row 17 is one of its rows
    for _ in 0..10 {
        let output = run("matrix_init", &["bad-fs", "40", "4"]);
        assert_eq!(output.status.code(), Some(0));
        assert!(stdout(&output).contains("a[17][17] = 18"), "{}", stdout(&output));
    }

    let output = run("matrix_init", &["good", "10", "2"]);
    assert!(stdout(&output).contains("a[17][17] is out of bounds."));
    assert!(stdout(&output).contains("Execution Time: "));
}

#[test]
fn serial_program_passes() {
    let output = run("array_sum_serial", &["good", "10"]);
    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.contains("Linear Sum: 55"));
    assert!(out.contains("Modified Sum: 65"));

    let output = run("array_sum_serial", &["bad", "12"]);
    let out = stdout(&output);
    assert!(out.contains("Random Sum: 78"));
    assert!(out.contains("Strided Sum (Stride 5): 18"));

    let output = run("array_sum_serial", &["bad-fs", "12"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn false_sharing_sim_needs_stride_for_bad_ma() {
    let output = run("false_sharing_sim", &["bad-ma", "100", "2"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!stdout(&output).contains("Sum:"));

    let output = run("false_sharing_sim", &["bad-ma", "100", "2", "--stride", "3"]);
    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.contains("Mode: bad-ma (with inefficient memory access)"));
    assert!(out.contains("Size: 100"));
    assert!(out.contains("Threads: 2"));
    assert!(out.contains("Sum: 5050"));
}

#[test]
fn unified_cli_runs_any_combination() {
    let output = run(
        "bench_programs",
        &["sum", "1000", "--access", "random", "--padding", "packed", "--threads", "3"],
    );
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert!(stdout(&output).contains("Total Sum: 500500"));

    let output = run("bench_programs", &["compare", "50", "--threads", "2"]);
    assert!(stdout(&output).contains("Total Differences: 3"));

    let output = run("bench_programs", &["init", "20", "--order", "column-major"]);
    assert!(stdout(&output).contains("a[17][17] = 17"));

    let output = run("bench_programs", &["sum", "0"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn help_exits_cleanly() {
    let output = run("matrix_compare", &["--help"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Usage: matrix_compare"));
}
