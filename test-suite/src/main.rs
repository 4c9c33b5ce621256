//! Custom test runner for the validation case suite.
//!
//! Runs every case file, lists the failing ones, and prints a summary:
//! - FAIL roster/count-out-of-range
//! - 17/18 passed

use clap::Parser;
use test_suite::{TestRunner, cases_dir};

#[derive(Parser)]
#[command(name = "test-suite", about = "Validation case suite runner")]
struct Args {
    /// Filter tests by name pattern (substring match)
    #[arg(short, long)]
    filter: Option<String>,

    /// Show short error summaries instead of detailed output
    #[arg(short, long)]
    short: bool,
}

/// ANSI color codes
mod colors {
    pub const GREEN: &str = "\x1b[32m";
    pub const RED: &str = "\x1b[31m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RESET: &str = "\x1b[0m";
}

fn main() {
    let args = Args::parse();
    let exit_code = run(&args);
    std::process::exit(exit_code);
}

fn run(args: &Args) -> i32 {
    println!(
        "\n{}{}Validation Case Suite{}",
        colors::BOLD,
        colors::CYAN,
        colors::RESET
    );
    println!("{}{}", colors::DIM, "=".repeat(50));
    println!("{}", colors::RESET);

    let mut runner = TestRunner::new(cases_dir());
    if let Some(filter) = &args.filter {
        runner = runner.with_filter(filter.as_str());
    }

    let results = match runner.run_all() {
        Ok(results) => results,
        Err(e) => {
            eprintln!(
                "{}{}Error:{} Failed to run test cases: {:#}",
                colors::BOLD,
                colors::RED,
                colors::RESET,
                e
            );
            return 1;
        }
    };

    if results.total == 0 {
        println!(
            "{}{}Warning:{} No test cases found{}",
            colors::BOLD,
            colors::YELLOW,
            colors::RESET,
            if args.filter.is_some() {
                " matching filter"
            } else {
                ""
            }
        );
        return 0;
    }

    for failure in &results.failures {
        println!(
            "  {}{}FAIL{} {}",
            colors::BOLD,
            colors::RED,
            colors::RESET,
            failure.test_name
        );
        let detail = if args.short {
            failure.error.lines().next().unwrap_or_default()
        } else {
            failure.error.as_str()
        };
        for line in detail.lines() {
            println!("       {}{}{}", colors::DIM, line, colors::RESET);
        }
    }

    let color = if results.is_success() {
        colors::GREEN
    } else {
        colors::RED
    };
    println!(
        "\n{}{}{}/{} passed{}",
        colors::BOLD,
        color,
        results.passed,
        results.total,
        colors::RESET
    );

    if results.is_success() { 0 } else { 1 }
}
