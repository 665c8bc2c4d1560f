//! The simbench command-line interface.
//!
//! This module is the main entry point for the harness binary and
//! orchestrates the core library components: validate configuration,
//! discover the corpus, run every test sequentially, then emit the
//! requested reports. Exit codes: 0 when every test passed (or none were
//! found), 1 when any test did not pass, 2 when the harness itself could
//! not run or could not write a report.

use std::fs;
use std::path::Path;
use std::time::Duration;

use clap::Parser;

use crate::cli::args::HarnessArgs;
use crate::cli::output::ConsoleReporter;
use crate::discovery::TestDiscoverer;
use crate::errors::HarnessError;
use crate::executor::SimulatorExecutor;
use crate::report;
use crate::runner::{ExecutionResult, Run, Summary};

pub mod args;
pub mod output;

pub const EXIT_OK: i32 = 0;
pub const EXIT_TESTS_FAILED: i32 = 1;
pub const EXIT_HARNESS_ERROR: i32 = 2;

/// The main entry point for the CLI. Returns the process exit code.
pub fn run() -> i32 {
    let args = HarnessArgs::parse();

    match run_harness(&args) {
        Ok(exit_code) => exit_code,
        Err(err) => {
            report_error(err);
            EXIT_HARNESS_ERROR
        }
    }
}

fn run_harness(args: &HarnessArgs) -> Result<i32, HarnessError> {
    // Both configuration checks happen before any test executes.
    if !args.simulator.is_file() {
        return Err(HarnessError::SimulatorNotFound {
            path: args.simulator.clone(),
        });
    }
    let cases = TestDiscoverer::discover(&args.test_dir)?;

    let mut reporter = ConsoleReporter::new();
    reporter.banner(cases.len());

    let executor =
        SimulatorExecutor::new(args.simulator.clone(), Duration::from_secs(args.timeout));
    let mut run = Run::new(executor);
    run.run_all(&cases, |result| reporter.test_finished(result));

    let summary = run.summary();
    reporter.summary(&summary);

    let report_errors = emit_reports(args, &mut reporter, &summary, run.results());

    if report_errors {
        Ok(EXIT_HARNESS_ERROR)
    } else if summary.all_passed() {
        Ok(EXIT_OK)
    } else {
        Ok(EXIT_TESTS_FAILED)
    }
}

/// Writes every requested format; a failure in one format is reported and
/// does not suppress the other. Returns true when any write failed.
fn emit_reports(
    args: &HarnessArgs,
    reporter: &mut ConsoleReporter,
    summary: &Summary,
    results: &[ExecutionResult],
) -> bool {
    if let Err(err) = ensure_output_dir(&args.output_dir) {
        report_error(err);
        return true;
    }

    let mut failed = false;

    if args.wants_json() {
        let path = report::json_report_path(&args.output_dir, &summary.timestamp);
        match report::json::write(&path, summary, results) {
            Ok(()) => reporter.report_saved("JSON", &path),
            Err(err) => {
                report_error(err);
                failed = true;
            }
        }
    }

    if args.wants_html() {
        let path = report::html_report_path(&args.output_dir, &summary.timestamp);
        match report::html::write(&path, summary, results) {
            Ok(()) => reporter.report_saved("HTML", &path),
            Err(err) => {
                report_error(err);
                failed = true;
            }
        }
    }

    failed
}

fn ensure_output_dir(output_dir: &Path) -> Result<(), HarnessError> {
    fs::create_dir_all(output_dir).map_err(|err| HarnessError::ReportIo {
        path: output_dir.to_path_buf(),
        source: err,
    })
}

fn report_error(err: HarnessError) {
    eprintln!("{:?}", miette::Report::new(err));
}
