//! Handles all user-facing console output for the harness.
//!
//! Centralizing the progress lines and the summary block here keeps the
//! runner free of presentation concerns and gives every command a
//! consistent look. Colors are disabled automatically when stdout is not
//! a terminal.

use std::io::Write;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::outcome::TestStatus;
use crate::runner::{ExecutionResult, Summary};

const RULE_WIDTH: usize = 50;

/// Console reporter for run progress and the final summary.
pub struct ConsoleReporter {
    stdout: StandardStream,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        let choice = if atty::is(atty::Stream::Stdout) {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Self {
            stdout: StandardStream::stdout(choice),
        }
    }

    /// Printed once after discovery, before the first test starts.
    pub fn banner(&mut self, test_count: usize) {
        println!("Found {} test files", test_count);
        println!("{}", "=".repeat(RULE_WIDTH));
    }

    /// One line per completed test: glyph, name, status, duration.
    pub fn test_finished(&mut self, result: &ExecutionResult) {
        let _ = self.write_status_glyph(result.status);
        println!(
            " {}: {} ({:.2}s)",
            result.name, result.status, result.duration_secs
        );
    }

    /// The run-wide summary block, mirroring every Summary field.
    pub fn summary(&mut self, summary: &Summary) {
        println!("{}", "=".repeat(RULE_WIDTH));
        println!("TEST SUMMARY");
        println!("{}", "=".repeat(RULE_WIDTH));
        println!("Total tests: {}", summary.total_tests);
        println!("Passed: {}", summary.passed);
        println!("Failed: {}", summary.failed);
        println!("Errors: {}", summary.errors);
        println!("Timeouts: {}", summary.timeouts);
        println!("Success rate: {:.1}%", summary.success_rate);
        println!("Total duration: {:.2}s", summary.total_duration_secs);
        println!("Average duration: {:.2}s", summary.average_duration_secs);
        println!(
            "Total instructions executed: {}",
            crate::report::group_digits(summary.total_instructions_executed)
        );
        println!(
            "Total memory operations: {}",
            crate::report::group_digits(summary.total_memory_operations)
        );
    }

    pub fn report_saved(&mut self, format: &str, path: &std::path::Path) {
        println!("{} report saved to: {}", format, path.display());
    }

    fn write_status_glyph(&mut self, status: TestStatus) -> std::io::Result<()> {
        let (glyph, color) = match status {
            TestStatus::Pass => ("\u{2713}", Color::Green),
            TestStatus::Fail => ("\u{2717}", Color::Red),
            TestStatus::Error => ("!", Color::Yellow),
            TestStatus::Timeout => ("\u{23f1}", Color::Cyan),
        };
        self.stdout
            .set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
        write!(self.stdout, "{}", glyph)?;
        self.stdout.reset()?;
        self.stdout.flush()
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}
