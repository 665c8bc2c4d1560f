use serde::{Deserialize, Serialize};

use crate::executor::ExecOutcome;

/// Substrings in stdout that mark a failed run even on a zero exit code.
/// Case-sensitive, matching the simulator's own output conventions.
const FAILURE_MARKERS: [&str; 2] = ["ERROR", "Failed"];

/// Closed classification of one test run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestStatus {
    #[serde(rename = "PASS")]
    Pass,
    #[serde(rename = "FAIL")]
    Fail,
    #[serde(rename = "ERROR")]
    Error,
    #[serde(rename = "TIMEOUT")]
    Timeout,
}

impl TestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestStatus::Pass => "PASS",
            TestStatus::Fail => "FAIL",
            TestStatus::Error => "ERROR",
            TestStatus::Timeout => "TIMEOUT",
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, TestStatus::Pass)
    }
}

impl std::fmt::Display for TestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Maps an execution outcome and the captured stdout to a status.
///
/// Pure function, evaluated once per result. Precedence: TIMEOUT, then
/// ERROR, then FAIL by exit code, then FAIL by output marker, then PASS.
/// A completed child with no exit code (signal death) counts as FAIL: the
/// simulator ran and terminated abnormally, which is a property of the
/// test, not of the harness.
pub fn classify(outcome: &ExecOutcome, stdout: &str) -> TestStatus {
    match outcome {
        ExecOutcome::TimedOut => TestStatus::Timeout,
        ExecOutcome::LaunchFailed { .. } => TestStatus::Error,
        ExecOutcome::Completed { exit_code } => {
            if *exit_code != Some(0) {
                return TestStatus::Fail;
            }
            if has_failure_marker(stdout) {
                return TestStatus::Fail;
            }
            TestStatus::Pass
        }
    }
}

fn has_failure_marker(stdout: &str) -> bool {
    FAILURE_MARKERS
        .iter()
        .any(|marker| stdout.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_exit_with_clean_output_passes() {
        let outcome = ExecOutcome::Completed { exit_code: Some(0) };
        assert_eq!(classify(&outcome, "All tests passed\n"), TestStatus::Pass);
    }

    #[test]
    fn nonzero_exit_fails() {
        let outcome = ExecOutcome::Completed { exit_code: Some(1) };
        assert_eq!(classify(&outcome, ""), TestStatus::Fail);
    }

    #[test]
    fn zero_exit_with_failure_marker_fails_not_passes() {
        let outcome = ExecOutcome::Completed { exit_code: Some(0) };
        assert_eq!(classify(&outcome, "assertion Failed\n"), TestStatus::Fail);
        assert_eq!(classify(&outcome, "ERROR: bad opcode\n"), TestStatus::Fail);
    }

    #[test]
    fn markers_are_case_sensitive() {
        let outcome = ExecOutcome::Completed { exit_code: Some(0) };
        assert_eq!(classify(&outcome, "no error here\n"), TestStatus::Pass);
        assert_eq!(classify(&outcome, "nothing failed\n"), TestStatus::Pass);
    }

    #[test]
    fn timeout_takes_precedence_over_stdout_content() {
        assert_eq!(
            classify(&ExecOutcome::TimedOut, "ERROR: whatever\n"),
            TestStatus::Timeout
        );
        assert_eq!(classify(&ExecOutcome::TimedOut, ""), TestStatus::Timeout);
    }

    #[test]
    fn launch_failure_is_error() {
        let outcome = ExecOutcome::LaunchFailed {
            message: "no such file".to_string(),
        };
        assert_eq!(classify(&outcome, ""), TestStatus::Error);
    }

    #[test]
    fn signal_death_is_fail() {
        let outcome = ExecOutcome::Completed { exit_code: None };
        assert_eq!(classify(&outcome, ""), TestStatus::Fail);
    }

    #[test]
    fn status_serializes_as_uppercase_strings() {
        let json = serde_json::to_string(&TestStatus::Timeout).unwrap();
        assert_eq!(json, "\"TIMEOUT\"");
        let back: TestStatus = serde_json::from_str("\"PASS\"").unwrap();
        assert_eq!(back, TestStatus::Pass);
    }
}
