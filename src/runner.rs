//! Sequential test execution and run-wide aggregation.
//!
//! A `Run` is constructed once per harness invocation and exclusively owns
//! the result list for the run's duration. Tests execute one at a time in
//! discovery order; each produces exactly one immutable `ExecutionResult`
//! via execute, extract, classify. The `Summary` is always recomputed from
//! the full result slice, never maintained incrementally, so it cannot
//! drift from the data the emitters see.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::discovery::TestCase;
use crate::executor::SimulatorExecutor;
use crate::metrics::{extract_metrics, PerformanceMetrics};
use crate::outcome::{classify, TestStatus};

/// The outcome of running one test case. Constructed exactly once by the
/// pipeline and never mutated afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub name: String,
    pub vector_path: String,
    pub status: TestStatus,
    pub duration_secs: f64,
    pub metrics: PerformanceMetrics,
    pub stdout: String,
    pub stderr: String,
}

/// Run-wide statistics, derived purely from the result list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub timestamp: DateTime<Utc>,
    pub total_tests: usize,
    pub passed: usize,
    pub failed: usize,
    pub errors: usize,
    pub timeouts: usize,
    pub success_rate: f64,
    pub total_duration_secs: f64,
    pub average_duration_secs: f64,
    pub total_instructions_executed: u64,
    pub total_memory_operations: u64,
}

impl Summary {
    /// Computes the summary in a single full pass over the results.
    ///
    /// The empty slice yields a well-defined all-zero summary; both rate
    /// divisions are guarded.
    pub fn from_results(results: &[ExecutionResult]) -> Self {
        let total_tests = results.len();
        let passed = count_status(results, TestStatus::Pass);
        let failed = count_status(results, TestStatus::Fail);
        let errors = count_status(results, TestStatus::Error);
        let timeouts = count_status(results, TestStatus::Timeout);

        let total_duration_secs: f64 = results.iter().map(|r| r.duration_secs).sum();
        let total_instructions_executed: u64 = results
            .iter()
            .map(|r| r.metrics.instructions_executed)
            .sum();
        let total_memory_operations: u64 = results
            .iter()
            .map(|r| r.metrics.memory_reads + r.metrics.memory_writes)
            .sum();

        let (success_rate, average_duration_secs) = if total_tests > 0 {
            (
                passed as f64 / total_tests as f64 * 100.0,
                total_duration_secs / total_tests as f64,
            )
        } else {
            (0.0, 0.0)
        };

        Self {
            timestamp: Utc::now(),
            total_tests,
            passed,
            failed,
            errors,
            timeouts,
            success_rate,
            total_duration_secs,
            average_duration_secs,
            total_instructions_executed,
            total_memory_operations,
        }
    }

    /// True when every test passed. An empty run counts as all-passing,
    /// the vacuously-true policy this harness documents.
    pub fn all_passed(&self) -> bool {
        self.passed == self.total_tests
    }
}

fn count_status(results: &[ExecutionResult], status: TestStatus) -> usize {
    results.iter().filter(|r| r.status == status).count()
}

/// Per-invocation run context: drives the pipeline and owns the results.
pub struct Run {
    executor: SimulatorExecutor,
    results: Vec<ExecutionResult>,
    cancelled: Arc<AtomicBool>,
}

impl Run {
    pub fn new(executor: SimulatorExecutor) -> Self {
        Self {
            executor,
            results: Vec::new(),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Shared flag that stops the run before the next test starts. Results
    /// for tests that already completed are kept and still reported.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    /// Executes every case sequentially, invoking `on_result` as each
    /// result is recorded. No partial result is recorded for a test that
    /// never started.
    pub fn run_all<F>(&mut self, cases: &[TestCase], mut on_result: F)
    where
        F: FnMut(&ExecutionResult),
    {
        for case in cases {
            if self.cancelled.load(Ordering::SeqCst) {
                break;
            }
            let result = self.run_case(case);
            on_result(&result);
            self.results.push(result);
        }
    }

    /// The per-test pipeline: execute, extract metrics, classify.
    ///
    /// Metrics come from a fresh extraction over this run's stdout only, so
    /// a malformed block can never leak values from a previous test.
    fn run_case(&self, case: &TestCase) -> ExecutionResult {
        let run = self.executor.execute(case);
        let metrics = extract_metrics(&run.stdout);
        let status = classify(&run.outcome, &run.stdout);

        ExecutionResult {
            name: case.name.clone(),
            vector_path: case.vector_path.display().to_string(),
            status,
            duration_secs: run.duration.as_secs_f64(),
            metrics,
            stdout: run.stdout,
            stderr: run.stderr,
        }
    }

    pub fn results(&self) -> &[ExecutionResult] {
        &self.results
    }

    pub fn summary(&self) -> Summary {
        Summary::from_results(&self.results)
    }
}
