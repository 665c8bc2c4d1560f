//! Bounded-time execution of the external simulator.
//!
//! One child process per call, under a wall-clock timeout, with both
//! streams captured. The child never outlives the call: on timeout it is
//! killed and reaped before returning. Launch failures are reported as an
//! outcome, not an error, so one broken test cannot abort the run.

use std::io::Read;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::discovery::TestCase;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// How a single execution ended, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecOutcome {
    /// The process exited within the timeout. The exit code is absent when
    /// the process was terminated by a signal.
    Completed { exit_code: Option<i32> },
    /// The timeout elapsed and the process was forcibly terminated.
    TimedOut,
    /// The process could not be launched at all.
    LaunchFailed { message: String },
}

/// Everything captured from one simulator invocation.
#[derive(Debug)]
pub struct CapturedRun {
    pub stdout: String,
    pub stderr: String,
    pub outcome: ExecOutcome,
    pub duration: Duration,
}

/// Runs the simulator against one test vector at a time.
#[derive(Debug, Clone)]
pub struct SimulatorExecutor {
    simulator: PathBuf,
    timeout: Duration,
}

impl SimulatorExecutor {
    pub fn new(simulator: PathBuf, timeout: Duration) -> Self {
        Self { simulator, timeout }
    }

    /// Executes the simulator with the case's vector as input.
    ///
    /// Invocation contract: `<simulator> --hex <vector> --debug`, streams
    /// piped. Duration is wall-clock from just before spawn to just after
    /// completion, kill, or failed launch.
    pub fn execute(&self, case: &TestCase) -> CapturedRun {
        let start = Instant::now();

        let spawned = Command::new(&self.simulator)
            .arg("--hex")
            .arg(&case.vector_path)
            .arg("--debug")
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn();

        let mut child = match spawned {
            Ok(child) => child,
            Err(err) => {
                return CapturedRun {
                    stdout: String::new(),
                    stderr: String::new(),
                    outcome: ExecOutcome::LaunchFailed {
                        message: format!("Failed to launch {}: {}", self.simulator.display(), err),
                    },
                    duration: start.elapsed(),
                };
            }
        };

        // Drain both pipes on dedicated threads so a chatty child cannot
        // deadlock against a full pipe buffer while we poll for exit.
        let mut child_stdout = child.stdout.take();
        let mut child_stderr = child.stderr.take();
        let stdout_thread = thread::spawn(move || {
            let mut buf = String::new();
            if let Some(ref mut pipe) = child_stdout {
                pipe.read_to_string(&mut buf).ok();
            }
            buf
        });
        let stderr_thread = thread::spawn(move || {
            let mut buf = String::new();
            if let Some(ref mut pipe) = child_stderr {
                pipe.read_to_string(&mut buf).ok();
            }
            buf
        });

        let deadline = start + self.timeout;
        let outcome = loop {
            match child.try_wait() {
                Ok(Some(status)) => {
                    break ExecOutcome::Completed {
                        exit_code: status.code(),
                    };
                }
                Ok(None) if Instant::now() >= deadline => {
                    child.kill().ok();
                    child.wait().ok();
                    break ExecOutcome::TimedOut;
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(err) => {
                    child.kill().ok();
                    child.wait().ok();
                    break ExecOutcome::LaunchFailed {
                        message: format!("Failed waiting for simulator: {}", err),
                    };
                }
            }
        };

        let stdout = stdout_thread.join().unwrap_or_default();
        let mut stderr = stderr_thread.join().unwrap_or_default();
        if outcome == ExecOutcome::TimedOut {
            if !stderr.is_empty() {
                stderr.push('\n');
            }
            stderr.push_str(&format!(
                "Test timed out after {} seconds",
                self.timeout.as_secs()
            ));
        }

        CapturedRun {
            stdout,
            stderr,
            outcome,
            duration: start.elapsed(),
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;

    fn write_stub(dir: &Path, name: &str, script: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn case(dir: &Path) -> TestCase {
        let vector = dir.join("vector.hex");
        fs::write(&vector, ":00000001FF\n").unwrap();
        TestCase {
            name: "vector".to_string(),
            vector_path: vector,
        }
    }

    #[test]
    fn captures_streams_and_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let sim = write_stub(
            dir.path(),
            "sim.sh",
            "#!/bin/sh\necho \"out line\"\necho \"err line\" >&2\nexit 0\n",
        );
        let executor = SimulatorExecutor::new(sim, Duration::from_secs(5));

        let run = executor.execute(&case(dir.path()));
        assert_eq!(run.outcome, ExecOutcome::Completed { exit_code: Some(0) });
        assert!(run.stdout.contains("out line"));
        assert!(run.stderr.contains("err line"));
    }

    #[test]
    fn reports_nonzero_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let sim = write_stub(dir.path(), "sim.sh", "#!/bin/sh\nexit 3\n");
        let executor = SimulatorExecutor::new(sim, Duration::from_secs(5));

        let run = executor.execute(&case(dir.path()));
        assert_eq!(run.outcome, ExecOutcome::Completed { exit_code: Some(3) });
    }

    #[test]
    fn kills_and_reports_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let sim = write_stub(
            dir.path(),
            "sim.sh",
            "#!/bin/sh\necho \"before hang\"\nexec sleep 30\n",
        );
        let executor = SimulatorExecutor::new(sim, Duration::from_millis(200));

        let start = Instant::now();
        let run = executor.execute(&case(dir.path()));
        assert_eq!(run.outcome, ExecOutcome::TimedOut);
        // Killed promptly, long before the stub's sleep would finish.
        assert!(start.elapsed() < Duration::from_secs(5));
        assert!(run.stderr.contains("timed out"));
        assert!(run.stdout.contains("before hang"));
    }

    #[test]
    fn launch_failure_is_an_outcome_not_a_panic() {
        let dir = tempfile::tempdir().unwrap();
        let executor = SimulatorExecutor::new(
            dir.path().join("no_such_simulator"),
            Duration::from_secs(1),
        );

        let run = executor.execute(&case(dir.path()));
        match run.outcome {
            ExecOutcome::LaunchFailed { ref message } => {
                assert!(message.contains("Failed to launch"));
            }
            ref other => panic!("expected LaunchFailed, got {:?}", other),
        }
    }
}
