//! Harness error taxonomy.
//!
//! Only two classes of failure propagate to the top level: configuration
//! errors (detected before any test runs) and report I/O errors (detected
//! after the run, per report format). Anything that goes wrong inside a
//! single test (launch failure, timeout, unparseable output) is represented
//! as data, not an error; see `outcome` and `runner`.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum HarnessError {
    #[error("Simulator not found: {path}")]
    #[diagnostic(
        code(simbench::config::simulator_not_found),
        help("pass the path to a built simulator binary with --simulator")
    )]
    SimulatorNotFound { path: PathBuf },

    #[error("Test directory not found: {path}")]
    #[diagnostic(
        code(simbench::config::test_dir_not_found),
        help("pass a directory containing .hex test vectors with --test-dir")
    )]
    TestDirNotFound { path: PathBuf },

    #[error("Failed to walk test directory: {source}")]
    #[diagnostic(code(simbench::config::walk))]
    Walk {
        #[from]
        source: walkdir::Error,
    },

    #[error("Failed to write report {path}: {source}")]
    #[diagnostic(
        code(simbench::report::io),
        help("check that the output directory is writable")
    )]
    ReportIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
