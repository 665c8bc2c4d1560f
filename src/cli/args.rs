//! Defines the command-line arguments for the simbench harness.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::Parser;
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "simbench",
    version,
    about = "Runs a simulator binary over a directory of test vectors and reports the results."
)]
pub struct HarnessArgs {
    /// Path to the simulator executable.
    #[arg(long)]
    pub simulator: PathBuf,

    /// Directory containing .hex test vectors.
    #[arg(long)]
    pub test_dir: PathBuf,

    /// Output directory for reports.
    #[arg(long, default_value = "./reports")]
    pub output_dir: PathBuf,

    /// Timeout per test in seconds.
    #[arg(long, default_value_t = 60)]
    pub timeout: u64,

    /// Generate the JSON report.
    #[arg(long)]
    pub json: bool,

    /// Generate the HTML report.
    #[arg(long)]
    pub html: bool,
}

impl HarnessArgs {
    /// When neither format is requested explicitly, both are generated.
    pub fn wants_json(&self) -> bool {
        self.json || !self.html
    }

    pub fn wants_html(&self) -> bool {
        self.html || !self.json
    }
}
