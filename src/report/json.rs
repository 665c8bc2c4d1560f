//! Machine-readable report: one JSON document carrying the summary and
//! every field of every result, including the raw captured streams, for
//! lossless persistence and downstream tooling.

use std::fs;
use std::path::Path;

use serde_json::json;

use crate::errors::HarnessError;
use crate::runner::{ExecutionResult, Summary};

pub fn render(summary: &Summary, results: &[ExecutionResult]) -> serde_json::Value {
    json!({
        "summary": summary,
        "tests": results,
    })
}

/// Serializes and writes the document in one scoped operation.
pub fn write(
    path: &Path,
    summary: &Summary,
    results: &[ExecutionResult],
) -> Result<(), HarnessError> {
    let document = render(summary, results);
    let text = serde_json::to_string_pretty(&document).map_err(|err| HarnessError::ReportIo {
        path: path.to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::Other, err),
    })?;
    fs::write(path, text).map_err(|err| HarnessError::ReportIo {
        path: path.to_path_buf(),
        source: err,
    })
}
