//! Human-readable report: a self-contained HTML document with inline
//! styles, headline summary cards, and one table row per test. All figures
//! come straight from the shared summary/result snapshot.

use std::fs;
use std::path::Path;

use crate::errors::HarnessError;
use crate::outcome::TestStatus;
use crate::report::group_digits;
use crate::runner::{ExecutionResult, Summary};

/// Marker glyph rendered next to each test name, one per status value.
fn status_glyph(status: TestStatus) -> &'static str {
    match status {
        TestStatus::Pass => "\u{2713}",    // ✓
        TestStatus::Fail => "\u{2717}",    // ✗
        TestStatus::Error => "!",
        TestStatus::Timeout => "\u{23f1}", // ⏱
    }
}

fn status_class(status: TestStatus) -> &'static str {
    match status {
        TestStatus::Pass => "pass",
        TestStatus::Fail => "fail",
        TestStatus::Error => "error",
        TestStatus::Timeout => "timeout",
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn result_row(result: &ExecutionResult) -> String {
    let class = status_class(result.status);
    format!(
        r#"            <tr class="test-{class}">
                <td>{glyph} {name}</td>
                <td><span class="status status-{class}">{status}</span></td>
                <td>{duration:.3}s</td>
                <td>{instructions}</td>
                <td>{reads}</td>
                <td>{writes}</td>
                <td>{branches}</td>
                <td>{ips}</td>
            </tr>
"#,
        class = class,
        glyph = status_glyph(result.status),
        name = escape(&result.name),
        status = result.status,
        duration = result.duration_secs,
        instructions = group_digits(result.metrics.instructions_executed),
        reads = group_digits(result.metrics.memory_reads),
        writes = group_digits(result.metrics.memory_writes),
        branches = group_digits(result.metrics.branches_taken),
        ips = group_digits(result.metrics.instructions_per_second),
    )
}

pub fn render(summary: &Summary, results: &[ExecutionResult]) -> String {
    let rows: String = results.iter().map(result_row).collect();
    let not_passed = summary.failed + summary.errors + summary.timeouts;

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Simulator Test Report</title>
    <style>
        body {{ font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; margin: 0; padding: 20px; background-color: #f5f5f5; }}
        .container {{ max-width: 1200px; margin: 0 auto; }}
        .header {{ background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 30px; border-radius: 10px; margin-bottom: 30px; }}
        .header h1 {{ margin: 0; font-size: 2.5em; }}
        .header p {{ margin: 10px 0 0 0; opacity: 0.9; }}

        .summary {{ display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 20px; margin-bottom: 30px; }}
        .summary-card {{ background: white; padding: 20px; border-radius: 10px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); text-align: center; }}
        .summary-card h3 {{ margin: 0; font-size: 2em; }}
        .summary-card p {{ margin: 10px 0 0 0; color: #666; }}

        .success-rate {{ color: #28a745; }}
        .total-tests {{ color: #17a2b8; }}
        .failed-tests {{ color: #dc3545; }}
        .duration {{ color: #6f42c1; }}

        .test-results {{ background: white; border-radius: 10px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); overflow: hidden; }}
        .test-results h2 {{ margin: 0; padding: 20px; background: #f8f9fa; border-bottom: 1px solid #dee2e6; }}

        table {{ width: 100%; border-collapse: collapse; }}
        th, td {{ padding: 12px; text-align: left; border-bottom: 1px solid #dee2e6; }}
        th {{ background: #f8f9fa; font-weight: 600; }}

        .status {{ padding: 4px 8px; border-radius: 4px; font-weight: bold; font-size: 0.9em; }}
        .status-pass {{ background: #d4edda; color: #155724; }}
        .status-fail {{ background: #f8d7da; color: #721c24; }}
        .status-error {{ background: #fff3cd; color: #856404; }}
        .status-timeout {{ background: #d1ecf1; color: #0c5460; }}

        .test-pass {{ background-color: #f8fff8; }}
        .test-fail {{ background-color: #fff8f8; }}
        .test-error {{ background-color: #fffcf0; }}
        .test-timeout {{ background-color: #f0f8ff; }}

        .footer {{ margin-top: 30px; text-align: center; color: #666; }}
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>Simulator Test Report</h1>
            <p>Generated on {timestamp}</p>
        </div>

        <div class="summary">
            <div class="summary-card">
                <h3 class="success-rate">{success_rate:.1}%</h3>
                <p>Success Rate</p>
            </div>
            <div class="summary-card">
                <h3 class="total-tests">{total_tests}</h3>
                <p>Total Tests</p>
            </div>
            <div class="summary-card">
                <h3 class="failed-tests">{not_passed}</h3>
                <p>Failed Tests</p>
            </div>
            <div class="summary-card">
                <h3 class="duration">{total_duration:.1}s</h3>
                <p>Total Duration</p>
            </div>
            <div class="summary-card">
                <h3>{total_instructions}</h3>
                <p>Instructions Executed</p>
            </div>
            <div class="summary-card">
                <h3>{total_memory_ops}</h3>
                <p>Memory Operations</p>
            </div>
        </div>

        <div class="test-results">
            <h2>Test Results Details</h2>
            <table>
                <thead>
                    <tr>
                        <th>Test Name</th>
                        <th>Status</th>
                        <th>Duration</th>
                        <th>Instructions</th>
                        <th>Mem Reads</th>
                        <th>Mem Writes</th>
                        <th>Branches</th>
                        <th>IPS</th>
                    </tr>
                </thead>
                <tbody>
{rows}                </tbody>
            </table>
        </div>

        <div class="footer">
            <p>Generated by simbench</p>
        </div>
    </div>
</body>
</html>
"#,
        timestamp = summary.timestamp.to_rfc3339(),
        success_rate = summary.success_rate,
        total_tests = summary.total_tests,
        not_passed = not_passed,
        total_duration = summary.total_duration_secs,
        total_instructions = group_digits(summary.total_instructions_executed),
        total_memory_ops = group_digits(summary.total_memory_operations),
        rows = rows,
    )
}

/// Renders and writes the document in one scoped operation.
pub fn write(
    path: &Path,
    summary: &Summary,
    results: &[ExecutionResult],
) -> Result<(), HarnessError> {
    let document = render(summary, results);
    fs::write(path, document).map_err(|err| HarnessError::ReportIo {
        path: path.to_path_buf(),
        source: err,
    })
}
