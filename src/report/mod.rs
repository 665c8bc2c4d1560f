//! Report emission.
//!
//! Both emitters are pure rendering functions over the same
//! `(Summary, &[ExecutionResult])` snapshot; neither recomputes any
//! aggregate, so the two documents cannot disagree. Writing is
//! all-or-nothing per destination and surfaces `HarnessError::ReportIo`
//! on failure.

pub mod html;
pub mod json;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

/// Filename timestamp, shared by both formats so one run's reports pair up.
fn run_stamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y%m%d_%H%M%S").to_string()
}

pub fn json_report_path(output_dir: &Path, timestamp: &DateTime<Utc>) -> PathBuf {
    output_dir.join(format!("test_report_{}.json", run_stamp(timestamp)))
}

pub fn html_report_path(output_dir: &Path, timestamp: &DateTime<Utc>) -> PathBuf {
    output_dir.join(format!("test_report_{}.html", run_stamp(timestamp)))
}

/// Groups an integer's digits with commas for the human-readable report.
pub(crate) fn group_digits(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_grouping() {
        assert_eq!(group_digits(0), "0");
        assert_eq!(group_digits(999), "999");
        assert_eq!(group_digits(1000), "1,000");
        assert_eq!(group_digits(987654321), "987,654,321");
    }

    #[test]
    fn report_paths_share_one_stamp() {
        let timestamp = "2026-08-04T12:34:56Z".parse::<DateTime<Utc>>().unwrap();
        let dir = Path::new("reports");
        assert_eq!(
            json_report_path(dir, &timestamp),
            Path::new("reports/test_report_20260804_123456.json")
        );
        assert_eq!(
            html_report_path(dir, &timestamp),
            Path::new("reports/test_report_20260804_123456.html")
        );
    }
}
