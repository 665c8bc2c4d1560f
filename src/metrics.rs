//! Extraction of the performance-report block from simulator output.
//!
//! The simulator may embed a delimited block of run statistics in its
//! stdout. Extraction is total: any input, including an empty string or a
//! truncated block, yields a `PerformanceMetrics` record. Absence of the
//! block is not a parsing failure, and a missing or malformed line inside
//! the block leaves only that field at its default. The record never
//! influences the test's status.

use serde::{Deserialize, Serialize};

/// Start-of-block line, as printed by the simulator.
pub const REPORT_START_MARKER: &str = "=== Performance Report ===";
/// End-of-block line.
pub const REPORT_END_MARKER: &str = "=========================";

/// Run statistics for a single simulator execution.
///
/// Either fully default-valued (no block found) or populated from exactly
/// one contiguous block. The simulation-time field is simulator-defined
/// free text (e.g. "12 ms") and is kept verbatim, trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub instructions_executed: u64,
    pub memory_reads: u64,
    pub memory_writes: u64,
    pub register_reads: u64,
    pub register_writes: u64,
    pub branches_taken: u64,
    pub irq_count: u64,
    pub simulation_time: String,
    pub instructions_per_second: u64,
}

impl Default for PerformanceMetrics {
    fn default() -> Self {
        Self {
            instructions_executed: 0,
            memory_reads: 0,
            memory_writes: 0,
            register_reads: 0,
            register_writes: 0,
            branches_taken: 0,
            irq_count: 0,
            simulation_time: "0 ms".to_string(),
            instructions_per_second: 0,
        }
    }
}

/// Extracts metrics from captured stdout.
///
/// Finds the first delimited performance-report block and reads each
/// `<Label>: <value>` line inside it against the fixed label set. Lines
/// that do not split on a colon, carry an unknown label, or fail integer
/// parsing are skipped, keeping that field's default.
pub fn extract_metrics(stdout: &str) -> PerformanceMetrics {
    let mut metrics = PerformanceMetrics::default();

    let Some(block) = first_report_block(stdout) else {
        return metrics;
    };

    for line in block {
        let Some((label, value)) = line.split_once(':') else {
            continue;
        };
        apply_field(&mut metrics, label.trim(), value.trim());
    }

    metrics
}

/// Returns the lines strictly between the first start marker and the next
/// end marker, or None when no complete block exists.
fn first_report_block(stdout: &str) -> Option<Vec<&str>> {
    let mut lines = stdout.lines();
    lines.find(|line| line.trim() == REPORT_START_MARKER)?;

    let mut body = Vec::new();
    for line in lines {
        if line.trim() == REPORT_END_MARKER {
            return Some(body);
        }
        body.push(line);
    }
    // Start marker without an end marker: treat as no block at all rather
    // than risking a partially-populated record from a truncated run.
    None
}

fn apply_field(metrics: &mut PerformanceMetrics, label: &str, value: &str) {
    match label {
        "Instructions executed" => parse_count(value, &mut metrics.instructions_executed),
        "Memory reads" => parse_count(value, &mut metrics.memory_reads),
        "Memory writes" => parse_count(value, &mut metrics.memory_writes),
        "Register reads" => parse_count(value, &mut metrics.register_reads),
        "Register writes" => parse_count(value, &mut metrics.register_writes),
        "Branches taken" => parse_count(value, &mut metrics.branches_taken),
        "IRQ count" => parse_count(value, &mut metrics.irq_count),
        "Simulation time" => metrics.simulation_time = value.to_string(),
        "Instructions per second" => parse_count(value, &mut metrics.instructions_per_second),
        _ => {}
    }
}

fn parse_count(value: &str, field: &mut u64) {
    if let Ok(parsed) = value.parse::<u64>() {
        *field = parsed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_block() -> String {
        format!(
            "boot banner\n{}\nInstructions executed: 12345\nMemory reads: 100\n\
             Memory writes: 50\nRegister reads: 2000\nRegister writes: 1500\n\
             Branches taken: 42\nIRQ count: 3\nSimulation time: 12 ms\n\
             Instructions per second: 987654\n{}\ntrailing output\n",
            REPORT_START_MARKER, REPORT_END_MARKER
        )
    }

    #[test]
    fn extracts_all_nine_fields() {
        let metrics = extract_metrics(&full_block());
        assert_eq!(metrics.instructions_executed, 12345);
        assert_eq!(metrics.memory_reads, 100);
        assert_eq!(metrics.memory_writes, 50);
        assert_eq!(metrics.register_reads, 2000);
        assert_eq!(metrics.register_writes, 1500);
        assert_eq!(metrics.branches_taken, 42);
        assert_eq!(metrics.irq_count, 3);
        assert_eq!(metrics.simulation_time, "12 ms");
        assert_eq!(metrics.instructions_per_second, 987654);
    }

    #[test]
    fn empty_input_yields_defaults() {
        assert_eq!(extract_metrics(""), PerformanceMetrics::default());
    }

    #[test]
    fn output_without_block_yields_defaults() {
        let metrics = extract_metrics("Hello from the simulator\nAll done.\n");
        assert_eq!(metrics, PerformanceMetrics::default());
    }

    #[test]
    fn start_marker_without_end_marker_yields_defaults() {
        let input = format!("{}\nInstructions executed: 999\n", REPORT_START_MARKER);
        assert_eq!(extract_metrics(&input), PerformanceMetrics::default());
    }

    #[test]
    fn empty_block_body_yields_defaults() {
        let input = format!("{}\n{}\n", REPORT_START_MARKER, REPORT_END_MARKER);
        assert_eq!(extract_metrics(&input), PerformanceMetrics::default());
    }

    #[test]
    fn malformed_lines_keep_their_field_defaults() {
        let input = format!(
            "{}\nInstructions executed: not-a-number\nMemory reads: 7\n\
             Branches taken\nUnknown label: 5\n{}\n",
            REPORT_START_MARKER, REPORT_END_MARKER
        );
        let metrics = extract_metrics(&input);
        assert_eq!(metrics.instructions_executed, 0);
        assert_eq!(metrics.memory_reads, 7);
        assert_eq!(metrics.branches_taken, 0);
    }

    #[test]
    fn negative_counts_are_rejected() {
        let input = format!(
            "{}\nMemory writes: -4\n{}\n",
            REPORT_START_MARKER, REPORT_END_MARKER
        );
        assert_eq!(extract_metrics(&input).memory_writes, 0);
    }

    #[test]
    fn only_first_block_is_used() {
        let input = format!(
            "{s}\nInstructions executed: 1\n{e}\n{s}\nInstructions executed: 2\n{e}\n",
            s = REPORT_START_MARKER,
            e = REPORT_END_MARKER
        );
        assert_eq!(extract_metrics(&input).instructions_executed, 1);
    }

    #[test]
    fn simulation_time_is_kept_verbatim_trimmed() {
        let input = format!(
            "{}\nSimulation time:   3.5 seconds  \n{}\n",
            REPORT_START_MARKER, REPORT_END_MARKER
        );
        assert_eq!(extract_metrics(&input).simulation_time, "3.5 seconds");
    }

    #[test]
    fn extraction_is_idempotent() {
        let input = full_block();
        assert_eq!(extract_metrics(&input), extract_metrics(&input));
    }
}
