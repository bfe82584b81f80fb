//! Whole-run summary statistics
//!
//! Four aggregates are reported, all derived from the run duration:
//!
//! - elapsed time in seconds
//! - throughput in MiB/s over the bytes actually transferred
//! - IOPS
//! - mean latency in milliseconds (elapsed divided by operation count)
//!
//! A summary can be computed from a live run or recomputed later from the rows of
//! a persisted I/O log; both give identical results for the same entries.

use super::{BenchmarkRun, LogEntry};
use crate::config::AccessPattern;
use crate::util::time::{calculate_iops, calculate_mean_latency_ms, calculate_throughput_mibps};
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub pattern: AccessPattern,
    pub op_count: u64,
    pub total_bytes: u64,
    #[serde(skip)]
    pub elapsed: Duration,
    pub elapsed_secs: f64,
    pub throughput_mibps: f64,
    pub iops: f64,
    pub mean_latency_ms: f64,
}

impl Summary {
    /// Build from an operation count, byte total and run duration
    pub fn new(pattern: AccessPattern, op_count: u64, total_bytes: u64, elapsed: Duration) -> Self {
        Self {
            pattern,
            op_count,
            total_bytes,
            elapsed,
            elapsed_secs: elapsed.as_secs_f64(),
            throughput_mibps: calculate_throughput_mibps(total_bytes, elapsed),
            iops: calculate_iops(op_count, elapsed),
            mean_latency_ms: calculate_mean_latency_ms(op_count, elapsed),
        }
    }

    /// Summarize a completed run
    pub fn from_run(run: &BenchmarkRun) -> Self {
        Self::new(
            run.pattern(),
            run.len() as u64,
            run.total_completed_bytes(),
            run.elapsed(),
        )
    }

    /// Recompute from the rows of a persisted I/O log
    ///
    /// Returns `None` when the rows carry no timestamps; the run duration cannot
    /// be recovered from such a log.
    pub fn from_log_rows(pattern: AccessPattern, rows: &[LogEntry]) -> Option<Self> {
        let elapsed = rows.last()?.timestamp?;
        let total_bytes = rows.iter().map(|r| r.completed_bytes).sum();
        Some(Self::new(pattern, rows.len() as u64, total_bytes, elapsed))
    }
}
