//! Measurement log
//!
//! A run keeps one [`LogEntry`] per operation, in issue order. The log is the only
//! thing the measured loop writes to, so it is allocated up front with exactly
//! `op_count` slots and never grows during measurement.
//!
//! Aggregates are derived from the log afterwards; see [`summary`].
//!
//! # Example
//!
//! ```
//! use benchmark_io::config::AccessPattern;
//! use benchmark_io::stats::BenchmarkRun;
//!
//! let mut run = BenchmarkRun::with_capacity(AccessPattern::SequentialRead, 4096, 2);
//! run.start();
//! let t = run.mark();
//! run.record(Some(t), 0, 4096);
//! run.record(Some(run.mark()), 4096, 4096);
//! run.finish();
//!
//! assert_eq!(run.len(), 2);
//! assert_eq!(run.total_completed_bytes(), 8192);
//! ```

pub mod summary;

pub use summary::Summary;

use crate::config::AccessPattern;
use std::time::{Duration, Instant};

/// One completed operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogEntry {
    /// Time since the run started, taken right after the operation completed
    ///
    /// `None` when per-operation timestamps are disabled.
    pub timestamp: Option<Duration>,
    pub offset: u64,
    pub issued_bytes: u64,
    pub completed_bytes: u64,
}

/// Everything recorded by one run
#[derive(Debug)]
pub struct BenchmarkRun {
    pattern: AccessPattern,
    block_size: u64,
    start: Instant,
    finish: Option<Instant>,
    entries: Vec<LogEntry>,
}

impl BenchmarkRun {
    /// Create an empty run with room for exactly `op_count` entries
    pub fn with_capacity(pattern: AccessPattern, block_size: u64, op_count: usize) -> Self {
        Self {
            pattern,
            block_size,
            start: Instant::now(),
            finish: None,
            entries: Vec::with_capacity(op_count),
        }
    }

    /// Take the start timestamp; call right before the first operation
    #[inline]
    pub fn start(&mut self) {
        self.start = Instant::now();
        self.finish = None;
    }

    /// Time elapsed since [`BenchmarkRun::start`]
    #[inline(always)]
    pub fn mark(&self) -> Duration {
        self.start.elapsed()
    }

    /// Append the entry for the next operation
    #[inline(always)]
    pub fn record(&mut self, timestamp: Option<Duration>, offset: u64, completed_bytes: u64) {
        debug_assert!(self.entries.len() < self.entries.capacity(), "log would reallocate");
        self.entries.push(LogEntry {
            timestamp,
            offset,
            issued_bytes: self.block_size,
            completed_bytes,
        });
    }

    /// Take the finish timestamp; call right after the last operation
    #[inline]
    pub fn finish(&mut self) {
        self.finish = Some(Instant::now());
    }

    pub fn pattern(&self) -> AccessPattern {
        self.pattern
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    pub fn total_completed_bytes(&self) -> u64 {
        self.entries.iter().map(|e| e.completed_bytes).sum()
    }

    /// Duration of the run
    ///
    /// The last entry's timestamp when per-operation timestamps were taken,
    /// otherwise finish minus start. Zero for a run that never finished.
    pub fn elapsed(&self) -> Duration {
        match self.entries.last().and_then(|e| e.timestamp) {
            Some(last) => last,
            None => self
                .finish
                .map(|f| f.saturating_duration_since(self.start))
                .unwrap_or_default(),
        }
    }
}
