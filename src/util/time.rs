//! Timing utilities
//!
//! Monotonic elapsed-time helpers used by the measured loop and the reporters,
//! plus the wall-clock helpers used for seeding and log naming.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Format an elapsed duration the way the I/O log stores it: `secs.nanos`
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use benchmark_io::util::time::format_elapsed;
///
/// assert_eq!(format_elapsed(Duration::new(1, 5)), "1.000000005");
/// assert_eq!(format_elapsed(Duration::from_millis(250)), "0.250000000");
/// ```
pub fn format_elapsed(elapsed: Duration) -> String {
    format!("{}.{:09}", elapsed.as_secs(), elapsed.subsec_nanos())
}

/// Parse a value written by [`format_elapsed`]
///
/// Returns `None` for anything that is not `secs.nanos` with exactly nine
/// fractional digits.
pub fn parse_elapsed(s: &str) -> Option<Duration> {
    let (secs, nanos) = s.trim().split_once('.')?;
    if nanos.len() != 9 {
        return None;
    }
    let secs: u64 = secs.parse().ok()?;
    let nanos: u32 = nanos.parse().ok()?;
    Some(Duration::new(secs, nanos))
}

/// Calculate IOPS from operation count and duration
///
/// Returns 0.0 for a zero duration.
pub fn calculate_iops(operations: u64, duration: Duration) -> f64 {
    let seconds = duration.as_secs_f64();
    if seconds > 0.0 {
        operations as f64 / seconds
    } else {
        0.0
    }
}

/// Calculate throughput in MiB/s from bytes transferred and duration
///
/// Returns 0.0 for a zero duration.
pub fn calculate_throughput_mibps(bytes: u64, duration: Duration) -> f64 {
    let seconds = duration.as_secs_f64();
    if seconds > 0.0 {
        bytes as f64 / (1u64 << 20) as f64 / seconds
    } else {
        0.0
    }
}

/// Mean latency in milliseconds of `operations` back-to-back operations
pub fn calculate_mean_latency_ms(operations: u64, duration: Duration) -> f64 {
    if operations == 0 {
        return 0.0;
    }
    duration.as_secs_f64() / operations as f64 * 1e3
}

/// Seed derived from the current wall-clock time
pub fn time_seed() -> u64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    // Fold the 128-bit nanosecond count so both halves contribute
    let nanos = now.as_nanos();
    (nanos as u64) ^ ((nanos >> 64) as u64)
}

/// Name of the I/O log file for a run started at `now`
pub fn log_file_name<Tz: chrono::TimeZone>(now: &chrono::DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format("benchmark-io_%F-%H-%M-%S.log").to_string()
}
