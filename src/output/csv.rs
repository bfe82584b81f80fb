//! I/O log persistence
//!
//! The per-operation log is written as CSV to the working directory after a
//! successful run. One header row, then one row per operation in issue order:
//!
//! ```text
//! elapsed_time,io_type,offset,issue_bytes,complete_bytes
//! 0.000153204,RR,1830912,4096,4096
//! ```
//!
//! `elapsed_time` is `secs.nanos` since the run started and is left empty when
//! per-operation timestamps were disabled. The log can be read back with
//! [`read_log`] to recompute the summary.

use crate::config::AccessPattern;
use crate::error::{BenchError, EnvContext};
use crate::stats::LogEntry;
use crate::util::time::{format_elapsed, parse_elapsed};
use crate::Result;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Header row of the I/O log
pub const LOG_HEADER: &str = "elapsed_time,io_type,offset,issue_bytes,complete_bytes";

/// Contents of a persisted I/O log
#[derive(Debug, Clone, PartialEq)]
pub struct IoLog {
    /// `None` for a log without rows
    pub pattern: Option<AccessPattern>,
    pub rows: Vec<LogEntry>,
}

/// Write the I/O log for one run
///
/// The file is created (or truncated) at `path`.
pub fn write_log(path: &Path, pattern: AccessPattern, entries: &[LogEntry]) -> Result<()> {
    let file = File::create(path).env_context("create log file")?;
    let mut writer = BufWriter::new(file);

    write_rows(&mut writer, pattern, entries).env_context("write log file")?;
    writer
        .into_inner()
        .map_err(|e| e.into_error())
        .env_context("flush log file")?;
    Ok(())
}

fn write_rows<W: Write>(writer: &mut W, pattern: AccessPattern, entries: &[LogEntry]) -> io::Result<()> {
    writeln!(writer, "{}", LOG_HEADER)?;
    let io_type = pattern.abbrev();
    for entry in entries {
        let elapsed = entry.timestamp.map(format_elapsed).unwrap_or_default();
        writeln!(
            writer,
            "{},{},{},{},{}",
            elapsed, io_type, entry.offset, entry.issued_bytes, entry.completed_bytes
        )?;
    }
    writer.flush()
}

/// Read an I/O log written by [`write_log`]
pub fn read_log(path: &Path) -> Result<IoLog> {
    let file = File::open(path).env_context("open log file")?;
    let mut lines = BufReader::new(file).lines();

    let header = lines.next().transpose().env_context("read log file")?;
    if header.as_deref().map(str::trim) != Some(LOG_HEADER) {
        return Err(invalid("missing or unexpected header"));
    }

    let mut pattern = None;
    let mut rows = Vec::new();
    for (n, line) in lines.enumerate() {
        let line = line.env_context("read log file")?;
        if line.trim().is_empty() {
            continue;
        }
        // Data rows start on line 2
        let (row_pattern, entry) = parse_row(&line).ok_or_else(|| invalid(format!("malformed row at line {}", n + 2)))?;

        match pattern {
            None => pattern = Some(row_pattern),
            Some(p) if p != row_pattern => {
                return Err(invalid(format!("mixed io_type at line {}", n + 2)));
            }
            Some(_) => {}
        }
        rows.push(entry);
    }

    Ok(IoLog { pattern, rows })
}

fn parse_row(line: &str) -> Option<(AccessPattern, LogEntry)> {
    let mut fields = line.trim().split(',');
    let elapsed = fields.next()?;
    let pattern = AccessPattern::from_abbrev(fields.next()?)?;
    let offset = fields.next()?.parse().ok()?;
    let issued_bytes = fields.next()?.parse().ok()?;
    let completed_bytes = fields.next()?.parse().ok()?;
    if fields.next().is_some() {
        return None;
    }

    let timestamp = if elapsed.is_empty() {
        None
    } else {
        Some(parse_elapsed(elapsed)?)
    };

    Some((
        pattern,
        LogEntry {
            timestamp,
            offset,
            issued_bytes,
            completed_bytes,
        },
    ))
}

fn invalid(msg: impl Into<String>) -> BenchError {
    BenchError::env("parse log file", io::Error::new(io::ErrorKind::InvalidData, msg.into()))
}
