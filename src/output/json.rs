//! JSON summary output
//!
//! Machine-readable counterpart of the text summary. Written only when an output
//! path is configured, after the run completed.

use crate::config::{AccessPattern, Config};
use crate::error::EnvContext;
use crate::stats::Summary;
use crate::Result;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Run parameters recorded next to the results
#[derive(Debug, Clone, Serialize)]
pub struct JsonRunConfig {
    pub workdir: PathBuf,
    pub pattern: AccessPattern,
    pub block_size: u64,
    pub op_count: u64,
    pub file_size: u64,
    pub clear_cache: bool,
    pub op_timestamps: bool,
    pub seed: u64,
}

impl JsonRunConfig {
    pub fn new(config: &Config, seed: u64) -> Self {
        Self {
            workdir: config.workdir.clone(),
            pattern: config.pattern,
            block_size: config.block_size,
            op_count: config.op_count,
            file_size: config.file_size,
            clear_cache: config.clear_cache,
            op_timestamps: config.op_timestamps,
            seed,
        }
    }
}

/// Top-level JSON document
#[derive(Debug, Clone, Serialize)]
pub struct JsonReport {
    pub tool: &'static str,
    pub version: &'static str,
    /// RFC 3339 wall-clock time the run started
    pub started_at: String,
    pub config: JsonRunConfig,
    pub summary: Summary,
    /// File name of the I/O log, when one was written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<String>,
}

impl JsonReport {
    pub fn new(started_at: String, config: JsonRunConfig, summary: Summary) -> Self {
        Self {
            tool: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            started_at,
            config,
            summary,
            log_file: None,
        }
    }
}

/// Write JSON output to file
pub fn write_json_output(output_path: &Path, report: &JsonReport, pretty: bool) -> Result<()> {
    let file = File::create(output_path).env_context("create JSON output")?;
    let mut writer = BufWriter::new(file);

    let serialized = if pretty {
        serde_json::to_writer_pretty(&mut writer, report)
    } else {
        serde_json::to_writer(&mut writer, report)
    };
    serialized.map_err(io::Error::from).env_context("write JSON output")?;

    writeln!(writer).env_context("write JSON output")?;
    writer.flush().env_context("flush JSON output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    fn report() -> JsonReport {
        let config = Config::new("/mnt/scratch", AccessPattern::SequentialRead);
        let summary = Summary::new(AccessPattern::SequentialRead, 100, 409_600, Duration::from_millis(50));
        JsonReport::new(
            "2024-03-09T07:05:01+00:00".to_string(),
            JsonRunConfig::new(&config, 42),
            summary,
        )
    }

    #[test]
    fn test_write_json_output() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("summary.json");

        write_json_output(&path, &report(), true).unwrap();

        let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["tool"], "benchmark-io");
        assert_eq!(value["config"]["pattern"], "sequential_read");
        assert_eq!(value["config"]["seed"], 42);
        assert_eq!(value["summary"]["op_count"], 100);
        assert_eq!(value["summary"]["iops"], 2000.0);
        assert!(value.get("log_file").is_none());
    }

    #[test]
    fn test_log_file_included_when_set() {
        let mut report = report();
        report.log_file = Some("benchmark-io_2024-03-09-07-05-01.log".to_string());

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["log_file"], "benchmark-io_2024-03-09-07-05-01.log");
    }

    #[test]
    fn test_write_json_output_bad_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("summary.json");

        assert!(write_json_output(&path, &report(), false).is_err());
    }
}
