//! CLI argument parsing using clap

use clap::{ArgGroup, Parser};
use std::path::PathBuf;

/// Simple file I/O benchmark.
///
/// Issues COUNT synchronous reads or writes of BS bytes against
/// WORKDIR/benchmark-io.bin and reports elapsed time, throughput, IOPS and
/// mean latency.
#[derive(Parser, Debug, Default)]
#[command(name = "benchmark-io")]
#[command(version, about, long_about = None)]
#[command(group(
    ArgGroup::new("io_type")
        .args(["rread", "rwrite", "sread", "swrite"])
        .multiple(false)
))]
pub struct Cli {
    /// Working directory holding the target file and the I/O log
    #[arg(value_name = "WORKDIR")]
    pub workdir: Option<PathBuf>,

    // === I/O type (exactly one) ===
    /// Issue random reads
    #[arg(long)]
    pub rread: bool,

    /// Issue random writes
    #[arg(long)]
    pub rwrite: bool,

    /// Issue sequential reads
    #[arg(long)]
    pub sread: bool,

    /// Issue sequential writes
    #[arg(long)]
    pub swrite: bool,

    // === Basic Options ===
    /// Block size of each I/O (e.g., 4096, 4k, 1M) [default: 4096]
    #[arg(short = 'b', long = "bs", value_name = "BYTES")]
    pub block_size: Option<String>,

    /// Total number of I/Os [default: 100000]
    #[arg(short = 'c', long = "count", value_name = "N")]
    pub count: Option<u64>,

    /// Target file size in bytes (e.g., 4096000, 512M, 2G)
    #[arg(long, value_name = "SIZE", conflicts_with = "filesize_gib")]
    pub filesize: Option<String>,

    /// Target file size in GiB [default: 1]
    #[arg(long, value_name = "GIB")]
    pub filesize_gib: Option<u64>,

    /// Skip clearing page cache in setup
    #[arg(long)]
    pub no_clear_cache: bool,

    /// Skip writing I/O log
    #[arg(long)]
    pub no_write_log: bool,

    // === Measurement Options ===
    /// Keep only start/finish timestamps instead of one per operation
    #[arg(long)]
    pub no_op_timestamps: bool,

    /// Grow the target file with posix_fallocate() instead of ftruncate()
    #[arg(long)]
    pub preallocate: bool,

    /// Pad the setup phase to at least this many milliseconds
    #[arg(long, value_name = "MS")]
    pub min_setup_ms: Option<u64>,

    /// Seed for random offsets (default: derived from the current time)
    #[arg(long)]
    pub seed: Option<u64>,

    // === Output Options ===
    /// Write the summary as JSON to this file
    #[arg(long, value_name = "PATH")]
    pub json_output: Option<PathBuf>,

    /// TOML configuration file (command-line options take precedence)
    #[arg(long, value_name = "PATH", env = "BENCHMARK_IO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Validate configuration and exit without performing I/O
    #[arg(long)]
    pub dry_run: bool,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Log level selected by the verbosity count
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal() {
        let cli = Cli::try_parse_from(["benchmark-io", "--swrite", "/tmp/work"]).unwrap();
        assert!(cli.swrite);
        assert!(!cli.rread);
        assert_eq!(cli.workdir, Some(PathBuf::from("/tmp/work")));
        assert_eq!(cli.block_size, None);
        assert_eq!(cli.count, None);
    }

    #[test]
    fn test_parse_all_basic_options() {
        let cli = Cli::try_parse_from([
            "benchmark-io",
            "-b",
            "8k",
            "-c",
            "1000",
            "--filesize",
            "64M",
            "--no-clear-cache",
            "--no-write-log",
            "--rread",
            "/tmp/work",
        ])
        .unwrap();
        assert_eq!(cli.block_size.as_deref(), Some("8k"));
        assert_eq!(cli.count, Some(1000));
        assert_eq!(cli.filesize.as_deref(), Some("64M"));
        assert!(cli.no_clear_cache);
        assert!(cli.no_write_log);
        assert!(cli.rread);
    }

    #[test]
    fn test_io_type_flags_are_exclusive() {
        let result = Cli::try_parse_from(["benchmark-io", "--rread", "--swrite", "/tmp"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_filesize_flags_conflict() {
        let result = Cli::try_parse_from([
            "benchmark-io",
            "--sread",
            "--filesize",
            "1G",
            "--filesize-gib",
            "1",
            "/tmp",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_non_numeric_count_rejected() {
        let result = Cli::try_parse_from(["benchmark-io", "--sread", "-c", "many", "/tmp"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verbosity() {
        let cli = Cli::try_parse_from(["benchmark-io", "-vv", "--sread", "/tmp"]).unwrap();
        assert_eq!(cli.log_level(), "debug");
    }
}
