//! Configuration module
//!
//! Handles CLI argument parsing, TOML configuration files, and validation.
//! A [`Config`] is built once before the run starts and is never mutated
//! afterwards.

pub mod cli;
pub mod cli_convert;
pub mod toml;
pub mod validator;
pub mod workload;

use std::path::{Path, PathBuf};

pub use workload::AccessPattern;

/// File name of the target file inside the working directory
pub const TARGET_FILE_NAME: &str = "benchmark-io.bin";

/// Default block size of every issued I/O
pub const DEFAULT_BLOCK_SIZE: u64 = 4096;

/// Default number of issued I/Os
pub const DEFAULT_OP_COUNT: u64 = 100_000;

/// Default target file size (1 GiB)
pub const DEFAULT_FILE_SIZE: u64 = 1 << 30;

/// Complete benchmark configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Directory holding the target file and the I/O log
    pub workdir: PathBuf,
    /// Access pattern used for every operation
    pub pattern: AccessPattern,
    /// Size of each read/write in bytes
    pub block_size: u64,
    /// Number of operations to issue
    pub op_count: u64,
    /// Minimum size of the target file in bytes
    pub file_size: u64,
    /// Invalidate the page cache before measuring
    pub clear_cache: bool,
    /// Persist the per-operation log after the run
    pub write_log: bool,
    /// Record a timestamp after every operation (start/finish only when false)
    pub op_timestamps: bool,
    /// Grow the target with posix_fallocate instead of ftruncate
    pub preallocate: bool,
    /// Minimum wall-clock duration of the setup phase
    pub min_setup_ms: u64,
    /// Privileged command that drops the page cache
    pub cache_clear_command: Vec<String>,
    /// Optional JSON summary output path
    pub json_output: Option<PathBuf>,
    /// Fixed seed for random offsets (time-derived when absent)
    pub seed: Option<u64>,
}

/// Default page-cache invalidation command
pub fn default_cache_clear_command() -> Vec<String> {
    ["sudo", "sysctl", "-w", "vm.drop_caches=3"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Config {
    /// Create a configuration with default settings for the given run shape
    pub fn new(workdir: impl Into<PathBuf>, pattern: AccessPattern) -> Self {
        Self {
            workdir: workdir.into(),
            pattern,
            block_size: DEFAULT_BLOCK_SIZE,
            op_count: DEFAULT_OP_COUNT,
            file_size: DEFAULT_FILE_SIZE,
            clear_cache: true,
            write_log: true,
            op_timestamps: true,
            preallocate: false,
            min_setup_ms: 0,
            cache_clear_command: default_cache_clear_command(),
            json_output: None,
            seed: None,
        }
    }

    /// Path of a file inside the working directory
    pub fn path_for(&self, filename: &str) -> PathBuf {
        Path::new(&self.workdir).join(filename)
    }

    /// Path of the target file
    #[cfg(test)]
    pub(crate) fn target_path(&self) -> PathBuf {
        self.path_for(TARGET_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::new("/tmp", AccessPattern::SequentialRead);
        assert_eq!(config.block_size, 4096);
        assert_eq!(config.op_count, 100_000);
        assert_eq!(config.file_size, 1 << 30);
        assert!(config.clear_cache);
        assert!(config.write_log);
        assert!(config.op_timestamps);
        assert_eq!(config.cache_clear_command[0], "sudo");
    }

    #[test]
    fn test_target_path() {
        let config = Config::new("/data/bench", AccessPattern::RandomWrite);
        assert_eq!(config.target_path(), PathBuf::from("/data/bench/benchmark-io.bin"));
    }
}
