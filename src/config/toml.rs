//! TOML configuration file parsing
//!
//! A configuration file may set any subset of the run parameters. Values given
//! on the command line take precedence over the file (see
//! [`cli_convert::build_config`](super::cli_convert::build_config)).
//!
//! ```toml
//! workdir = "/mnt/nvme0/bench"
//! pattern = "random_read"
//! block_size = "4k"
//! op_count = 100000
//! file_size = "1G"
//! clear_cache = false
//! cache_clear_command = ["sudo", "sysctl", "-w", "vm.drop_caches=3"]
//! ```

use crate::error::BenchError;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::AccessPattern;

/// Size value accepted in a config file: a plain number of bytes or a suffixed string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SizeValue {
    Bytes(u64),
    Text(String),
}

impl SizeValue {
    /// Resolve the value to bytes
    pub fn to_bytes(&self) -> Result<u64> {
        match self {
            SizeValue::Bytes(n) => Ok(*n),
            SizeValue::Text(s) => super::cli_convert::parse_size(s),
        }
    }
}

/// Contents of a TOML configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub workdir: Option<PathBuf>,
    pub pattern: Option<AccessPattern>,
    pub block_size: Option<SizeValue>,
    pub op_count: Option<u64>,
    pub file_size: Option<SizeValue>,
    pub clear_cache: Option<bool>,
    pub write_log: Option<bool>,
    pub op_timestamps: Option<bool>,
    pub preallocate: Option<bool>,
    pub min_setup_ms: Option<u64>,
    pub cache_clear_command: Option<Vec<String>>,
    pub json_output: Option<PathBuf>,
    pub seed: Option<u64>,
}

/// Parse TOML configuration file
pub fn parse_toml_file(path: &Path) -> Result<ConfigFile> {
    let contents = fs::read_to_string(path).map_err(|e| {
        BenchError::config(format!("failed to read config file {}: {}", path.display(), e))
    })?;

    parse_toml_string(&contents).map_err(|e| match e {
        BenchError::Configuration(msg) => {
            BenchError::config(format!("{}: {}", path.display(), msg))
        }
        other => other,
    })
}

/// Parse TOML configuration from string
pub fn parse_toml_string(contents: &str) -> Result<ConfigFile> {
    ::toml::from_str(contents)
        .map_err(|e| BenchError::config(format!("failed to parse TOML configuration: {}", e)))
}
