//! Configuration validation
//!
//! Every check here runs before the target file is touched, so a rejected
//! configuration never causes any I/O.

use super::Config;
use crate::error::BenchError;
use crate::Result;

/// Validate complete configuration
pub fn validate_config(config: &Config) -> Result<()> {
    validate_shape(config)?;
    validate_size_invariant(config)?;
    validate_cache_command(config)?;
    Ok(())
}

/// Block size and operation count must be positive and addressable
fn validate_shape(config: &Config) -> Result<()> {
    if config.block_size == 0 {
        return Err(BenchError::config("block size must be greater than 0"));
    }
    if usize::try_from(config.block_size).is_err() {
        return Err(BenchError::config(format!(
            "block size {} does not fit in memory",
            config.block_size
        )));
    }
    if config.op_count == 0 {
        return Err(BenchError::config("operation count must be greater than 0"));
    }
    if usize::try_from(config.op_count).is_err() {
        return Err(BenchError::config(format!(
            "operation count {} is too large for the I/O log",
            config.op_count
        )));
    }
    if i64::try_from(config.file_size).is_err() {
        return Err(BenchError::config(format!(
            "file size {} exceeds the maximum file offset",
            config.file_size
        )));
    }
    if !config.block_size.is_power_of_two() {
        tracing::warn!(block_size = config.block_size, "block size is not a power of 2");
    }
    Ok(())
}

/// `file_size >= block_size * op_count`
pub fn validate_size_invariant(config: &Config) -> Result<()> {
    let required = config
        .block_size
        .checked_mul(config.op_count)
        .ok_or_else(|| {
            BenchError::config(format!(
                "block size ({}) * count ({}) overflows",
                config.block_size, config.op_count
            ))
        })?;

    if config.file_size < required {
        return Err(BenchError::config(format!(
            "file size ({} bytes) must be at least block size ({}) * count ({}) = {} bytes",
            config.file_size, config.block_size, config.op_count, required
        )));
    }
    Ok(())
}

fn validate_cache_command(config: &Config) -> Result<()> {
    if config.clear_cache && config.cache_clear_command.is_empty() {
        return Err(BenchError::config(
            "cache clearing is enabled but cache_clear_command is empty",
        ));
    }
    Ok(())
}
