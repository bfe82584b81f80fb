//! Page-cache invalidation
//!
//! Cached pages of the target file would turn reads into memory copies, so the
//! kernel page cache is dropped once before the measured loop. This needs
//! privileges; the command is external and configurable.

use crate::error::BenchError;
use crate::Result;
use std::io;
use std::process::Command;
use tracing::{debug, info};

/// Run the cache invalidation command and wait for it
///
/// The command's stdio is inherited so `sudo` can prompt. A spawn failure is an
/// environment error, and so is a non-zero exit.
pub fn clear_cache(command: &[String]) -> Result<()> {
    let (program, args) = command
        .split_first()
        .ok_or_else(|| BenchError::config("cache clear command is empty"))?;

    let rendered = command.join(" ");
    debug!(command = %rendered, "clearing page cache");

    let status = Command::new(program)
        .args(args)
        .status()
        .map_err(|e| BenchError::env("spawn cache clear command", e))?;

    if !status.success() {
        return Err(BenchError::env(
            "clear page cache",
            io::Error::new(
                io::ErrorKind::Other,
                format!("command `{}` failed: {}", rendered, status),
            ),
        ));
    }

    info!("page cache cleared");
    Ok(())
}
