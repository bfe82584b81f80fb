//! CLI to Config conversion utilities

use super::cli::Cli;
use super::toml::{parse_toml_file, ConfigFile};
use super::{validator, AccessPattern, Config};
use crate::error::BenchError;
use crate::Result;

/// Parse a size string (e.g., "4096", "4k", "100M", "1G") to bytes
///
/// Suffixes are binary multiples and case-insensitive; an optional trailing
/// `b`/`ib` is accepted (`4KiB`, `4kb`).
pub fn parse_size(s: &str) -> Result<u64> {
    let s = s.trim().to_lowercase();

    let split = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let (num_str, suffix) = s.split_at(split);

    let multiplier: u64 = match suffix.trim() {
        "" | "b" => 1,
        "k" | "kb" | "kib" => 1 << 10,
        "m" | "mb" | "mib" => 1 << 20,
        "g" | "gb" | "gib" => 1 << 30,
        "t" | "tb" | "tib" => 1 << 40,
        other => {
            return Err(BenchError::config(format!(
                "invalid size `{}`: unknown suffix `{}`",
                s, other
            )))
        }
    };

    let num: u64 = num_str
        .parse()
        .map_err(|_| BenchError::config(format!("invalid size `{}`: expected an integer", s)))?;

    num.checked_mul(multiplier)
        .ok_or_else(|| BenchError::config(format!("invalid size `{}`: value too large", s)))
}

/// Access pattern selected by the mutually exclusive I/O type flags
pub fn pattern_from_flags(cli: &Cli) -> Option<AccessPattern> {
    match (cli.rread, cli.rwrite, cli.sread, cli.swrite) {
        (true, _, _, _) => Some(AccessPattern::RandomRead),
        (_, true, _, _) => Some(AccessPattern::RandomWrite),
        (_, _, true, _) => Some(AccessPattern::SequentialRead),
        (_, _, _, true) => Some(AccessPattern::SequentialWrite),
        _ => None,
    }
}

/// Build a configuration from CLI arguments layered over an optional config file
///
/// Command-line values take precedence; anything left unset falls back to the
/// file, then to the built-in defaults. The result is not yet validated.
pub fn build_config(cli: &Cli, file: Option<ConfigFile>) -> Result<Config> {
    let file = file.unwrap_or_default();

    let pattern = pattern_from_flags(cli).or(file.pattern).ok_or_else(|| {
        BenchError::config(
            "I/O type must be specified out of `--rread`, `--rwrite`, `--sread`, `--swrite`",
        )
    })?;

    let workdir = cli
        .workdir
        .clone()
        .or(file.workdir)
        .ok_or_else(|| BenchError::config("argument `<WORKDIR>` must be specified"))?;

    let mut config = Config::new(workdir, pattern);

    if let Some(ref bs) = cli.block_size {
        config.block_size = parse_size(bs)?;
    } else if let Some(ref bs) = file.block_size {
        config.block_size = bs.to_bytes()?;
    }

    if let Some(count) = cli.count.or(file.op_count) {
        config.op_count = count;
    }

    if let Some(ref size) = cli.filesize {
        config.file_size = parse_size(size)?;
    } else if let Some(gib) = cli.filesize_gib {
        config.file_size = gib
            .checked_mul(1 << 30)
            .ok_or_else(|| BenchError::config(format!("file size {} GiB is too large", gib)))?;
    } else if let Some(ref size) = file.file_size {
        config.file_size = size.to_bytes()?;
    }

    config.clear_cache = !cli.no_clear_cache && file.clear_cache.unwrap_or(true);
    config.write_log = !cli.no_write_log && file.write_log.unwrap_or(true);
    config.op_timestamps = !cli.no_op_timestamps && file.op_timestamps.unwrap_or(true);
    config.preallocate = cli.preallocate || file.preallocate.unwrap_or(false);

    if let Some(ms) = cli.min_setup_ms.or(file.min_setup_ms) {
        config.min_setup_ms = ms;
    }
    if let Some(command) = file.cache_clear_command {
        config.cache_clear_command = command;
    }
    config.json_output = cli.json_output.clone().or(file.json_output);
    config.seed = cli.seed.or(file.seed);

    Ok(config)
}

/// Load the optional config file, merge the CLI over it, and validate the result
pub fn load_config(cli: &Cli) -> Result<Config> {
    let file = match cli.config {
        Some(ref path) => Some(parse_toml_file(path)?),
        None => None,
    };

    let config = build_config(cli, file)?;
    validator::validate_config(&config)?;
    Ok(config)
}
