//! Human-readable text output

use crate::config::Config;
use crate::stats::Summary;
use std::fmt::Write as _;
use std::io::{self, Write};

/// Startup banner describing the run
pub fn format_banner(config: &Config) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "benchmark-io; Simple file I/O benchmark.");
    let _ = writeln!(out);
    let _ = writeln!(out, "Config:");
    let _ = writeln!(out, "  Working directory  {}", config.workdir.display());
    let _ = writeln!(out, "  I/O type           {}", config.pattern);
    let _ = writeln!(out, "  Block size [byte]  {}", config.block_size);
    let _ = writeln!(out, "  Count              {}", config.op_count);
    let _ = writeln!(out, "  File size [GiB]    {}", format_gib(config.file_size));
    if let Some(seed) = config.seed {
        let _ = writeln!(out, "  Seed               {}", seed);
    }
    out
}

pub fn print_banner(config: &Config) {
    println!("{}", format_banner(config));
}

/// Summary block printed after a successful run
pub fn format_summary(summary: &Summary) -> String {
    format!(
        "Summary:\n  \
         Elapsed time  {:.3} [s]\n  \
         Throughput    {:.3} [MiB/s]\n  \
         IOPS          {:.3}\n  \
         Mean latency  {:.3} [ms]\n",
        summary.elapsed_secs, summary.throughput_mibps, summary.iops, summary.mean_latency_ms
    )
}

pub fn print_summary(summary: &Summary) {
    println!("{}", format_summary(summary));
}

/// Print `label ... ` without a newline; completed by [`step_done`]
pub fn step_start(label: &str) {
    print!("{} ... ", label);
    // Progress text only; a failed flush is not worth aborting over
    let _ = io::stdout().flush();
}

pub fn step_done() {
    println!("done.");
}

fn format_gib(bytes: u64) -> String {
    if bytes % (1 << 30) == 0 {
        (bytes >> 30).to_string()
    } else {
        format!("{:.3}", bytes as f64 / (1u64 << 30) as f64)
    }
}
