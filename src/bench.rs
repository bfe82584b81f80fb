//! Benchmark orchestration
//!
//! A benchmark goes through three phases:
//!
//! 1. **setup**: validate, prepare the target file, drop the page cache and wait
//!    for the setup padding
//! 2. **run**: the measured loop
//! 3. **teardown**: persist the I/O log, report the summary
//!
//! Any error ends the benchmark; nothing is reported for a failed run.

use crate::config::validator::validate_config;
use crate::config::Config;
use crate::distribution::OffsetGenerator;
use crate::engine::sync::SyncEngine;
use crate::output::{csv, json, text};
use crate::stats::{BenchmarkRun, Summary};
use crate::target::{clear_cache, TargetFile};
use crate::util::pacing::SetupPadding;
use crate::util::time::log_file_name;
use crate::worker::Worker;
use crate::Result;
use chrono::{DateTime, Local};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

/// A prepared benchmark, ready to run
pub struct Bench {
    config: Config,
    worker: Worker,
    seed: u64,
    started_at: Option<DateTime<Local>>,
}

/// What teardown produced
#[derive(Debug)]
pub struct Outcome {
    pub summary: Summary,
    pub log_path: Option<PathBuf>,
}

impl Bench {
    /// Validate `config` and prepare everything the measured loop needs
    ///
    /// Nothing on disk is touched when validation fails.
    pub fn setup(config: &Config) -> Result<Self> {
        validate_config(config)?;

        let padding = SetupPadding::start(Duration::from_millis(config.min_setup_ms))?;

        text::step_start("Preparing target file");
        let target = TargetFile::prepare(&config.workdir, config.file_size, config.preallocate)?;
        text::step_done();
        debug!(
            path = %target.path().display(),
            size = target.size(),
            grown = target.was_grown(),
            "target file ready"
        );

        if config.clear_cache {
            text::step_start("Clearing page cache");
            clear_cache(&config.cache_clear_command)?;
            text::step_done();
        } else {
            info!("page cache left untouched");
        }

        let setup_time = padding.join()?;
        debug!(?setup_time, "setup finished");

        let offsets = OffsetGenerator::from_config(config);
        let seed = offsets.seed();
        let engine = Box::new(SyncEngine::new(target.into_file()));
        let worker = Worker::new(config, offsets, engine)?;

        Ok(Self {
            config: config.clone(),
            worker,
            seed,
            started_at: None,
        })
    }

    /// Execute the measured loop
    pub fn run(&mut self) -> Result<BenchmarkRun> {
        text::step_start("\nRunning benchmark");
        self.started_at = Some(Local::now());
        let run = self.worker.run()?;
        text::step_done();
        Ok(run)
    }

    /// Persist and report a completed run
    pub fn teardown(self, run: &BenchmarkRun) -> Result<Outcome> {
        let started_at = self.started_at.unwrap_or_else(Local::now);

        let log_path = if self.config.write_log {
            let path = self.config.path_for(&log_file_name(&started_at));
            text::step_start("Writing log");
            csv::write_log(&path, run.pattern(), run.entries())?;
            text::step_done();
            info!(path = %path.display(), rows = run.len(), "I/O log written");
            Some(path)
        } else {
            None
        };

        let summary = Summary::from_run(run);
        println!();
        text::print_summary(&summary);

        if let Some(json_path) = &self.config.json_output {
            let mut report = json::JsonReport::new(
                started_at.to_rfc3339(),
                json::JsonRunConfig::new(&self.config, self.seed),
                summary.clone(),
            );
            report.log_file = log_path
                .as_ref()
                .and_then(|p| p.file_name())
                .map(|name| name.to_string_lossy().into_owned());
            json::write_json_output(json_path, &report, true)?;
            info!(path = %json_path.display(), "JSON summary written");
        }

        // The target file is closed when the worker (and its engine) drops here
        Ok(Outcome { summary, log_path })
    }
}

/// Run a complete benchmark: setup, measured loop, teardown
pub fn execute(config: &Config) -> Result<Outcome> {
    let mut bench = Bench::setup(config)?;
    let run = bench.run()?;
    bench.teardown(&run)
}
