//! Measured execution loop
//!
//! The Worker issues exactly `op_count` operations, one at a time and in index
//! order, and records one [`LogEntry`](crate::stats::LogEntry) per operation.
//!
//! # Architecture
//!
//! The Worker ties together:
//! - **OffsetGenerator**: byte offset of every operation
//! - **IOEngine**: positions the cursor and transfers one block
//! - **BenchmarkRun**: the preallocated measurement log
//!
//! # Per-operation sequence
//!
//! 1. Take the offset for index `i`
//! 2. Random patterns seek to it; sequential patterns seek once, at `i == 0`
//! 3. Issue exactly one read or one write of `block_size` bytes from a reused buffer
//! 4. Writes are flushed with `sync_data` before the operation counts as complete
//! 5. Timestamp (unless per-operation timestamps are disabled)
//!
//! The first failure in steps 2-4 aborts the run. No further operations are
//! issued and the partial log is dropped.
//!
//! # Example
//!
//! ```no_run
//! use benchmark_io::config::{AccessPattern, Config};
//! use benchmark_io::distribution::OffsetGenerator;
//! use benchmark_io::engine::sync::SyncEngine;
//! use benchmark_io::target::TargetFile;
//! use benchmark_io::worker::Worker;
//!
//! let config = Config::new("/mnt/scratch", AccessPattern::RandomRead);
//! let target = TargetFile::prepare(&config.workdir, config.file_size, false)?;
//! let engine = Box::new(SyncEngine::new(target.into_file()));
//!
//! let mut worker = Worker::new(&config, OffsetGenerator::from_config(&config), engine)?;
//! let run = worker.run()?;
//! println!("completed {} operations", run.len());
//! # Ok::<(), benchmark_io::error::BenchError>(())
//! ```

use crate::config::{AccessPattern, Config};
use crate::distribution::OffsetGenerator;
use crate::engine::{IOEngine, OperationType};
use crate::error::BenchError;
use crate::stats::BenchmarkRun;
use crate::Result;
use std::fmt;
use std::io;
use tracing::{debug, warn};

/// Lifecycle of a worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Completed,
    Aborted,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RunState::Idle => "idle",
            RunState::Running => "running",
            RunState::Completed => "completed",
            RunState::Aborted => "aborted",
        };
        f.write_str(s)
    }
}

/// Single-threaded executor of one benchmark run
pub struct Worker {
    pattern: AccessPattern,
    block_size: u64,
    op_count: u64,
    op_timestamps: bool,
    offsets: OffsetGenerator,
    engine: Box<dyn IOEngine>,
    /// Reused for every operation; contents are never inspected
    buffer: Vec<u8>,
    state: RunState,
}

impl Worker {
    /// Create a worker for a validated configuration
    ///
    /// Allocates the transfer buffer; nothing is allocated once the run starts.
    pub fn new(config: &Config, offsets: OffsetGenerator, engine: Box<dyn IOEngine>) -> Result<Self> {
        let len = usize::try_from(config.block_size)
            .map_err(|_| BenchError::config("block size does not fit in memory"))?;
        usize::try_from(config.op_count)
            .map_err(|_| BenchError::config("operation count does not fit in memory"))?;

        Ok(Self {
            pattern: config.pattern,
            block_size: config.block_size,
            op_count: config.op_count,
            op_timestamps: config.op_timestamps,
            offsets,
            engine,
            buffer: vec![0u8; len],
            state: RunState::Idle,
        })
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Run all operations
    ///
    /// A worker runs once. On failure the worker is left `Aborted` and the error
    /// names the operation, its index and its offset.
    pub fn run(&mut self) -> Result<BenchmarkRun> {
        if self.state != RunState::Idle {
            return Err(BenchError::config(format!(
                "worker cannot start: already {}",
                self.state
            )));
        }

        // op_count was checked to fit usize in new()
        let mut run = BenchmarkRun::with_capacity(self.pattern, self.block_size, self.op_count as usize);

        debug!(
            pattern = %self.pattern,
            engine = self.engine.name(),
            block_size = self.block_size,
            op_count = self.op_count,
            "starting measured loop"
        );

        self.state = RunState::Running;
        run.start();

        for index in 0..self.op_count {
            let offset = self.offsets.offset(index);

            match self.issue(index, offset) {
                Ok(completed) => {
                    let timestamp = if self.op_timestamps { Some(run.mark()) } else { None };
                    run.record(timestamp, offset, completed as u64);
                }
                Err(e) => {
                    self.state = RunState::Aborted;
                    warn!(index, offset, "run aborted, discarding {} log entries", run.len());
                    return Err(e);
                }
            }
        }

        run.finish();
        self.state = RunState::Completed;
        debug!(elapsed = ?run.elapsed(), "measured loop completed");

        Ok(run)
    }

    /// Position, transfer and (for writes) flush one block
    #[inline(always)]
    fn issue(&mut self, index: u64, offset: u64) -> Result<usize> {
        if self.pattern.is_random() || index == 0 {
            self.engine
                .seek(offset)
                .map_err(|e| runtime(OperationType::Seek, index, offset, e))?;
        }

        if self.pattern.is_write() {
            let completed = self
                .engine
                .write(&self.buffer)
                .map_err(|e| runtime(OperationType::Write, index, offset, e))?;
            self.engine
                .sync()
                .map_err(|e| runtime(OperationType::Sync, index, offset, e))?;
            Ok(completed)
        } else {
            self.engine
                .read(&mut self.buffer)
                .map_err(|e| runtime(OperationType::Read, index, offset, e))
        }
    }
}

fn runtime(op: OperationType, index: u64, offset: u64, source: io::Error) -> BenchError {
    BenchError::RuntimeIo {
        op: op.as_str(),
        index,
        offset,
        source,
    }
}
