//! benchmark-io - Simple synchronous file I/O benchmark
//!
//! benchmark-io measures the latency, throughput and IOPS of a storage device by
//! issuing blocking reads or writes against a single target file, one operation
//! at a time, and logging every operation.
//!
//! # Architecture
//!
//! - **Access patterns**: sequential or random, read or write
//! - **Target file**: persistent, reused across runs, grown but never shrunk
//! - **Execution loop**: single-threaded, strictly ordered, fail-fast
//! - **Reporting**: per-operation CSV log, text summary, optional JSON

pub mod bench;
pub mod config;
pub mod distribution;
pub mod engine;
pub mod error;
pub mod output;
pub mod stats;
pub mod target;
pub mod util;
pub mod worker;

// Re-export commonly used types
pub use config::Config;
pub use engine::IOEngine;
pub use error::BenchError;
pub use worker::Worker;

/// Result type used throughout benchmark-io
pub type Result<T, E = BenchError> = std::result::Result<T, E>;
