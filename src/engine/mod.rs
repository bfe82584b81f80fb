//! IO engine abstraction
//!
//! An IO engine is the seam between the measured loop and the target file. The
//! loop never touches the file directly; it positions and transfers through this
//! trait, which lets tests substitute an engine that fails or transfers short on
//! demand.
//!
//! # Engine Types
//!
//! - **Synchronous**: blocking `read(2)`/`write(2)` on a cursor-based file handle
//! - **Mock** (tests only): scripted results, failure injection, call tracking
//!
//! Engines report plain `io::Error`s. The caller knows which operation index and
//! offset were in flight and attaches that context.
//!
//! # Example
//!
//! ```no_run
//! use benchmark_io::engine::{IOEngine, sync::SyncEngine};
//! use std::fs::OpenOptions;
//!
//! let file = OpenOptions::new().read(true).write(true).open("/tmp/benchmark-io.bin").unwrap();
//! let mut engine = SyncEngine::new(file);
//! let mut buffer = vec![0u8; 4096];
//!
//! engine.seek(8192).unwrap();
//! let n = engine.read(&mut buffer).unwrap();
//! println!("read {} bytes", n);
//! ```

#[cfg(test)]
pub mod mock;
pub mod sync;

use std::fmt;
use std::io;

/// IO engine trait
///
/// # Thread Safety
///
/// Engines must be `Send` so a prepared run can be handed to another thread, but
/// are never shared. Each run owns its engine.
///
/// # Transfers
///
/// `read` and `write` issue exactly one transfer and return the byte count the
/// kernel reported. Short transfers are not retried; the count is what gets
/// logged.
pub trait IOEngine: Send {
    /// Reposition the cursor to an absolute byte offset
    fn seek(&mut self, offset: u64) -> io::Result<()>;

    /// Read once at the cursor into `buf`
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Write `buf` once at the cursor
    fn write(&mut self, buf: &[u8]) -> io::Result<usize>;

    /// Make written data durable (`fdatasync` semantics)
    fn sync(&mut self) -> io::Result<()>;

    /// Engine name for log output
    fn name(&self) -> &'static str;
}

/// Type of IO operation issued through an engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationType {
    Seek,
    Read,
    Write,
    Sync,
}

impl OperationType {
    /// Name used in error context
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Seek => "seek",
            OperationType::Read => "read",
            OperationType::Write => "write",
            OperationType::Sync => "sync",
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
