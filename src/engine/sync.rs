//! Synchronous IO engine
//!
//! Blocking, cursor-based IO on a `std::fs::File`. Each call maps to a single
//! syscall: `lseek`, `read`, `write` or `fdatasync`. Sequential runs only seek
//! once and let the kernel advance the file offset.
//!
//! # Performance
//!
//! One operation is in flight at a time (queue depth 1). No call allocates.

use super::IOEngine;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom, Write};

/// Synchronous IO engine over an open file handle
///
/// The handle is closed when the engine is dropped.
pub struct SyncEngine {
    file: File,
}

impl SyncEngine {
    /// Create a new synchronous IO engine that owns `file`
    pub fn new(file: File) -> Self {
        Self { file }
    }

    #[cfg(test)]
    fn position(&mut self) -> io::Result<u64> {
        self.file.stream_position()
    }
}

impl IOEngine for SyncEngine {
    #[inline]
    fn seek(&mut self, offset: u64) -> io::Result<()> {
        self.file.seek(SeekFrom::Start(offset)).map(|_| ())
    }

    #[inline]
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }

    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    #[inline]
    fn sync(&mut self) -> io::Result<()> {
        self.file.sync_data()
    }

    fn name(&self) -> &'static str {
        "sync"
    }
}
