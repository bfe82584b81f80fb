//! Low-level file sizing
//!
//! Thin wrappers around `ftruncate(2)` and `posix_fallocate(3)`. Both only ever
//! extend the file; callers check the current size first.

use std::fs::File;
use std::io;
use std::os::unix::io::AsRawFd;

/// How a too-small target file is grown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowStrategy {
    /// `ftruncate`: logical size only, the new range stays sparse
    Truncate,
    /// `posix_fallocate`: reserve real blocks for the new range
    Preallocate,
}

impl GrowStrategy {
    pub fn from_preallocate(preallocate: bool) -> Self {
        if preallocate {
            GrowStrategy::Preallocate
        } else {
            GrowStrategy::Truncate
        }
    }

    /// Name used in error context and log output
    pub fn op_name(&self) -> &'static str {
        match self {
            GrowStrategy::Truncate => "ftruncate target",
            GrowStrategy::Preallocate => "posix_fallocate target",
        }
    }
}

fn to_off_t(value: u64) -> io::Result<libc::off_t> {
    libc::off_t::try_from(value).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} does not fit in off_t", value),
        )
    })
}

/// Extend `file` from `current` to `size` bytes
pub fn grow(file: &File, current: u64, size: u64, strategy: GrowStrategy) -> io::Result<()> {
    let fd = file.as_raw_fd();

    match strategy {
        GrowStrategy::Truncate => {
            let len = to_off_t(size)?;
            let result = unsafe { libc::ftruncate(fd, len) };
            if result < 0 {
                return Err(io::Error::last_os_error());
            }
        }
        GrowStrategy::Preallocate => {
            // Only the missing tail needs blocks reserved
            let offset = to_off_t(current)?;
            let len = to_off_t(size - current)?;
            // posix_fallocate returns the error number instead of setting errno
            let result = unsafe { libc::posix_fallocate(fd, offset, len) };
            if result != 0 {
                return Err(io::Error::from_raw_os_error(result));
            }
        }
    }

    Ok(())
}
