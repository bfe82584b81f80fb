//! Target file management
//!
//! A run operates on exactly one file, `benchmark-io.bin` inside the working
//! directory. The file persists across runs and is reused as-is when it is already
//! large enough; it is grown when too small and never shrunk or truncated.
//!
//! # Lifecycle
//!
//! 1. [`TargetFile::prepare`] checks the working directory, opens the file and
//!    sizes it
//! 2. The handle is handed to the IO engine for the measured loop
//! 3. The file is closed when the engine is dropped at teardown
//!
//! # Example
//!
//! ```no_run
//! use benchmark_io::target::TargetFile;
//! use std::path::Path;
//!
//! let target = TargetFile::prepare(Path::new("/mnt/scratch"), 1 << 30, false).unwrap();
//! assert!(target.size() >= 1 << 30);
//! ```

pub mod cache;
pub mod file;

pub use cache::clear_cache;

use crate::config::TARGET_FILE_NAME;
use crate::error::{BenchError, EnvContext};
use crate::Result;
use file::GrowStrategy;
use std::fs::{File, OpenOptions};
use std::io::{self, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Open, correctly sized target file positioned at offset 0
#[derive(Debug)]
pub struct TargetFile {
    path: PathBuf,
    file: File,
    size: u64,
    grown: bool,
}

impl TargetFile {
    /// Prepare `<workdir>/benchmark-io.bin` with at least `required_size` bytes
    ///
    /// Existing content below `required_size` is preserved; a larger file is left
    /// untouched. With `preallocate` set, missing space is reserved with
    /// `posix_fallocate` instead of being left sparse.
    pub fn prepare(workdir: &Path, required_size: u64, preallocate: bool) -> Result<Self> {
        let meta = std::fs::metadata(workdir).env_context("access working directory")?;
        if !meta.is_dir() {
            return Err(BenchError::env(
                "access working directory",
                io::Error::new(
                    io::ErrorKind::Other,
                    format!("{} is not a directory", workdir.display()),
                ),
            ));
        }

        let path = workdir.join(TARGET_FILE_NAME);
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .env_context("open target file")?;

        let current = file.metadata().env_context("stat target file")?.len();
        let mut size = current;
        let mut grown = false;

        if current < required_size {
            let strategy = GrowStrategy::from_preallocate(preallocate);
            info!(
                path = %path.display(),
                from = current,
                to = required_size,
                "growing target file"
            );
            file::grow(&file, current, required_size, strategy).env_context(strategy.op_name())?;
            size = required_size;
            grown = true;
        } else {
            debug!(path = %path.display(), size = current, "reusing target file");
        }

        file.seek(SeekFrom::Start(0)).env_context("rewind target file")?;

        Ok(Self {
            path,
            file,
            size,
            grown,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Size of the file after preparation
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Whether preparation had to extend the file
    pub fn was_grown(&self) -> bool {
        self.grown
    }

    /// Give up ownership of the open handle
    pub fn into_file(self) -> File {
        self.file
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use tempfile::TempDir;

    #[test]
    fn test_prepare_creates_file() {
        let temp_dir = TempDir::new().unwrap();

        let target = TargetFile::prepare(temp_dir.path(), 1024 * 1024, false).unwrap();
        assert_eq!(target.size(), 1024 * 1024);
        assert!(target.was_grown());
        assert_eq!(target.path(), temp_dir.path().join(TARGET_FILE_NAME));

        let metadata = std::fs::metadata(temp_dir.path().join(TARGET_FILE_NAME)).unwrap();
        assert_eq!(metadata.len(), 1024 * 1024);
    }

    #[test]
    fn test_prepare_preallocate() {
        let temp_dir = TempDir::new().unwrap();

        let target = TargetFile::prepare(temp_dir.path(), 256 * 1024, true).unwrap();
        assert_eq!(target.size(), 256 * 1024);
        assert_eq!(target.into_file().metadata().unwrap().len(), 256 * 1024);
    }

    #[test]
    fn test_prepare_reuses_larger_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(TARGET_FILE_NAME);
        let mut content = vec![0u8; 8192];
        content[..4].copy_from_slice(b"data");
        std::fs::write(&path, &content).unwrap();

        let target = TargetFile::prepare(temp_dir.path(), 4096, false).unwrap();
        assert_eq!(target.size(), 8192);
        assert!(!target.was_grown());
        drop(target);

        // Never shrunk, never rewritten
        let after = std::fs::read(&path).unwrap();
        assert_eq!(after, content);
    }

    #[test]
    fn test_prepare_grows_smaller_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(TARGET_FILE_NAME);
        std::fs::write(&path, b"prefix").unwrap();

        let target = TargetFile::prepare(temp_dir.path(), 4096, false).unwrap();
        assert!(target.was_grown());
        drop(target);

        let after = std::fs::read(&path).unwrap();
        assert_eq!(after.len(), 4096);
        assert_eq!(&after[..6], b"prefix");
    }

    #[test]
    fn test_prepare_positions_at_start() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(TARGET_FILE_NAME);
        std::fs::write(&path, b"abcdefgh").unwrap();

        let mut file = TargetFile::prepare(temp_dir.path(), 8, false).unwrap().into_file();
        assert_eq!(file.stream_position().unwrap(), 0);

        let mut buf = [0u8; 3];
        file.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"abc");
        file.write_all(b"XY").unwrap();
    }

    #[test]
    fn test_prepare_missing_workdir() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("does-not-exist");

        let err = TargetFile::prepare(&missing, 4096, false).unwrap_err();
        assert!(matches!(err, BenchError::Environment { op: "access working directory", .. }));
        assert!(!missing.exists());
    }

    #[test]
    fn test_prepare_workdir_is_file() {
        let temp_dir = TempDir::new().unwrap();
        let not_dir = temp_dir.path().join("plain");
        std::fs::write(&not_dir, b"x").unwrap();

        let err = TargetFile::prepare(&not_dir, 4096, false).unwrap_err();
        assert!(err.display_chain().contains("is not a directory"));
    }
}
