//! Error types
//!
//! Every failure in benchmark-io is fatal. Errors are never recovered locally;
//! they carry the name of the operation that failed plus the underlying cause
//! and propagate up to the single handler in `main`.
//!
//! The three kinds map to the phase in which the failure happened:
//!
//! - **Configuration**: rejected before any I/O is performed
//! - **Environment**: working directory, target file, cache invalidation, log output
//! - **RuntimeIo**: a read, write, seek or flush inside the measured loop

use std::io;
use thiserror::Error;

/// Fatal benchmark error
#[derive(Debug, Error)]
pub enum BenchError {
    /// Invalid, missing or inconsistent configuration
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The environment could not be prepared (or torn down)
    #[error("{op} failed")]
    Environment {
        op: &'static str,
        #[source]
        source: io::Error,
    },

    /// An operation inside the measured loop failed
    #[error("{op} failed at operation {index} (offset {offset})")]
    RuntimeIo {
        op: &'static str,
        index: u64,
        offset: u64,
        #[source]
        source: io::Error,
    },
}

impl BenchError {
    /// Build a configuration error from any displayable message
    pub fn config(msg: impl Into<String>) -> Self {
        BenchError::Configuration(msg.into())
    }

    /// Wrap an OS error raised while preparing the environment
    pub fn env(op: &'static str, source: io::Error) -> Self {
        BenchError::Environment { op, source }
    }

    /// Whether this error was raised before any I/O took place
    pub fn is_configuration(&self) -> bool {
        matches!(self, BenchError::Configuration(_))
    }

    /// This error and all of its causes, joined by `": "`
    pub fn display_chain(&self) -> String {
        let mut out = self.to_string();
        let mut cause = std::error::Error::source(self);
        while let Some(err) = cause {
            out.push_str(": ");
            out.push_str(&err.to_string());
            cause = std::error::Error::source(err);
        }
        out
    }

    /// Process exit code used by the top-level handler
    pub fn exit_code(&self) -> i32 {
        match self {
            BenchError::Configuration(_) => 2,
            _ => 1,
        }
    }
}

/// Attach an operation name to fallible environment calls
pub trait EnvContext<T> {
    fn env_context(self, op: &'static str) -> Result<T, BenchError>;
}

impl<T> EnvContext<T> for io::Result<T> {
    fn env_context(self, op: &'static str) -> Result<T, BenchError> {
        self.map_err(|e| BenchError::env(op, e))
    }
}
