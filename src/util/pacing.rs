//! Setup phase padding
//!
//! Pads the setup phase to a minimum wall-clock duration. The padding runs on its
//! own thread, started before the target file is prepared, and shares no data
//! with the measured path. It must be joined before the first operation is
//! issued.

use crate::error::{BenchError, EnvContext};
use crate::Result;
use std::io;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Background timer that completes once the minimum setup time has elapsed
pub struct SetupPadding {
    started: Instant,
    handle: Option<JoinHandle<()>>,
}

impl SetupPadding {
    /// Start the padding timer; a zero duration spawns nothing
    pub fn start(min: Duration) -> Result<Self> {
        let started = Instant::now();
        let handle = if min.is_zero() {
            None
        } else {
            let handle = thread::Builder::new()
                .name("setup-padding".to_string())
                .spawn(move || {
                    let remaining = min.saturating_sub(started.elapsed());
                    thread::sleep(remaining);
                })
                .env_context("spawn setup padding")?;
            Some(handle)
        };

        Ok(Self { started, handle })
    }

    /// Wait for the padding to finish; returns the total setup duration
    pub fn join(mut self) -> Result<Duration> {
        if let Some(handle) = self.handle.take() {
            handle.join().map_err(|_| {
                BenchError::env(
                    "join setup padding",
                    io::Error::new(io::ErrorKind::Other, "padding thread panicked"),
                )
            })?;
        }
        Ok(self.started.elapsed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_padding_returns_immediately() {
        let padding = SetupPadding::start(Duration::ZERO).unwrap();
        let elapsed = padding.join().unwrap();
        assert!(elapsed < Duration::from_millis(50));
    }

    #[test]
    fn test_padding_enforces_minimum() {
        let padding = SetupPadding::start(Duration::from_millis(30)).unwrap();
        let elapsed = padding.join().unwrap();
        assert!(elapsed >= Duration::from_millis(30));
    }

    #[test]
    fn test_padding_overlaps_setup_work() {
        let padding = SetupPadding::start(Duration::from_millis(40)).unwrap();
        thread::sleep(Duration::from_millis(40));
        let before_join = Instant::now();
        padding.join().unwrap();
        // Work already covered the padding, so joining is (nearly) free
        assert!(before_join.elapsed() < Duration::from_millis(30));
    }
}
