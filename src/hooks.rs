//! Timed measurement regions.
//!
//! A [`Region`] brackets exactly one measured unit of work (a batch insert
//! or one kernel invocation). The guard records wall-clock time on drop, so
//! begin/end stay paired on every exit path, including early returns from
//! the bracketed call.

use std::time::{Duration, Instant};

use tracing::info;

/// RAII guard for one timed measurement region.
#[derive(Debug)]
pub struct Region {
    name: &'static str,
    trial: usize,
    start: Instant,
}

impl Region {
    /// Open a region named `name`, tagged with the trial it belongs to.
    pub fn enter(name: &'static str, trial: usize) -> Self {
        Self {
            name,
            trial,
            start: Instant::now(),
        }
    }

    /// Time elapsed since the region was opened.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for Region {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        info!(
            region = self.name,
            trial = self.trial,
            elapsed_us = elapsed.as_micros() as u64,
            "region complete"
        );
    }
}
