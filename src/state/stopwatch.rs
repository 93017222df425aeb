//! Stopwatch state

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;

/// Display shown by a stopwatch that has never run or was just reset
pub const STOPWATCH_ZERO: &str = "00:00:00";

/// A stopwatch that counts up from a virtual start instant.
///
/// Resuming moves the start instant back by the time already accumulated,
/// so elapsed time is always `now - started_at` while running.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stopwatch {
    started_at: Option<Instant>,
    elapsed: Duration,
}

impl Stopwatch {
    /// Start or resume. Returns `false` if already running.
    pub fn start(&mut self) -> bool {
        if self.started_at.is_some() {
            return false;
        }
        let now = Instant::now();
        self.started_at = Some(now.checked_sub(self.elapsed).unwrap_or(now));
        true
    }

    /// Stop and keep the accumulated time
    pub fn stop(&mut self) {
        if let Some(started) = self.started_at.take() {
            self.elapsed = started.elapsed();
        }
    }

    /// Stop and zero the accumulated time
    pub fn reset(&mut self) {
        self.started_at = None;
        self.elapsed = Duration::ZERO;
    }

    /// Recompute elapsed time from the start instant
    pub fn tick(&mut self) -> Duration {
        if let Some(started) = self.started_at {
            self.elapsed = started.elapsed();
        }
        self.elapsed
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn elapsed(&self) -> Duration {
        match self.started_at {
            Some(started) => started.elapsed(),
            None => self.elapsed,
        }
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed().as_secs()
    }
}

/// Serializable view of the stopwatch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopwatchSnapshot {
    pub running: bool,
    pub elapsed_seconds: u64,
    pub display: String,
}
