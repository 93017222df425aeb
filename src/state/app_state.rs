//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tracing::info;

use super::{CountdownTimer, Section, StopwatchSnapshot, WarningLog};
use crate::{
    services::AlertNotifier,
    tasks::{ClockTask, CountdownTask, Scheduler, StopwatchTask},
    utils::lock,
};

/// Main application state that owns the clock, stopwatch and countdown
pub struct AppState {
    /// Widget components
    pub clock: ClockTask,
    pub stopwatch: StopwatchTask,
    pub countdown: CountdownTask,
    /// Warnings waiting to be shown to the user
    pub warnings: WarningLog,
    /// Section currently shown by the shell
    section: Mutex<Section>,
    scheduler: Arc<dyn Scheduler>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    last_action: Mutex<Option<String>>,
    last_action_time: Mutex<Option<DateTime<Utc>>>,
}

impl AppState {
    /// Create a new AppState with an idle countdown of `initial_seconds`
    pub fn new(
        port: u16,
        host: String,
        initial_seconds: u64,
        scheduler: Arc<dyn Scheduler>,
        notifier: Arc<dyn AlertNotifier>,
    ) -> Self {
        let warnings = WarningLog::new();

        Self {
            clock: ClockTask::new(),
            stopwatch: StopwatchTask::new(Arc::clone(&scheduler)),
            countdown: CountdownTask::new(
                CountdownTimer::new(initial_seconds),
                Arc::clone(&scheduler),
                notifier,
                warnings.clone(),
            ),
            warnings,
            section: Mutex::new(Section::default()),
            scheduler,
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
        }
    }

    /// Start the wall clock; it runs until the process exits
    pub fn start_clock(&self) {
        self.clock.start(self.scheduler.as_ref());
    }

    /// Record a user action for status reporting
    pub fn record_action(&self, action: &str) {
        *lock(&self.last_action) = Some(action.to_string());
        *lock(&self.last_action_time) = Some(Utc::now());
    }

    /// Switch the visible section.
    ///
    /// The stopwatch is always stopped on a switch; the countdown and the
    /// clock keep running while hidden.
    pub fn show_section(&self, section: Section) -> StopwatchSnapshot {
        *lock(&self.section) = section;
        let stopwatch = self.stopwatch.stop();
        self.record_action(&format!("section-{}", section));
        info!("Showing {} section", section);
        stopwatch
    }

    pub fn active_section(&self) -> Section {
        *lock(&self.section)
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = lock(&self.last_action).clone();
        let last_action_time = *lock(&self.last_action_time);
        (last_action, last_action_time)
    }
}
