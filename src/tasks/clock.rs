//! Live wall-clock display

use std::sync::{Arc, Mutex};

use chrono::{Local, NaiveTime, Timelike};
use tokio::sync::watch;
use tracing::info;

use super::ticker::{Scheduler, TickHandle, TICK_PERIOD};
use crate::utils::{format_time, lock};

/// Source of the current local time of day
pub type TimeSource = Arc<dyn Fn() -> NaiveTime + Send + Sync>;

/// Seconds elapsed since local midnight
pub fn seconds_since_midnight<T: Timelike>(time: &T) -> i64 {
    i64::from(time.hour() * 3600 + time.minute() * 60 + time.second())
}

/// Clock that republishes the time of day every second
pub struct ClockTask {
    display: Arc<watch::Sender<String>>,
    now: TimeSource,
    tick: Mutex<Option<TickHandle>>,
}

impl ClockTask {
    /// Clock reading the local system time
    pub fn new() -> Self {
        Self::with_source(Arc::new(|| Local::now().time()))
    }

    pub fn with_source(now: TimeSource) -> Self {
        let (display, _) = watch::channel(format_time(seconds_since_midnight(&now())));
        Self {
            display: Arc::new(display),
            now,
            tick: Mutex::new(None),
        }
    }

    /// Publish once immediately, then once per second for the life of the app
    pub fn start(&self, scheduler: &dyn Scheduler) {
        let display = Arc::clone(&self.display);
        let now = Arc::clone(&self.now);
        let render = move || {
            display.send_replace(format_time(seconds_since_midnight(&now())));
        };
        render();

        let handle = scheduler.schedule_repeating(TICK_PERIOD, Box::new(render));
        if let Some(previous) = lock(&self.tick).replace(handle) {
            previous.cancel();
        }
        info!("Clock started");
    }

    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.display.subscribe()
    }

    pub fn display(&self) -> String {
        self.display.borrow().clone()
    }
}

impl Default for ClockTask {
    fn default() -> Self {
        Self::new()
    }
}
