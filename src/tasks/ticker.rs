//! Repeating tick scheduling

use std::{sync::Arc, time::Duration};

use tokio::{
    task::JoinHandle,
    time::{interval_at, Instant},
};

/// Tick period shared by every widget component
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Callback run on every tick
pub type TickCallback = Box<dyn FnMut() + Send + 'static>;

/// Capability to run a callback periodically.
///
/// The callback is never invoked from inside `schedule_repeating` itself;
/// the first call happens one `period` later.
pub trait Scheduler: Send + Sync {
    fn schedule_repeating(&self, period: Duration, callback: TickCallback) -> TickHandle;
}

/// Handle to a live repeating callback. Cancelled on drop.
#[derive(Debug)]
pub struct TickHandle {
    task: Option<JoinHandle<()>>,
}

impl TickHandle {
    pub fn new(task: JoinHandle<()>) -> Self {
        Self { task: Some(task) }
    }

    /// Stop the callback from running again
    pub fn cancel(mut self) {
        self.abort();
    }

    fn abort(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.abort();
    }
}

/// Scheduler backed by tokio intervals
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

impl TokioScheduler {
    pub fn shared() -> Arc<dyn Scheduler> {
        Arc::new(Self)
    }
}

impl Scheduler for TokioScheduler {
    fn schedule_repeating(&self, period: Duration, mut callback: TickCallback) -> TickHandle {
        let task = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                callback();
            }
        });
        TickHandle::new(task)
    }
}
