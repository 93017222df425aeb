//! Stopwatch driver

use std::sync::{Arc, Mutex, Weak};

use tokio::sync::watch;
use tracing::{debug, info};

use super::ticker::{Scheduler, TickHandle, TICK_PERIOD};
use crate::{
    state::{Stopwatch, StopwatchSnapshot, STOPWATCH_ZERO},
    utils::{format_time, lock},
};

/// Stopwatch with its display sink and tick source
pub struct StopwatchTask {
    shared: Arc<Shared>,
}

struct Shared {
    state: Mutex<Inner>,
    display: watch::Sender<String>,
    scheduler: Arc<dyn Scheduler>,
}

struct Inner {
    stopwatch: Stopwatch,
    tick: Option<TickHandle>,
}

impl StopwatchTask {
    pub fn new(scheduler: Arc<dyn Scheduler>) -> Self {
        let (display, _) = watch::channel(STOPWATCH_ZERO.to_string());
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(Inner {
                    stopwatch: Stopwatch::default(),
                    tick: None,
                }),
                display,
                scheduler,
            }),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.shared.display.subscribe()
    }

    pub fn display(&self) -> String {
        self.shared.display.borrow().clone()
    }

    pub fn snapshot(&self) -> StopwatchSnapshot {
        let inner = lock(&self.shared.state);
        StopwatchSnapshot {
            running: inner.stopwatch.is_running(),
            elapsed_seconds: inner.stopwatch.elapsed_seconds(),
            display: self.display(),
        }
    }

    /// Start or resume counting; a no-op while running
    pub fn start(&self) -> StopwatchSnapshot {
        {
            let mut inner = lock(&self.shared.state);
            if inner.stopwatch.start() {
                let weak: Weak<Shared> = Arc::downgrade(&self.shared);
                let handle = self.shared.scheduler.schedule_repeating(
                    TICK_PERIOD,
                    Box::new(move || {
                        if let Some(shared) = weak.upgrade() {
                            shared.on_tick();
                        }
                    }),
                );
                if let Some(previous) = inner.tick.replace(handle) {
                    previous.cancel();
                }
                info!("Stopwatch started at {}s", inner.stopwatch.elapsed_seconds());
            } else {
                debug!("Stopwatch already running");
            }
        }
        self.snapshot()
    }

    /// Stop counting and keep the elapsed time
    pub fn stop(&self) -> StopwatchSnapshot {
        {
            let mut inner = lock(&self.shared.state);
            inner.stopwatch.stop();
            if let Some(tick) = inner.tick.take() {
                tick.cancel();
                info!("Stopwatch stopped at {}s", inner.stopwatch.elapsed_seconds());
            }
        }
        self.snapshot()
    }

    /// Stop and clear the elapsed time
    pub fn reset(&self) -> StopwatchSnapshot {
        {
            let mut inner = lock(&self.shared.state);
            if let Some(tick) = inner.tick.take() {
                tick.cancel();
            }
            inner.stopwatch.reset();
            self.shared.display.send_replace(STOPWATCH_ZERO.to_string());
        }
        info!("Stopwatch reset");
        self.snapshot()
    }
}

impl Shared {
    fn on_tick(&self) {
        let mut inner = lock(&self.state);
        if !inner.stopwatch.is_running() {
            return;
        }
        let elapsed = inner.stopwatch.tick();
        self.display.send_replace(format_time(elapsed.as_secs() as i64));
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;
    use tokio::time::sleep;

    use super::*;
    use crate::tasks::TokioScheduler;

    #[tokio::test(start_paused = true)]
    async fn starts_at_zero() {
        let task = StopwatchTask::new(TokioScheduler::shared());
        assert_eq!(task.display(), "00:00:00");
        assert!(!task.snapshot().running);
    }

    #[tokio::test(start_paused = true)]
    async fn republishes_every_second_while_running() {
        let task = StopwatchTask::new(TokioScheduler::shared());
        task.start();

        sleep(Duration::from_millis(2500)).await;
        assert_eq!(task.display(), "00:02");

        sleep(Duration::from_secs(3600)).await;
        assert_eq!(task.display(), "01:00:02");
    }

    #[tokio::test(start_paused = true)]
    async fn resuming_continues_accumulation() {
        let task = StopwatchTask::new(TokioScheduler::shared());
        task.start();
        sleep(Duration::from_millis(3500)).await;
        let stopped = task.stop();
        assert_eq!(stopped.elapsed_seconds, 3);
        assert!(!stopped.running);

        sleep(Duration::from_secs(30)).await;
        assert_eq!(task.snapshot().elapsed_seconds, 3);
        assert_eq!(task.display(), "00:03");

        task.start();
        sleep(Duration::from_millis(2100)).await;
        assert_eq!(task.snapshot().elapsed_seconds, 5);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_stops_and_shows_zero() {
        let task = StopwatchTask::new(TokioScheduler::shared());
        task.start();
        sleep(Duration::from_millis(4500)).await;

        let reset = task.reset();
        assert_eq!(reset.elapsed_seconds, 0);
        assert_eq!(reset.display, "00:00:00");

        sleep(Duration::from_secs(5)).await;
        assert_eq!(task.display(), "00:00:00");
    }

    #[tokio::test(start_paused = true)]
    async fn stop_and_start_are_idempotent() {
        let task = StopwatchTask::new(TokioScheduler::shared());
        task.stop();
        task.start();
        sleep(Duration::from_millis(1500)).await;
        task.start();
        sleep(Duration::from_millis(1000)).await;

        assert_eq!(task.snapshot().elapsed_seconds, 2);
        task.stop();
        task.stop();
        assert_eq!(task.snapshot().elapsed_seconds, 2);
    }
}
