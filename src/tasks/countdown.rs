//! Countdown timer driver
//!
//! Wraps the [`CountdownTimer`] state machine with the single tick source it
//! needs while running, publishes the display, and plays the completion
//! alert.

use std::sync::{Arc, Mutex, Weak};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::ticker::{Scheduler, TickHandle, TICK_PERIOD};
use crate::{
    error::WidgetError,
    services::{blocked_warning, AlertNotifier, AlertOutcome},
    state::{CountdownTimer, DurationSelection, Phase, TickOutcome, TimerAction, TimerSnapshot, WarningLog},
    utils::{format_time, lock},
};

/// Countdown timer owned by the application for its whole lifetime
pub struct CountdownTask {
    shared: Arc<Shared>,
}

struct Shared {
    state: Mutex<Inner>,
    display: watch::Sender<String>,
    scheduler: Arc<dyn Scheduler>,
    notifier: Arc<dyn AlertNotifier>,
    warnings: WarningLog,
}

struct Inner {
    timer: CountdownTimer,
    tick: Option<TickHandle>,
    /// Bumped whenever the tick source is cancelled or replaced; callbacks
    /// carrying an older value are stale
    generation: u64,
}

impl CountdownTask {
    pub fn new(
        timer: CountdownTimer,
        scheduler: Arc<dyn Scheduler>,
        notifier: Arc<dyn AlertNotifier>,
        warnings: WarningLog,
    ) -> Self {
        let (display, _) = watch::channel(timer.display());
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(Inner { timer, tick: None, generation: 0 }),
                display,
                scheduler,
                notifier,
                warnings,
            }),
        }
    }

    /// Receive every display update
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.shared.display.subscribe()
    }

    /// Last published display
    pub fn display(&self) -> String {
        self.shared.display.borrow().clone()
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        lock(&self.shared.state).timer.snapshot()
    }

    pub fn edit(&self) -> Result<TimerSnapshot, WidgetError> {
        self.shared.apply(TimerAction::Edit, |timer| timer.edit().map(|_| ()))
    }

    pub fn set(&self, selection: DurationSelection) -> Result<TimerSnapshot, WidgetError> {
        self.shared.apply(TimerAction::Set, |timer| timer.set(selection))
    }

    /// Set from raw selector values. Phase is checked before the input.
    pub fn set_raw(&self, hours: &str, minutes: &str, seconds: &str) -> Result<TimerSnapshot, WidgetError> {
        self.shared.apply(TimerAction::Set, |timer| {
            if !timer.phase().allows(TimerAction::Set) {
                return Err(WidgetError::NotAllowed {
                    phase: timer.phase(),
                    action: TimerAction::Set,
                });
            }
            timer.set(DurationSelection::parse(hours, minutes, seconds)?)
        })
    }

    pub fn cancel(&self) -> Result<TimerSnapshot, WidgetError> {
        self.shared.apply(TimerAction::Cancel, CountdownTimer::cancel)
    }

    /// Start or resume; a no-op while already running
    pub fn start(&self) -> Result<TimerSnapshot, WidgetError> {
        self.shared.apply(TimerAction::Start, |timer| timer.start().map(|_| ()))
    }

    pub fn pause(&self) -> Result<TimerSnapshot, WidgetError> {
        self.shared.apply(TimerAction::Pause, CountdownTimer::pause)
    }

    pub fn stop(&self) -> Result<TimerSnapshot, WidgetError> {
        self.shared.apply(TimerAction::Stop, CountdownTimer::stop)
    }

    pub fn reset(&self) -> Result<TimerSnapshot, WidgetError> {
        self.shared.apply(TimerAction::Reset, CountdownTimer::reset)
    }
}

impl Shared {
    fn apply<F>(self: &Arc<Self>, action: TimerAction, transition: F) -> Result<TimerSnapshot, WidgetError>
    where
        F: FnOnce(&mut CountdownTimer) -> Result<(), WidgetError>,
    {
        let mut inner = lock(&self.state);

        if let Err(e) = transition(&mut inner.timer) {
            warn!("Timer {} rejected: {}", action, e);
            if e.is_validation() {
                self.warnings.push(e.to_string());
            }
            return Err(e);
        }

        self.sync_ticking(&mut inner);
        let snapshot = inner.timer.snapshot();
        self.publish(&snapshot.display);
        drop(inner);

        info!(
            "Timer {}: phase={}, remaining={}s, initial={}s",
            action, snapshot.phase, snapshot.remaining_seconds, snapshot.initial_seconds
        );
        Ok(snapshot)
    }

    /// Keep exactly one tick source alive while running, none otherwise
    fn sync_ticking(self: &Arc<Self>, inner: &mut Inner) {
        if inner.timer.phase() != Phase::Running {
            if let Some(tick) = inner.tick.take() {
                debug!("Cancelling timer tick");
                inner.generation += 1;
                tick.cancel();
            }
            return;
        }

        if inner.tick.is_none() {
            inner.generation += 1;
            let generation = inner.generation;
            let weak: Weak<Shared> = Arc::downgrade(self);
            let handle = self.scheduler.schedule_repeating(
                TICK_PERIOD,
                Box::new(move || {
                    if let Some(shared) = weak.upgrade() {
                        shared.on_tick(generation);
                    }
                }),
            );
            inner.tick = Some(handle);
        }
    }

    fn on_tick(&self, generation: u64) {
        let mut inner = lock(&self.state);
        if inner.generation != generation {
            debug!("Ignoring tick from cancelled generation {}", generation);
            return;
        }

        match inner.timer.tick() {
            TickOutcome::Ignored => {
                debug!("Ignoring tick while timer is {}", inner.timer.phase());
            }
            TickOutcome::Counting(remaining) => {
                debug!("Timer tick: {}s remaining", remaining);
                self.publish(&format_time(remaining as i64));
            }
            TickOutcome::Completed => {
                if let Some(tick) = inner.tick.take() {
                    inner.generation += 1;
                    tick.cancel();
                }
                self.publish(&format_time(0));
                drop(inner);

                info!("Timer completed, playing alert");
                self.fire_alert();
            }
        }
    }

    fn fire_alert(&self) {
        let notifier = Arc::clone(&self.notifier);
        let warnings = self.warnings.clone();

        tokio::spawn(async move {
            match notifier.notify().await {
                AlertOutcome::Played => debug!("Completion alert played"),
                AlertOutcome::Blocked(reason) => {
                    warn!("Completion alert blocked: {}", reason);
                    warnings.push(blocked_warning(&reason));
                }
            }
        });
    }

    fn publish(&self, display: &str) {
        self.display.send_if_modified(|current| {
            if current == display {
                return false;
            }
            *current = display.to_string();
            true
        });
    }
}
