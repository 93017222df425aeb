//! Countdown timer state machine
//!
//! ```text
//!            edit                 set(d > 0)
//!  Idle ──────────────► Editing ─────────────► Idle
//!   │ ▲                   │ cancel              ▲
//!   │ └───────────────────┘                     │ stop / reset
//!   │ start                                     │
//!   ▼          pause              start         │
//!  Running ────────────► Paused ──────► Running │
//!   │                                           │
//!   │ tick reaches zero                         │
//!   ▼                                           │
//!  Completed ───────────────────────────────────┘
//! ```
//!
//! The machine itself never schedules anything: the owner reads [`Phase`]
//! after every transition and keeps exactly one tick source alive while the
//! phase is [`Phase::Running`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{error::WidgetError, utils::{format_time, split_hms}};

/// Fallback duration used when neither remaining nor initial time is set
pub const DEFAULT_DURATION_SECS: u64 = 25 * 60;

/// Discrete mode of the countdown timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Editing,
    Running,
    Paused,
    Completed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Editing => "editing",
            Phase::Running => "running",
            Phase::Paused => "paused",
            Phase::Completed => "completed",
        };
        f.write_str(name)
    }
}

/// User-triggered timer events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerAction {
    Edit,
    Set,
    Cancel,
    Start,
    Pause,
    Stop,
    Reset,
}

impl fmt::Display for TimerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimerAction::Edit => "edit",
            TimerAction::Set => "set",
            TimerAction::Cancel => "cancel",
            TimerAction::Start => "start",
            TimerAction::Pause => "pause",
            TimerAction::Stop => "stop",
            TimerAction::Reset => "reset",
        };
        f.write_str(name)
    }
}

impl Phase {
    /// Whether `action` is a defined transition out of this phase
    pub fn allows(self, action: TimerAction) -> bool {
        use Phase::*;
        use TimerAction::*;

        match (self, action) {
            (Idle | Paused | Completed, Edit) => true,
            (Editing, Set | Cancel) => true,
            (Idle | Paused | Completed, Start) => true,
            (Running, Pause) => true,
            (Running | Paused, Stop) => true,
            (Idle | Paused | Completed, Reset) => true,
            _ => false,
        }
    }

    /// Controls the presentation layer should show in this phase
    pub fn controls(self) -> Controls {
        Controls {
            edit: self.allows(TimerAction::Edit),
            set: self.allows(TimerAction::Set),
            cancel: self.allows(TimerAction::Cancel),
            start: self.allows(TimerAction::Start),
            pause: self.allows(TimerAction::Pause),
            stop: self.allows(TimerAction::Stop),
            reset: self.allows(TimerAction::Reset),
            duration_inputs: self == Phase::Editing,
        }
    }
}

/// Visible timer controls, derived from [`Phase`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Controls {
    pub edit: bool,
    pub set: bool,
    pub cancel: bool,
    pub start: bool,
    pub pause: bool,
    pub stop: bool,
    pub reset: bool,
    pub duration_inputs: bool,
}

/// Values of the three duration selectors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DurationSelection {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl DurationSelection {
    pub const MAX_HOURS: u64 = 23;
    pub const MAX_MINUTES: u64 = 59;
    pub const MAX_SECONDS: u64 = 59;

    /// Build a selection, checking each selector range
    pub fn new(hours: u64, minutes: u64, seconds: u64) -> Result<Self, WidgetError> {
        check_range("hours", hours, Self::MAX_HOURS)?;
        check_range("minutes", minutes, Self::MAX_MINUTES)?;
        check_range("seconds", seconds, Self::MAX_SECONDS)?;
        Ok(Self { hours, minutes, seconds })
    }

    /// Parse raw selector values
    pub fn parse(hours: &str, minutes: &str, seconds: &str) -> Result<Self, WidgetError> {
        Self::new(
            parse_field("hours", hours, Self::MAX_HOURS)?,
            parse_field("minutes", minutes, Self::MAX_MINUTES)?,
            parse_field("seconds", seconds, Self::MAX_SECONDS)?,
        )
    }

    /// Pre-populate the selectors from a second count
    pub fn from_seconds(total_seconds: u64) -> Self {
        let (hours, minutes, seconds) = split_hms(total_seconds);
        Self { hours, minutes, seconds }
    }

    pub fn total_seconds(&self) -> u64 {
        self.hours * 3600 + self.minutes * 60 + self.seconds
    }
}

fn parse_field(name: &str, raw: &str, max: u64) -> Result<u64, WidgetError> {
    raw.trim().parse::<u64>().map_err(|_| {
        WidgetError::InvalidDuration(format!(
            "{} must be a whole number between 0 and {}, got '{}'",
            name, max, raw
        ))
    })
}

fn check_range(name: &str, value: u64, max: u64) -> Result<(), WidgetError> {
    if value > max {
        return Err(WidgetError::InvalidDuration(format!(
            "{} must be a whole number between 0 and {}, got '{}'",
            name, max, value
        )));
    }
    Ok(())
}

/// What a single tick did to the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Timer was not running; the tick was stale and changed nothing
    Ignored,
    /// Remaining time was decremented and is still above zero
    Counting(u64),
    /// Remaining time reached zero on this tick
    Completed,
}

/// Serializable view of the timer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: Phase,
    pub initial_seconds: u64,
    pub remaining_seconds: u64,
    pub display: String,
    pub controls: Controls,
    pub selection: Option<DurationSelection>,
}

/// Countdown timer with an editable duration
#[derive(Debug, Clone)]
pub struct CountdownTimer {
    initial_seconds: u64,
    remaining_seconds: u64,
    phase: Phase,
    selection: Option<DurationSelection>,
}

impl CountdownTimer {
    /// Create an idle timer showing `initial_seconds`
    pub fn new(initial_seconds: u64) -> Self {
        Self {
            initial_seconds,
            remaining_seconds: initial_seconds,
            phase: Phase::Idle,
            selection: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn initial_seconds(&self) -> u64 {
        self.initial_seconds
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    /// Selector values shown while editing
    pub fn selection(&self) -> Option<DurationSelection> {
        self.selection
    }

    pub fn display(&self) -> String {
        format_time(self.remaining_seconds as i64)
    }

    pub fn controls(&self) -> Controls {
        self.phase.controls()
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.phase,
            initial_seconds: self.initial_seconds,
            remaining_seconds: self.remaining_seconds,
            display: self.display(),
            controls: self.controls(),
            selection: self.selection,
        }
    }

    fn guard(&self, action: TimerAction) -> Result<(), WidgetError> {
        if self.phase.allows(action) {
            Ok(())
        } else {
            Err(WidgetError::NotAllowed { phase: self.phase, action })
        }
    }

    /// Enter editing, pre-populating the selectors
    pub fn edit(&mut self) -> Result<DurationSelection, WidgetError> {
        self.guard(TimerAction::Edit)?;

        let seconds = if self.remaining_seconds > 0 {
            self.remaining_seconds
        } else {
            self.initial_seconds
        };
        let selection = DurationSelection::from_seconds(seconds);
        self.selection = Some(selection);
        self.phase = Phase::Editing;
        Ok(selection)
    }

    /// Confirm a new duration. Zero is never accepted.
    pub fn set(&mut self, selection: DurationSelection) -> Result<(), WidgetError> {
        self.guard(TimerAction::Set)?;

        let total = selection.total_seconds();
        if total == 0 {
            return Err(WidgetError::InvalidDuration(
                "duration must be greater than zero".to_string(),
            ));
        }

        self.initial_seconds = total;
        self.remaining_seconds = total;
        self.selection = None;
        self.phase = Phase::Idle;
        Ok(())
    }

    /// Leave editing without applying the selection
    pub fn cancel(&mut self) -> Result<(), WidgetError> {
        self.guard(TimerAction::Cancel)?;
        self.selection = None;
        self.phase = Phase::Idle;
        Ok(())
    }

    /// Start or resume counting down.
    ///
    /// Returns `false` when the timer was already running, in which case
    /// nothing changes.
    pub fn start(&mut self) -> Result<bool, WidgetError> {
        if self.phase == Phase::Running {
            return Ok(false);
        }
        self.guard(TimerAction::Start)?;

        if self.remaining_seconds == 0 {
            if self.initial_seconds == 0 {
                self.initial_seconds = DEFAULT_DURATION_SECS;
            }
            self.remaining_seconds = self.initial_seconds;
        }

        self.phase = Phase::Running;
        Ok(true)
    }

    pub fn pause(&mut self) -> Result<(), WidgetError> {
        self.guard(TimerAction::Pause)?;
        self.phase = Phase::Paused;
        Ok(())
    }

    /// Abandon the countdown. The configured duration is kept for Reset.
    pub fn stop(&mut self) -> Result<(), WidgetError> {
        self.guard(TimerAction::Stop)?;
        self.remaining_seconds = 0;
        self.phase = Phase::Idle;
        Ok(())
    }

    /// Restore the last configured duration
    pub fn reset(&mut self) -> Result<(), WidgetError> {
        self.guard(TimerAction::Reset)?;
        self.remaining_seconds = self.initial_seconds;
        self.phase = Phase::Idle;
        Ok(())
    }

    /// Advance the countdown by one second
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != Phase::Running {
            return TickOutcome::Ignored;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        if self.remaining_seconds == 0 {
            self.phase = Phase::Completed;
            return TickOutcome::Completed;
        }
        TickOutcome::Counting(self.remaining_seconds)
    }
}

impl Default for CountdownTimer {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION_SECS)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn selection(hours: u64, minutes: u64, seconds: u64) -> DurationSelection {
        DurationSelection { hours, minutes, seconds }
    }

    fn configured(seconds: u64) -> CountdownTimer {
        let mut timer = CountdownTimer::default();
        timer.edit().unwrap();
        timer.set(DurationSelection::from_seconds(seconds)).unwrap();
        timer
    }

    #[test]
    fn starts_idle_with_default_duration() {
        let timer = CountdownTimer::default();
        assert_eq!(timer.phase(), Phase::Idle);
        assert_eq!(timer.initial_seconds(), 1500);
        assert_eq!(timer.remaining_seconds(), 1500);
        assert_eq!(timer.display(), "25:00");
    }

    #[test]
    fn edit_prepopulates_with_remaining_time() {
        let mut timer = configured(90);
        timer.start().unwrap();
        timer.tick();
        timer.pause().unwrap();

        let selected = timer.edit().unwrap();
        assert_eq!(selected, selection(0, 1, 29));
        assert_eq!(timer.phase(), Phase::Editing);
        assert_eq!(timer.selection(), Some(selected));
    }

    #[test]
    fn edit_prepopulates_with_initial_time_when_nothing_remains() {
        let mut timer = configured(3661);
        timer.start().unwrap();
        timer.stop().unwrap();

        assert_eq!(timer.edit().unwrap(), selection(1, 1, 1));
    }

    #[test]
    fn edit_is_rejected_while_running() {
        let mut timer = CountdownTimer::default();
        timer.start().unwrap();

        let err = timer.edit().unwrap_err();
        assert_eq!(
            err,
            WidgetError::NotAllowed { phase: Phase::Running, action: TimerAction::Edit }
        );
        assert_eq!(timer.phase(), Phase::Running);
    }

    #[test]
    fn set_then_reset_round_trips() {
        for d in [1, 59, 60, 1500, 3600, 86399] {
            let mut timer = configured(d);
            timer.reset().unwrap();
            assert_eq!(timer.remaining_seconds(), d);
            assert_eq!(timer.phase(), Phase::Idle);
        }
    }

    #[test]
    fn set_rejects_zero_and_leaves_state_alone() {
        let mut timer = CountdownTimer::default();
        timer.edit().unwrap();

        let err = timer.set(selection(0, 0, 0)).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(timer.phase(), Phase::Editing);
        assert_eq!(timer.initial_seconds(), 1500);
        assert_eq!(timer.remaining_seconds(), 1500);
    }

    #[test]
    fn set_outside_editing_is_not_allowed() {
        let mut timer = CountdownTimer::default();
        let err = timer.set(selection(0, 5, 0)).unwrap_err();
        assert_eq!(err, WidgetError::NotAllowed { phase: Phase::Idle, action: TimerAction::Set });
        assert_eq!(timer.initial_seconds(), 1500);
    }

    #[test]
    fn cancel_discards_the_selection() {
        let mut timer = CountdownTimer::default();
        timer.edit().unwrap();
        timer.cancel().unwrap();

        assert_eq!(timer.phase(), Phase::Idle);
        assert_eq!(timer.selection(), None);
        assert_eq!(timer.remaining_seconds(), 1500);
    }

    #[test]
    fn start_twice_is_a_no_op() {
        let mut timer = configured(10);
        assert!(timer.start().unwrap());
        timer.tick();

        assert!(!timer.start().unwrap());
        assert_eq!(timer.phase(), Phase::Running);
        assert_eq!(timer.remaining_seconds(), 9);
    }

    #[test]
    fn start_after_stop_uses_initial_duration() {
        let mut timer = configured(42);
        timer.start().unwrap();
        timer.stop().unwrap();

        timer.start().unwrap();
        assert_eq!(timer.remaining_seconds(), 42);
    }

    #[test]
    fn start_with_nothing_configured_falls_back_to_default() {
        let mut timer = CountdownTimer::new(0);
        timer.start().unwrap();

        assert_eq!(timer.initial_seconds(), DEFAULT_DURATION_SECS);
        assert_eq!(timer.remaining_seconds(), DEFAULT_DURATION_SECS);
        assert_eq!(timer.phase(), Phase::Running);
    }

    #[test]
    fn ticking_down_completes_exactly_once() {
        let mut timer = configured(3);
        timer.start().unwrap();

        assert_eq!(timer.tick(), TickOutcome::Counting(2));
        assert_eq!(timer.tick(), TickOutcome::Counting(1));
        assert_eq!(timer.tick(), TickOutcome::Completed);
        assert_eq!(timer.tick(), TickOutcome::Ignored);

        assert_eq!(timer.phase(), Phase::Completed);
        assert_eq!(timer.display(), "00:00");
    }

    #[test]
    fn start_after_completion_restarts_from_initial() {
        let mut timer = configured(1);
        timer.start().unwrap();
        timer.tick();

        timer.start().unwrap();
        assert_eq!(timer.remaining_seconds(), 1);
        assert_eq!(timer.phase(), Phase::Running);
    }

    #[test]
    fn pause_and_resume_preserve_remaining() {
        let mut timer = configured(20);
        timer.start().unwrap();
        timer.tick();
        timer.tick();
        timer.pause().unwrap();

        assert_eq!(timer.tick(), TickOutcome::Ignored);
        timer.start().unwrap();
        assert_eq!(timer.remaining_seconds(), 18);
    }

    #[test]
    fn stop_zeroes_remaining_but_keeps_initial() {
        let mut timer = configured(600);
        timer.start().unwrap();
        timer.tick();
        timer.stop().unwrap();

        assert_eq!(timer.remaining_seconds(), 0);
        assert_eq!(timer.display(), "00:00");
        assert_eq!(timer.phase(), Phase::Idle);
        assert_eq!(timer.initial_seconds(), 600);

        timer.reset().unwrap();
        assert_eq!(timer.remaining_seconds(), 600);
    }

    #[test]
    fn stop_from_idle_is_not_allowed() {
        let mut timer = CountdownTimer::default();
        assert!(timer.stop().is_err());
        assert_eq!(timer.remaining_seconds(), 1500);
    }

    #[test]
    fn controls_follow_phase() {
        let idle = Phase::Idle.controls();
        assert!(idle.edit && idle.start && idle.reset);
        assert!(!idle.pause && !idle.stop && !idle.duration_inputs);

        let editing = Phase::Editing.controls();
        assert!(editing.set && editing.cancel && editing.duration_inputs);
        assert!(!editing.start && !editing.edit);

        let running = Phase::Running.controls();
        assert_eq!(
            running,
            Controls { pause: true, stop: true, ..Controls::default() }
        );

        let paused = Phase::Paused.controls();
        assert!(paused.start && paused.stop && paused.reset && paused.edit);
        assert!(!paused.pause);
    }

    #[test]
    fn parses_selector_values() {
        assert_eq!(DurationSelection::parse("01", " 30", "05").unwrap(), selection(1, 30, 5));
    }

    #[test]
    fn rejects_non_numeric_and_out_of_range_selectors() {
        assert!(DurationSelection::parse("x", "0", "0").unwrap_err().is_validation());
        assert!(DurationSelection::parse("0", "-1", "0").unwrap_err().is_validation());
        assert!(DurationSelection::parse("24", "0", "0").unwrap_err().is_validation());
        assert!(DurationSelection::new(0, 0, 60).unwrap_err().is_validation());
    }
}
