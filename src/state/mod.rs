//! State management module
//!
//! This module contains all state-related structures and their management logic.

pub mod app_state;
pub mod countdown;
pub mod section;
pub mod stopwatch;
pub mod warnings;

// Re-export main types
pub use app_state::AppState;
pub use countdown::{
    Controls, CountdownTimer, DurationSelection, Phase, TickOutcome, TimerAction, TimerSnapshot,
    DEFAULT_DURATION_SECS,
};
pub use section::Section;
pub use stopwatch::{Stopwatch, StopwatchSnapshot, STOPWATCH_ZERO};
pub use warnings::WarningLog;
