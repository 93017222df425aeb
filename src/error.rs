//! Error types surfaced to the user as warnings

use thiserror::Error;

use crate::state::{Phase, TimerAction};

/// Errors raised by widget transitions
///
/// None of these are fatal: every variant leaves the widget state untouched
/// and is rendered to the user as a warning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WidgetError {
    /// Rejected duration input on Set
    #[error("Please select a valid duration greater than zero: {0}")]
    InvalidDuration(String),

    /// The transition is not defined for the current phase
    #[error("Cannot {action} the timer while it is {phase}")]
    NotAllowed { phase: Phase, action: TimerAction },

    #[error("Unknown section: {0}")]
    UnknownSection(String),
}

impl WidgetError {
    pub fn is_validation(&self) -> bool {
        matches!(self, WidgetError::InvalidDuration(_))
    }
}
