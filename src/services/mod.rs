//! External collaborator module
//!
//! This module contains the alert playback used when a countdown completes.

pub mod alert;

// Re-export main types
pub use alert::{blocked_warning, AlertNotifier, AlertOutcome, CommandAlert, LogAlert};
