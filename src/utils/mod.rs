//! Utility functions module
//!
//! This module contains utility functions used throughout the application.

pub mod format;
pub mod signals;

use std::sync::{Mutex, MutexGuard, PoisonError};

// Re-export main functions
pub use format::{format_time, split_hms};
pub use signals::shutdown_signal;

/// Lock a mutex, recovering the value if a previous holder panicked.
///
/// Widget state is only mutated through whole transitions, so a poisoned
/// guard still holds a consistent value.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
