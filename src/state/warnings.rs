//! User-facing warning list

use std::sync::{Arc, Mutex};

use tracing::{info, warn};

use crate::utils::lock;

/// Shared list of warnings waiting to be shown to the user
#[derive(Debug, Clone, Default)]
pub struct WarningLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl WarningLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a warning
    pub fn push(&self, warning: impl Into<String>) {
        let warning = warning.into();
        warn!("Adding warning: {}", warning);
        lock(&self.entries).push(warning);
    }

    /// Current warnings, oldest first
    pub fn list(&self) -> Vec<String> {
        lock(&self.entries).clone()
    }

    /// Remove all warnings, returning how many were cleared
    pub fn clear(&self) -> usize {
        let mut entries = lock(&self.entries);
        let count = entries.len();
        entries.clear();
        if count > 0 {
            info!("Cleared {} warnings", count);
        }
        count
    }
}
