//! Study Clock - A state-managed HTTP server hosting a time-display widget
//!
//! This library provides a live clock, a stopwatch and a countdown timer,
//! each publishing a formatted display once per second, plus the HTTP
//! surface used to drive them.

pub mod config;
pub mod error;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::WidgetError;
pub use state::AppState;
pub use api::create_router;
pub use utils::{format_time, shutdown_signal};
