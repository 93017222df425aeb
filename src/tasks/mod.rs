//! Background tasks module
//!
//! This module contains the periodic tick sources and the components that
//! run on them alongside the HTTP server.

pub mod clock;
pub mod countdown;
pub mod stopwatch;
pub mod ticker;

// Re-export main types
pub use clock::ClockTask;
pub use countdown::CountdownTask;
pub use stopwatch::StopwatchTask;
pub use ticker::{Scheduler, TickHandle, TokioScheduler, TICK_PERIOD};
