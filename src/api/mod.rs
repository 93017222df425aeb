//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/clock", get(clock_handler))
        .route("/stopwatch", get(stopwatch_handler))
        .route("/stopwatch/start", post(stopwatch_start_handler))
        .route("/stopwatch/stop", post(stopwatch_stop_handler))
        .route("/stopwatch/reset", post(stopwatch_reset_handler))
        .route("/timer", get(timer_handler))
        .route("/timer/edit", post(timer_edit_handler))
        .route("/timer/set", post(timer_set_handler))
        .route("/timer/cancel", post(timer_cancel_handler))
        .route("/timer/start", post(timer_start_handler))
        .route("/timer/pause", post(timer_pause_handler))
        .route("/timer/stop", post(timer_stop_handler))
        .route("/timer/reset", post(timer_reset_handler))
        .route("/section/:name", post(section_handler))
        .route("/stream/:name", get(stream_handler))
        .route("/warnings", delete(clear_warnings_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
