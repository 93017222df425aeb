//! HTTP endpoint handlers

use std::{convert::Infallible, sync::Arc};
use axum::{
    extract::{Path, State},
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use chrono::Utc;
use futures::stream::{self, Stream};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::{
    error::WidgetError,
    state::{AppState, Section, StopwatchSnapshot, TimerAction, TimerSnapshot},
};
use super::responses::{
    ApiError, ApiResponse, ClockResponse, HealthResponse, SetTimerRequest, StatusResponse,
};

type TimerReply = Result<Json<ApiResponse<TimerSnapshot>>, ApiError>;

/// Wrap a timer transition result, recording successful actions
fn timer_reply(state: &AppState, action: TimerAction, result: Result<TimerSnapshot, WidgetError>) -> TimerReply {
    let snapshot = result?;
    state.record_action(&format!("timer-{}", action));
    Ok(Json(ApiResponse::ok(
        format!("Timer {} applied, timer is {}", action, snapshot.phase),
        snapshot,
    )))
}

fn stopwatch_reply(state: &AppState, action: &str, snapshot: StopwatchSnapshot) -> Json<ApiResponse<StopwatchSnapshot>> {
    state.record_action(&format!("stopwatch-{}", action));
    Json(ApiResponse::ok(format!("Stopwatch {} applied", action), snapshot))
}

/// Handle GET /clock - Current time of day
pub async fn clock_handler(State(state): State<Arc<AppState>>) -> Json<ClockResponse> {
    Json(ClockResponse {
        display: state.clock.display(),
        timestamp: Utc::now(),
    })
}

/// Handle GET /stopwatch - Current stopwatch state
pub async fn stopwatch_handler(State(state): State<Arc<AppState>>) -> Json<StopwatchSnapshot> {
    Json(state.stopwatch.snapshot())
}

/// Handle POST /stopwatch/start
pub async fn stopwatch_start_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse<StopwatchSnapshot>> {
    let snapshot = state.stopwatch.start();
    stopwatch_reply(&state, "start", snapshot)
}

/// Handle POST /stopwatch/stop
pub async fn stopwatch_stop_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse<StopwatchSnapshot>> {
    let snapshot = state.stopwatch.stop();
    stopwatch_reply(&state, "stop", snapshot)
}

/// Handle POST /stopwatch/reset
pub async fn stopwatch_reset_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse<StopwatchSnapshot>> {
    let snapshot = state.stopwatch.reset();
    stopwatch_reply(&state, "reset", snapshot)
}

/// Handle GET /timer - Current countdown state
pub async fn timer_handler(State(state): State<Arc<AppState>>) -> Json<TimerSnapshot> {
    Json(state.countdown.snapshot())
}

/// Handle POST /timer/edit - Reveal the duration selectors
pub async fn timer_edit_handler(State(state): State<Arc<AppState>>) -> TimerReply {
    let result = state.countdown.edit();
    timer_reply(&state, TimerAction::Edit, result)
}

/// Handle POST /timer/set - Confirm the selected duration
pub async fn timer_set_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SetTimerRequest>,
) -> TimerReply {
    debug!("Set timer request: {:?}", request);
    let result = state.countdown.set_raw(
        &request.hours.as_text(),
        &request.minutes.as_text(),
        &request.seconds.as_text(),
    );
    timer_reply(&state, TimerAction::Set, result)
}

/// Handle POST /timer/cancel - Leave editing without changes
pub async fn timer_cancel_handler(State(state): State<Arc<AppState>>) -> TimerReply {
    let result = state.countdown.cancel();
    timer_reply(&state, TimerAction::Cancel, result)
}

/// Handle POST /timer/start - Start or resume the countdown
pub async fn timer_start_handler(State(state): State<Arc<AppState>>) -> TimerReply {
    let result = state.countdown.start();
    timer_reply(&state, TimerAction::Start, result)
}

/// Handle POST /timer/pause
pub async fn timer_pause_handler(State(state): State<Arc<AppState>>) -> TimerReply {
    let result = state.countdown.pause();
    timer_reply(&state, TimerAction::Pause, result)
}

/// Handle POST /timer/stop - Abandon the countdown
pub async fn timer_stop_handler(State(state): State<Arc<AppState>>) -> TimerReply {
    let result = state.countdown.stop();
    timer_reply(&state, TimerAction::Stop, result)
}

/// Handle POST /timer/reset - Restore the configured duration
pub async fn timer_reset_handler(State(state): State<Arc<AppState>>) -> TimerReply {
    let result = state.countdown.reset();
    timer_reply(&state, TimerAction::Reset, result)
}

/// Handle POST /section/:name - Switch the visible section
pub async fn section_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<Section>>, ApiError> {
    let section: Section = name.parse()?;
    state.show_section(section);
    Ok(Json(ApiResponse::ok(format!("Showing {} section", section), section)))
}

/// Handle GET /stream/:name - Server-sent display updates
pub async fn stream_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    let section: Section = name.parse()?;
    let rx = match section {
        Section::Clock => state.clock.subscribe(),
        Section::Stopwatch => state.stopwatch.subscribe(),
        Section::Timer => state.countdown.subscribe(),
    };
    info!("Streaming {} display", section);
    Ok(Sse::new(display_events(rx, section)).keep_alive(KeepAlive::default()))
}

/// Emit the current display, then every change until the sender goes away
fn display_events(
    rx: watch::Receiver<String>,
    section: Section,
) -> impl Stream<Item = Result<Event, Infallible>> {
    stream::unfold((rx, true), move |(mut rx, first)| async move {
        if !first && rx.changed().await.is_err() {
            return None;
        }
        let display = rx.borrow_and_update().clone();
        let event = Event::default().event(section.to_string()).data(display);
        Some((Ok(event), (rx, false)))
    })
}

/// Handle DELETE /warnings - Dismiss all warnings
pub async fn clear_warnings_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse<usize>> {
    let cleared = state.warnings.clear();
    Json(ApiResponse::ok(format!("Cleared {} warnings", cleared), cleared))
}

/// Handle GET /status - Return the whole widget status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        section: state.active_section(),
        clock: state.clock.display(),
        stopwatch: state.stopwatch.snapshot(),
        timer: state.countdown.snapshot(),
        warnings: state.warnings.list(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
