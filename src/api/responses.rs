//! API request and response structures

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::WidgetError,
    state::{Section, StopwatchSnapshot, TimerSnapshot},
};

/// API response structure for control endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Create a new API response
    pub fn new(status: String, message: String, data: T) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            data,
        }
    }

    /// Create a successful response
    pub fn ok(message: String, data: T) -> Self {
        Self::new("ok".to_string(), message, data)
    }
}

/// Response for a rejected request, carrying the warning to show
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarningResponse {
    pub status: String,
    pub warning: String,
    pub timestamp: DateTime<Utc>,
}

/// Error returned by handlers, rendered as a warning
#[derive(Debug)]
pub struct ApiError(pub WidgetError);

impl From<WidgetError> for ApiError {
    fn from(e: WidgetError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            WidgetError::InvalidDuration(_) => StatusCode::UNPROCESSABLE_ENTITY,
            WidgetError::NotAllowed { .. } => StatusCode::CONFLICT,
            WidgetError::UnknownSection(_) => StatusCode::NOT_FOUND,
        };
        let body = WarningResponse {
            status: "warning".to_string(),
            warning: self.0.to_string(),
            timestamp: Utc::now(),
        };
        (status, Json(body)).into_response()
    }
}

/// One duration selector value, accepted as a number or a string.
///
/// Any other JSON value is kept as-is so it fails duration validation
/// instead of body extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SelectorValue {
    Number(i64),
    Text(String),
    Other(serde_json::Value),
}

impl Default for SelectorValue {
    fn default() -> Self {
        SelectorValue::Number(0)
    }
}

impl SelectorValue {
    pub fn as_text(&self) -> String {
        match self {
            SelectorValue::Number(n) => n.to_string(),
            SelectorValue::Text(s) => s.clone(),
            SelectorValue::Other(value) => value.to_string(),
        }
    }
}

/// Body of POST /timer/set; missing selectors count as zero
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetTimerRequest {
    #[serde(default)]
    pub hours: SelectorValue,
    #[serde(default)]
    pub minutes: SelectorValue,
    #[serde(default)]
    pub seconds: SelectorValue,
}

/// Current clock display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockResponse {
    pub display: String,
    pub timestamp: DateTime<Utc>,
}

/// Full widget status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub section: Section,
    pub clock: String,
    pub stopwatch: StopwatchSnapshot,
    pub timer: TimerSnapshot,
    pub warnings: Vec<String>,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn selectors_accept_any_json_value() {
        let request: SetTimerRequest =
            serde_json::from_value(json!({ "hours": null, "minutes": 1.5, "seconds": "07" })).unwrap();
        assert_eq!(request.hours.as_text(), "null");
        assert_eq!(request.minutes.as_text(), "1.5");
        assert_eq!(request.seconds.as_text(), "07");
    }

    #[test]
    fn missing_selectors_count_as_zero() {
        let request: SetTimerRequest = serde_json::from_value(json!({ "minutes": 5 })).unwrap();
        assert_eq!(request.hours.as_text(), "0");
        assert_eq!(request.seconds.as_text(), "0");
    }
}
