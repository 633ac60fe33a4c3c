//! System endpoints: health check, time window presets.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;
use crate::domain::TimeWindow;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// `healthy` or `degraded`.
    pub status: String,
    /// Current server time.
    pub timestamp: String,
    /// Crate version.
    pub version: String,
    /// `ok` when the metrics store answered.
    pub store: String,
}

/// `GET /health`: Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, current timestamp, and whether the metrics store is reachable.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Store unreachable", body = HealthResponse),
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let (code, status, store) = match state.tracker_service.ping_store().await {
        Ok(()) => (StatusCode::OK, "healthy", "ok".to_string()),
        Err(e) => {
            tracing::warn!(error = %e, "health check: store unreachable");
            (StatusCode::SERVICE_UNAVAILABLE, "degraded", e.to_string())
        }
    };
    (
        code,
        Json(HealthResponse {
            status: status.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            store,
        }),
    )
}

/// Time window preset info.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimeWindowInfo {
    /// Query key (`2W`, `1M`, ...).
    pub key: &'static str,
    /// `windowDays` the preset maps to.
    pub days: i32,
    /// Display label.
    pub description: &'static str,
    /// Whether this preset applies when no window is given.
    pub is_default: bool,
}

impl From<TimeWindow> for TimeWindowInfo {
    fn from(window: TimeWindow) -> Self {
        Self {
            key: window.key(),
            days: window.days(),
            description: window.description(),
            is_default: window == TimeWindow::default(),
        }
    }
}

/// `GET /config/time-windows`: List price-change window presets.
#[utoipa::path(
    get,
    path = "/config/time-windows",
    tag = "System",
    summary = "List time window presets",
    description = "Returns the window presets accepted by the `window` query parameter.",
    responses(
        (status = 200, description = "Window catalog", body = Vec<TimeWindowInfo>),
    )
)]
pub async fn time_windows_handler() -> impl IntoResponse {
    let windows: Vec<TimeWindowInfo> = TimeWindow::ALL_PRESETS
        .into_iter()
        .map(TimeWindowInfo::from)
        .collect();
    (StatusCode::OK, Json(windows))
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/config/time-windows", get(time_windows_handler))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_weeks_is_the_default_preset() {
        let infos: Vec<TimeWindowInfo> = TimeWindow::ALL_PRESETS
            .into_iter()
            .map(TimeWindowInfo::from)
            .collect();
        let defaults: Vec<&str> = infos.iter().filter(|i| i.is_default).map(|i| i.key).collect();
        assert_eq!(defaults, vec!["2W"]);
    }
}
