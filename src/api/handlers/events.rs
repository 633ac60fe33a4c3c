//! Event handlers: trending list, metadata, price history, price change.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::WindowQuery;
use crate::api::extract::ApiQuery;
use crate::app_state::AppState;
use crate::domain::{EventMeta, Lookback, PriceChange, PricePoint, TimeWindow, TrendingEvent};
use crate::error::{ErrorResponse, TrackerError};

/// `GET /events/trending`: Trending events from the latest snapshot.
///
/// # Errors
///
/// Returns [`TrackerError::StoreUnavailable`] if the store fails.
#[utoipa::path(
    get,
    path = "/api/v1/events/trending",
    tag = "Events",
    summary = "List trending events",
    description = "Returns up to six upcoming events from the latest snapshot, each paired with one artist. No artist and no event appears twice. Ordered by popularity, highest first.",
    responses(
        (status = 200, description = "Trending events", body = Vec<TrendingEvent>),
        (status = 503, description = "Store unavailable", body = ErrorResponse),
    )
)]
pub async fn get_trending(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, TrackerError> {
    let trending = state.tracker_service.get_trending().await?;
    Ok(Json(trending))
}

/// `GET /events/:id`: Event metadata.
///
/// # Errors
///
/// Returns [`TrackerError::EventNotFound`] if the event does not exist.
#[utoipa::path(
    get,
    path = "/api/v1/events/{id}",
    tag = "Events",
    summary = "Get event details",
    params(
        ("id" = String, Path, description = "Event identifier"),
    ),
    responses(
        (status = 200, description = "Event metadata", body = EventMeta),
        (status = 404, description = "Event not found", body = ErrorResponse),
    )
)]
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, TrackerError> {
    let event = state.tracker_service.get_event_meta(&id).await?;
    Ok(Json(event))
}

/// `GET /events/:id/metrics`: Price history for charting.
///
/// # Errors
///
/// Returns [`TrackerError`] on an invalid window or store failure.
#[utoipa::path(
    get,
    path = "/api/v1/events/{id}/metrics",
    tag = "Events",
    summary = "Get price history",
    description = "Returns the event's minimum total price per snapshot, oldest first, skipping snapshots without a positive price. A window trims the history to that many days before the latest snapshot; without one the full history is returned.",
    params(
        ("id" = String, Path, description = "Event identifier"),
        WindowQuery,
    ),
    responses(
        (status = 200, description = "Price history", body = Vec<PricePoint>),
        (status = 400, description = "Invalid window", body = ErrorResponse),
    )
)]
pub async fn get_event_metrics(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiQuery(query): ApiQuery<WindowQuery>,
) -> Result<impl IntoResponse, TrackerError> {
    let lookback = query.window_days()?.map(Lookback::try_from).transpose()?;
    let points = state
        .tracker_service
        .get_event_metrics(&id, lookback)
        .await?;
    Ok(Json(points))
}

/// `GET /events/:id/price-change`: Price change over a window.
///
/// Responds with JSON `null` when the event has no snapshots.
///
/// # Errors
///
/// Returns [`TrackerError`] on an invalid window or store failure.
#[utoipa::path(
    get,
    path = "/api/v1/events/{id}/price-change",
    tag = "Events",
    summary = "Get price change",
    description = "Compares the latest minimum total price with the snapshot the window points back to. `windowDays=-1` or `window=ALL` compares with the oldest snapshot. Defaults to the 2W window.",
    params(
        ("id" = String, Path, description = "Event identifier"),
        WindowQuery,
    ),
    responses(
        (status = 200, description = "Price change, or null without data", body = Option<PriceChange>),
        (status = 400, description = "Invalid window", body = ErrorResponse),
    )
)]
pub async fn get_price_change(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiQuery(query): ApiQuery<WindowQuery>,
) -> Result<impl IntoResponse, TrackerError> {
    let window_days = query
        .window_days()?
        .unwrap_or_else(|| TimeWindow::default().days());
    let change = state
        .tracker_service
        .get_price_change(&id, window_days)
        .await?;
    Ok(Json(change))
}

/// Event routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events/trending", get(get_trending))
        .route("/events/{id}", get(get_event))
        .route("/events/{id}/metrics", get(get_event_metrics))
        .route("/events/{id}/price-change", get(get_price_change))
}
