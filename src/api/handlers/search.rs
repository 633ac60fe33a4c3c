//! Search handlers for artists and events.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::SearchQuery;
use crate::api::extract::ApiQuery;
use crate::app_state::AppState;
use crate::domain::{Artist, EventSearchHit};
use crate::error::{ErrorResponse, TrackerError};

/// `GET /search/artists`: Artist name or slug search.
///
/// # Errors
///
/// Returns [`TrackerError::StoreUnavailable`] if the store fails.
#[utoipa::path(
    get,
    path = "/api/v1/search/artists",
    tag = "Search",
    summary = "Search artists",
    description = "Case-insensitive substring match on artist name or slug. At most 10 results.",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching artists", body = Vec<Artist>),
        (status = 503, description = "Store unavailable", body = ErrorResponse),
    )
)]
pub async fn search_artists(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> Result<impl IntoResponse, TrackerError> {
    let artists = state.tracker_service.search_artists(&query.q).await?;
    Ok(Json(artists))
}

/// `GET /search/events`: Multi-term event search.
///
/// # Errors
///
/// Returns [`TrackerError::StoreUnavailable`] if the store fails.
#[utoipa::path(
    get,
    path = "/api/v1/search/events",
    tag = "Search",
    summary = "Search events",
    description = "Splits the query on whitespace; every term must match the event name, an artist name, or the venue name, city or state. Only events that started at most 30 days ago are returned. Queries under two characters return an empty list. At most 8 results.",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching events", body = Vec<EventSearchHit>),
        (status = 503, description = "Store unavailable", body = ErrorResponse),
    )
)]
pub async fn search_events(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> Result<impl IntoResponse, TrackerError> {
    let hits = state.tracker_service.search_events(&query.q).await?;
    Ok(Json(hits))
}

/// Search routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/search/artists", get(search_artists))
        .route("/search/events", get(search_events))
}
