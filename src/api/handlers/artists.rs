//! Artist handlers.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::app_state::AppState;
use crate::domain::Artist;
use crate::error::{ErrorResponse, TrackerError};

/// `GET /artists/top`: Artist with the most upcoming shows.
///
/// # Errors
///
/// Returns [`TrackerError::StoreUnavailable`] if the store fails.
#[utoipa::path(
    get,
    path = "/api/v1/artists/top",
    tag = "Artists",
    summary = "Get the busiest artist",
    description = "Returns the artist with the most upcoming shows, or null when no artists are known.",
    responses(
        (status = 200, description = "Top artist", body = Option<Artist>),
        (status = 503, description = "Store unavailable", body = ErrorResponse),
    )
)]
pub async fn top_artist(State(state): State<AppState>) -> Result<impl IntoResponse, TrackerError> {
    let artist = state.tracker_service.top_artist().await?;
    Ok(Json(artist))
}

/// Artist routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/artists/top", get(top_artist))
}
