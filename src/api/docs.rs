//! OpenAPI document for every REST endpoint.

use utoipa::OpenApi;

use super::handlers::{artists, events, search, system};
use crate::error::{ErrorBody, ErrorResponse};

/// Generated OpenAPI description, served at `/api-docs/openapi.json`.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "showstalk-api",
        description = "Concert ticket price tracking: trending events, price history and price changes."
    ),
    paths(
        events::get_trending,
        events::get_event,
        events::get_event_metrics,
        events::get_price_change,
        artists::top_artist,
        search::search_artists,
        search::search_events,
        system::health_handler,
        system::time_windows_handler,
    ),
    components(schemas(ErrorResponse, ErrorBody)),
    tags(
        (name = "Events", description = "Trending events and price data"),
        (name = "Artists", description = "Artist catalog"),
        (name = "Search", description = "Artist and event search"),
        (name = "System", description = "Health and configuration"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/events/trending",
            "/api/v1/events/{id}",
            "/api/v1/events/{id}/metrics",
            "/api/v1/events/{id}/price-change",
            "/api/v1/artists/top",
            "/api/v1/search/artists",
            "/api/v1/search/events",
            "/health",
            "/config/time-windows",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
