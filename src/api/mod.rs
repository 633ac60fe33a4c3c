//! REST API layer: route handlers, DTOs, OpenAPI document and router
//! composition.
//!
//! Resource endpoints are mounted under `/api/v1`; health and configuration
//! endpoints sit at the root.

pub mod docs;
pub mod dto;
pub mod extract;
pub mod handlers;

use axum::Router;

use crate::app_state::AppState;

pub use docs::ApiDoc;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .nest("/api/v1", handlers::routes())
        .merge(handlers::system::routes())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::Arc;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::config::QueryLimits;
    use crate::persistence::InMemoryStore;
    use crate::service::TrackerService;

    fn app() -> Router {
        let service = TrackerService::new(Arc::new(InMemoryStore::new()), QueryLimits::default());
        build_router().with_state(AppState::new(service))
    }

    async fn call(uri: &str) -> (StatusCode, serde_json::Value) {
        let Ok(request) = Request::builder().uri(uri).body(Body::empty()) else {
            panic!("valid request");
        };
        let response = app()
            .oneshot(request)
            .await
            .unwrap_or_else(|never| match never {});
        let status = response.status();
        let Ok(bytes) = to_bytes(response.into_body(), usize::MAX).await else {
            panic!("readable body");
        };
        let Ok(body) = serde_json::from_slice(&bytes) else {
            panic!("json body");
        };
        (status, body)
    }

    #[tokio::test]
    async fn malformed_window_gets_json_error() {
        let (status, body) = call("/api/v1/events/e1/price-change?windowDays=abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], 1001);

        let (status, body) = call("/api/v1/events/e1/metrics?windowDays=1.5").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], 1001);
    }

    #[tokio::test]
    async fn empty_store_serves_empty_views() {
        let (status, body) = call("/api/v1/events/trending").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!([]));

        let (status, body) = call("/api/v1/artists/top").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_null());
    }

    #[tokio::test]
    async fn missing_query_param_defaults() {
        let (status, body) = call("/api/v1/search/events").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!([]));
    }
}
