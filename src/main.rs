//! showstalk-api server entry point.
//!
//! Starts the Axum HTTP server over the configured metrics store.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use showstalk_api::api;
use showstalk_api::app_state::AppState;
use showstalk_api::config::{LogFormat, StoreBackend, TrackerConfig};
use showstalk_api::persistence::{InMemoryStore, MetricsStore, PostgresStore};
use showstalk_api::service::TrackerService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = TrackerConfig::from_env()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
    tracing::info!(
        addr = %config.listen_addr,
        backend = ?config.store_backend,
        "starting showstalk-api"
    );

    // Build persistence layer
    let store = open_store(&config).await?;

    // Build service layer
    let app_state = AppState::new(TrackerService::new(store, config.limits));

    // Build router
    let app = Router::new().merge(api::build_router());

    #[cfg(feature = "swagger-ui")]
    let app = {
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;
        app.merge(
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api::ApiDoc::openapi()),
        )
    };

    let app = app
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

async fn open_store(config: &TrackerConfig) -> anyhow::Result<Arc<dyn MetricsStore>> {
    match config.store_backend {
        StoreBackend::Postgres => {
            let store = PostgresStore::connect(&config.database).await?;
            if config.database.run_migrations {
                store.run_migrations().await?;
            }
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            let store = match &config.seed_path {
                Some(path) => InMemoryStore::load_seed_file(path).await?,
                None => {
                    tracing::warn!("memory backend without SEED_PATH starts empty");
                    InMemoryStore::new()
                }
            };
            Ok(Arc::new(store))
        }
    }
}
