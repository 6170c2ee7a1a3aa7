//! Handball tagger API server entry point.

use std::error::Error;
use std::sync::Arc;

use handtag_core::clock::SystemClock;
use handtag_event_store::SqliteRepository;
use handtag_tagging::application::event_store::EventStore;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use handtag_api::config::AppConfig;
use handtag_api::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting handball tagger API server");

    let config = AppConfig::from_env()?;

    // Open the local database and apply the schema.
    let repository = SqliteRepository::connect(&config.database_url, config.max_connections).await?;

    let store = EventStore::new(Arc::new(repository), Arc::new(SystemClock));
    let app_state = AppState::new(Arc::new(store));

    // Build router.
    let app = handtag_api::build_router(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = config.socket_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
