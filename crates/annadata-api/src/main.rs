//! # annadata-api — Binary Entry Point
//!
//! Starts the Axum HTTP server for the scheme portal.
//! Binds to a configurable port (default 8080).

use annadata_api::state::{AppConfig, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();
    tracing::info!(?config, "starting annadata api");

    let state = AppState::try_from_config(config).map_err(|e| {
        tracing::error!("Catalog load failed: {e}");
        e
    })?;
    tracing::info!(
        schemes = state.engine.catalog().len(),
        advisories = state.advisories.len(),
        "catalog ready"
    );

    let _news = state.spawn_news_rotation();
    let port = state.config.port;
    let app = annadata_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Annadata API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
