//! FloodSense Delhi - Backend Server
//!
//! Citizen-facing flood-risk service for Delhi wards: weather forecast
//! aggregation and per-ward risk prediction.

use std::net::SocketAddr;

use floodsense_backend::{config::Config, create_app, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "floodsense_server=debug,floodsense_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting FloodSense Delhi Server");
    tracing::info!("Environment: {}", config.environment);
    if config.ml.api_url.is_none() {
        tracing::info!("No external ML endpoint configured; simulated model is authoritative");
    }

    let port = config.server.port;
    let state = AppState::new(config);

    // Build application
    let app = create_app(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
