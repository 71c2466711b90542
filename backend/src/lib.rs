//! FloodSense Delhi - Backend library
//!
//! A flood-risk dashboard backend for Delhi wards: live weather retrieval
//! with daily forecast aggregation, and a risk-scoring pipeline with
//! remote-ML delegation and a deterministic local fallback.

use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;

use external::WeatherClient;
use services::{FallbackModel, WardRegistry};

/// Maximum accepted request body size (10KB).
pub const MAX_REQUEST_BYTES: usize = 10 * 1024;

/// Application state shared across handlers. Clients are built once here
/// so requests share the underlying connection pools.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub ward_registry: Arc<WardRegistry>,
    /// Absent when no weather API key is configured.
    pub weather_client: Option<WeatherClient>,
    pub risk_model: Arc<FallbackModel>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let api_key = config.weather.api_key.trim();
        let weather_client = (!api_key.is_empty()).then(|| {
            WeatherClient::with_base_url(api_key.to_string(), config.weather.base_url.clone())
        });
        let risk_model = Arc::new(FallbackModel::from_config(&config.ml));

        Self {
            config: Arc::new(config),
            ward_registry: Arc::new(WardRegistry::delhi()),
            weather_client,
            risk_model,
        }
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "FloodSense Delhi API v1.0"
}
