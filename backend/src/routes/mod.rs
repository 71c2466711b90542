//! Route definitions for the FloodSense Delhi backend

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Weather: current conditions + aggregated 7-day forecast
        .route("/weather", get(handlers::get_weather))
        // Flood-risk prediction
        .route("/predict", post(handlers::predict_flood_risk))
        // Ward registry
        .route("/wards", get(handlers::list_wards))
        .route("/wards/:ward_id", get(handlers::get_ward))
}
