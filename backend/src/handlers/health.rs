//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub weather_configured: bool,
    pub ml_configured: bool,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        weather_configured: !state.config.weather.api_key.trim().is_empty(),
        ml_configured: state
            .config
            .ml
            .api_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty()),
    })
}
