//! HTTP handlers for weather endpoints

use axum::{extract::State, Json};
use shared::WeatherBundle;

use crate::error::{AppError, AppResult};
use crate::services::ForecastAggregator;
use crate::AppState;

/// Fetch current conditions and the aggregated 7-day forecast for Delhi.
pub async fn get_weather(State(state): State<AppState>) -> AppResult<Json<WeatherBundle>> {
    let Some(client) = &state.weather_client else {
        tracing::error!("Weather API key not configured");
        return Err(AppError::WeatherNotConfigured);
    };

    tracing::info!("Fetching weather data from OpenWeatherMap...");

    let weather = &state.config.weather;
    let current = client.get_current(weather.latitude, weather.longitude).await?;
    let samples = client
        .get_forecast_samples(weather.latitude, weather.longitude)
        .await?;

    let forecast = ForecastAggregator::default().aggregate(&samples)?;
    tracing::info!("Aggregated {} forecast days", forecast.len());

    Ok(Json(WeatherBundle {
        current,
        forecast,
        is_live: true,
    }))
}
