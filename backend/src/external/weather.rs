//! Weather API client for fetching weather data
//!
//! Integrates with OpenWeatherMap for current conditions and the 5-day /
//! 3-hour forecast that feeds the daily aggregator.

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use shared::{CurrentConditions, WeatherSample};

use crate::error::{AppError, AppResult};

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// OpenWeatherMap API response for current weather
#[derive(Debug, Deserialize)]
struct OwmCurrentResponse {
    weather: Vec<OwmWeather>,
    main: OwmMain,
    wind: OwmWind,
}

#[derive(Debug, Deserialize)]
struct OwmWeather {
    id: u16,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    humidity: i32,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
}

/// OpenWeatherMap API response for the 3-hour forecast
#[derive(Debug, Deserialize)]
struct OwmForecastResponse {
    list: Vec<OwmForecastItem>,
}

#[derive(Debug, Deserialize)]
struct OwmForecastItem {
    dt: i64,
    main: OwmMain,
    weather: Vec<OwmWeather>,
    rain: Option<OwmRain>,
}

#[derive(Debug, Deserialize)]
struct OwmRain {
    #[serde(rename = "3h")]
    three_hour: Option<f64>,
}

impl WeatherClient {
    /// Create a new WeatherClient
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: "https://api.openweathermap.org/data/2.5".to_string(),
        }
    }

    /// Create a new WeatherClient with custom base URL (for testing)
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
        }
    }

    /// Fetch current weather conditions by GPS coordinates
    pub async fn get_current(&self, latitude: f64, longitude: f64) -> AppResult<CurrentConditions> {
        let url = format!(
            "{}/weather?lat={}&lon={}&appid={}&units=metric",
            self.base_url, latitude, longitude, self.api_key
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::WeatherUnavailable(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::WeatherUnavailable(format!(
                "weather API error: {} - {}",
                status, body
            )));
        }

        let data: OwmCurrentResponse = response
            .json()
            .await
            .map_err(|e| AppError::WeatherUnavailable(format!("failed to parse response: {}", e)))?;

        let description = data
            .weather
            .first()
            .map(|w| w.description.clone())
            .unwrap_or_default();

        Ok(CurrentConditions {
            temp: data.main.temp.round() as i32,
            humidity: data.main.humidity,
            // m/s to km/h
            wind_speed: (data.wind.speed * 3.6).round() as i32,
            description,
        })
    }

    /// Fetch the raw 3-hour forecast samples by GPS coordinates
    pub async fn get_forecast_samples(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> AppResult<Vec<WeatherSample>> {
        let url = format!(
            "{}/forecast?lat={}&lon={}&appid={}&units=metric",
            self.base_url, latitude, longitude, self.api_key
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::WeatherUnavailable(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::WeatherUnavailable(format!(
                "forecast API error: {} - {}",
                status, body
            )));
        }

        let data: OwmForecastResponse = response
            .json()
            .await
            .map_err(|e| AppError::WeatherUnavailable(format!("failed to parse response: {}", e)))?;

        data.list.into_iter().map(convert_forecast_item).collect()
    }
}

/// Convert one provider forecast slice into a weather sample.
fn convert_forecast_item(item: OwmForecastItem) -> AppResult<WeatherSample> {
    let timestamp = DateTime::<Utc>::from_timestamp(item.dt, 0)
        .ok_or_else(|| AppError::MalformedSample(format!("invalid timestamp {}", item.dt)))?;

    let condition_code = item
        .weather
        .first()
        .map(|w| w.id)
        .ok_or_else(|| AppError::MalformedSample("missing weather condition entry".to_string()))?;

    Ok(WeatherSample {
        timestamp,
        temperature_celsius: item.main.temp,
        humidity_percent: item.main.humidity,
        rainfall_mm: item.rain.and_then(|r| r.three_hour).unwrap_or(0.0),
        condition_code,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_forecast_item_defaults_missing_rain_to_zero() {
        let item = OwmForecastItem {
            dt: 1_724_475_600,
            main: OwmMain {
                temp: 31.4,
                humidity: 70,
            },
            weather: vec![OwmWeather {
                id: 500,
                description: "light rain".to_string(),
            }],
            rain: None,
        };

        let sample = convert_forecast_item(item).unwrap();
        assert_eq!(sample.rainfall_mm, 0.0);
        assert_eq!(sample.condition_code, 500);
    }

    #[test]
    fn test_convert_forecast_item_missing_condition_is_error() {
        let item = OwmForecastItem {
            dt: 1_724_475_600,
            main: OwmMain {
                temp: 31.4,
                humidity: 70,
            },
            weather: vec![],
            rain: None,
        };

        assert!(matches!(
            convert_forecast_item(item),
            Err(AppError::MalformedSample(_))
        ));
    }
}
