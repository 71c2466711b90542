//! Weather sample and daily forecast models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{RiskLevel, WeatherCondition};

/// Daily rainfall (mm) at or above this triggers a critical flood-risk day.
pub const CRITICAL_RAINFALL_MM: f64 = 100.0;
/// Daily rainfall (mm) at or above this triggers a high flood-risk day.
pub const HIGH_RAINFALL_MM: f64 = 50.0;
/// Daily rainfall (mm) at or above this triggers a medium flood-risk day.
pub const MEDIUM_RAINFALL_MM: f64 = 20.0;

/// One sub-daily weather sample from the provider (one 3-hour slice).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherSample {
    pub timestamp: DateTime<Utc>,
    pub temperature_celsius: f64,
    pub humidity_percent: i32,
    /// Rainfall accumulated over the sample's time slice, in mm.
    pub rainfall_mm: f64,
    /// Provider-specific numeric condition code.
    pub condition_code: u16,
}

/// One calendar-day forecast aggregate, serialized in the dashboard's
/// camelCase wire format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyForecast {
    /// Short day name, e.g. "Mon".
    pub day: String,
    /// Day/month label, e.g. "24/8".
    pub date: String,
    pub temp: TempRange,
    /// Average humidity, integer percent.
    pub humidity: i32,
    /// Summed rainfall for the day, mm, rounded.
    pub rainfall: i32,
    pub condition: WeatherCondition,
    pub flood_risk: RiskLevel,
}

/// Min/max temperature for a day, degrees Celsius.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TempRange {
    pub min: i32,
    pub max: i32,
}

/// Current weather conditions for the dashboard header.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CurrentConditions {
    pub temp: i32,
    pub humidity: i32,
    /// Wind speed in km/h.
    pub wind_speed: i32,
    pub description: String,
}

/// Full weather payload: current conditions plus up to 7 daily forecasts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherBundle {
    pub current: CurrentConditions,
    pub forecast: Vec<DailyForecast>,
    pub is_live: bool,
}

/// Derive the flood-risk bucket for a day from its summed rainfall.
///
/// Pure and total: every non-negative rainfall maps to exactly one level.
pub fn flood_risk_for_rainfall(rainfall_mm: f64) -> RiskLevel {
    if rainfall_mm >= CRITICAL_RAINFALL_MM {
        RiskLevel::Critical
    } else if rainfall_mm >= HIGH_RAINFALL_MM {
        RiskLevel::High
    } else if rainfall_mm >= MEDIUM_RAINFALL_MM {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}
