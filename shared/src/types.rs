//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// Flood risk severity. Ordered: `Low < Medium < High < Critical`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
            RiskLevel::Critical => write!(f, "critical"),
        }
    }
}

impl RiskLevel {
    /// Parse a wire-format risk level string, defaulting to `Low` for
    /// anything unrecognized (mirrors how remote model responses are read).
    pub fn parse_lenient(s: &str) -> Self {
        match s {
            "critical" => RiskLevel::Critical,
            "high" => RiskLevel::High,
            "medium" => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }
}

/// Canonical daily weather condition buckets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    Sunny,
    PartlyCloudy,
    Cloudy,
    Rainy,
    HeavyRain,
}

impl std::fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeatherCondition::Sunny => write!(f, "sunny"),
            WeatherCondition::PartlyCloudy => write!(f, "partly_cloudy"),
            WeatherCondition::Cloudy => write!(f, "cloudy"),
            WeatherCondition::Rainy => write!(f, "rainy"),
            WeatherCondition::HeavyRain => write!(f, "heavy_rain"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_ordering() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
        assert!(RiskLevel::High < RiskLevel::Critical);
    }

    #[test]
    fn test_risk_level_serde_format() {
        assert_eq!(
            serde_json::to_string(&RiskLevel::Critical).unwrap(),
            "\"critical\""
        );
        assert_eq!(
            serde_json::to_string(&WeatherCondition::PartlyCloudy).unwrap(),
            "\"partly_cloudy\""
        );
    }

    #[test]
    fn test_parse_lenient_unknown_is_low() {
        assert_eq!(RiskLevel::parse_lenient("severe"), RiskLevel::Low);
        assert_eq!(RiskLevel::parse_lenient("high"), RiskLevel::High);
    }
}
