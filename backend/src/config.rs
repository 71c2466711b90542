//! Configuration management for the FloodSense Delhi backend
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with the FLOODSENSE__ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Weather provider configuration
    pub weather: WeatherConfig,

    /// External ML model configuration
    #[serde(default)]
    pub ml: MlConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// OpenWeatherMap API key; empty means the weather endpoint is disabled
    pub api_key: String,

    /// Weather API base URL
    pub base_url: String,

    /// Latitude the dashboard covers (Delhi)
    pub latitude: f64,

    /// Longitude the dashboard covers (Delhi)
    pub longitude: f64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct MlConfig {
    /// External ML prediction endpoint; when unset the simulated model is
    /// the sole authority
    pub api_url: Option<String>,

    /// Bearer token for the ML endpoint
    pub api_key: Option<String>,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("FLOODSENSE_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("weather.api_key", "")?
            .set_default("weather.base_url", "https://api.openweathermap.org/data/2.5")?
            // Delhi coordinates
            .set_default("weather.latitude", 28.6139)?
            .set_default("weather.longitude", 77.2090)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (FLOODSENSE__ prefix)
            .add_source(
                Environment::with_prefix("FLOODSENSE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

