//! External ML prediction client
//!
//! Client for a FastAPI-hosted flood prediction model. The wire format is
//! snake_case; responses are read leniently since model deployments have
//! drifted between snake_case and camelCase field names.

use chrono::Utc;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::{RiskFactors, RiskLevel, RiskPredictionInput, RiskPredictionResult};
use shared::{DEFAULT_DRAINAGE_DENSITY, DEFAULT_ELEVATION_M, DEFAULT_HISTORICAL_INCIDENTS};

use crate::error::{AppError, AppResult};

/// Model version reported when the remote endpoint omits one.
const DEFAULT_LIVE_VERSION: &str = "1.0.0-live";

/// Client for the external flood prediction model
#[derive(Clone)]
pub struct MlClient {
    api_url: String,
    api_key: Option<String>,
    http_client: Client,
}

/// Request body for the remote model
#[derive(Debug, Serialize)]
struct RemotePredictionRequest {
    ward_id: String,
    ward_name: String,
    rainfall_mm: f64,
    duration_hours: f64,
    elevation_m: f64,
    drainage_density: f64,
    historical_incidents: f64,
}

/// Response from the remote model, read leniently
#[derive(Debug, Deserialize)]
struct RemotePredictionResponse {
    #[serde(alias = "riskScore")]
    risk_score: Option<f64>,
    #[serde(alias = "riskLevel")]
    risk_level: Option<String>,
    confidence: Option<f64>,
    factors: Option<RemoteFactors>,
    recommendations: Option<Vec<String>>,
    #[serde(alias = "modelVersion")]
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RemoteFactors {
    #[serde(alias = "rainfallImpact")]
    rainfall_impact: Option<f64>,
    #[serde(alias = "durationImpact")]
    duration_impact: Option<f64>,
    #[serde(alias = "elevationImpact")]
    elevation_impact: Option<f64>,
    #[serde(alias = "drainageImpact")]
    drainage_impact: Option<f64>,
    #[serde(alias = "historicalImpact")]
    historical_impact: Option<f64>,
}

impl MlClient {
    /// Create a new ML prediction client
    pub fn new(api_url: String, api_key: Option<String>) -> Self {
        Self {
            api_url,
            api_key,
            http_client: Client::new(),
        }
    }

    /// Request a prediction from the remote model.
    ///
    /// One attempt, no retries; callers are expected to fall back to the
    /// simulated model on any error.
    pub async fn predict(&self, input: &RiskPredictionInput) -> AppResult<RiskPredictionResult> {
        let body = RemotePredictionRequest {
            ward_id: input.ward_id.clone(),
            ward_name: input.ward_name.clone(),
            rainfall_mm: input.rainfall,
            duration_hours: input.duration,
            elevation_m: input.elevation.unwrap_or(DEFAULT_ELEVATION_M),
            drainage_density: input.drainage_density.unwrap_or(DEFAULT_DRAINAGE_DENSITY),
            historical_incidents: input
                .historical_incidents
                .unwrap_or(DEFAULT_HISTORICAL_INCIDENTS),
        };

        tracing::info!("Calling external ML API: {}", self.api_url);

        let mut request = self.http_client.post(&self.api_url).json(&body);
        if let Some(key) = self.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::ModelError(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::ModelError(format!(
                "API returned {}: {}",
                status, body
            )));
        }

        let result: RemotePredictionResponse = response
            .json()
            .await
            .map_err(|e| AppError::ModelError(format!("failed to parse response: {}", e)))?;

        Ok(map_remote_response(input, result))
    }
}

/// Map the remote response into the dashboard result shape.
fn map_remote_response(
    input: &RiskPredictionInput,
    response: RemotePredictionResponse,
) -> RiskPredictionResult {
    let factors = response.factors.map_or(
        RiskFactors {
            rainfall_impact: 0.0,
            duration_impact: 0.0,
            elevation_impact: 0.0,
            drainage_impact: 0.0,
            historical_impact: 0.0,
        },
        |f| RiskFactors {
            rainfall_impact: f.rainfall_impact.unwrap_or(0.0),
            duration_impact: f.duration_impact.unwrap_or(0.0),
            elevation_impact: f.elevation_impact.unwrap_or(0.0),
            drainage_impact: f.drainage_impact.unwrap_or(0.0),
            historical_impact: f.historical_impact.unwrap_or(0.0),
        },
    );

    RiskPredictionResult {
        ward_id: input.ward_id.clone(),
        ward_name: input.ward_name.clone(),
        risk_score: response.risk_score.unwrap_or(0.0).round() as i32,
        risk_level: response
            .risk_level
            .as_deref()
            .map(RiskLevel::parse_lenient)
            .unwrap_or(RiskLevel::Low),
        confidence: response.confidence.unwrap_or(85.0),
        factors,
        recommendations: response.recommendations.unwrap_or_default(),
        model_version: response
            .model_version
            .unwrap_or_else(|| DEFAULT_LIVE_VERSION.to_string()),
        is_live: true,
        timestamp: Utc::now(),
    }
}
