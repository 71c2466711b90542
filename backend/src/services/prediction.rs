//! Flood-risk scoring
//!
//! A `RiskModel` maps a validated prediction request to a result. Three
//! implementations compose: `RemoteModel` delegates to the external ML
//! endpoint, `SimulatedModel` runs the deterministic weighted procedure,
//! and `FallbackModel` tries the remote once then falls back locally so
//! the caller always receives a valid result.

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use shared::{
    risk_level_for_score, RiskFactors, RiskLevel, RiskPredictionInput, RiskPredictionResult,
    DEFAULT_DRAINAGE_DENSITY, DEFAULT_ELEVATION_M, DEFAULT_HISTORICAL_INCIDENTS,
};

use crate::config::MlConfig;
use crate::error::AppResult;
use crate::external::MlClient;

/// Version tag for the local deterministic model.
pub const SIMULATED_MODEL_VERSION: &str = "1.0.0-simulated";
/// Version tag when the local model ran because the remote call failed.
pub const FALLBACK_MODEL_VERSION: &str = "1.0.0-fallback";

/// Feature weights of the simulated model, expressed as score fractions.
const WEIGHT_RAINFALL: f64 = 0.35;
const WEIGHT_DURATION: f64 = 0.20;
const WEIGHT_ELEVATION: f64 = -0.15;
const WEIGHT_DRAINAGE: f64 = -0.10;
const WEIGHT_HISTORICAL: f64 = 0.20;
const BASE_RISK: f64 = 0.1;

/// A flood-risk prediction capability.
#[async_trait]
pub trait RiskModel: Send + Sync {
    async fn predict(&self, input: &RiskPredictionInput) -> AppResult<RiskPredictionResult>;
}

/// Source of the confidence jitter. Injectable so tests can pin it.
pub trait JitterSource: Send + Sync {
    /// A value in [-5.0, 5.0].
    fn sample(&self) -> f64;
}

/// Production jitter: uniform in [-5, +5] from the thread RNG.
pub struct ThreadRngJitter;

impl JitterSource for ThreadRngJitter {
    fn sample(&self) -> f64 {
        rand::thread_rng().gen_range(-5.0..=5.0)
    }
}

/// Zero jitter, for deterministic tests.
pub struct NoJitter;

impl JitterSource for NoJitter {
    fn sample(&self) -> f64 {
        0.0
    }
}

/// The deterministic weighted scoring model.
pub struct SimulatedModel {
    jitter: Box<dyn JitterSource>,
}

impl Default for SimulatedModel {
    fn default() -> Self {
        Self {
            jitter: Box::new(ThreadRngJitter),
        }
    }
}

impl SimulatedModel {
    pub fn with_jitter(jitter: Box<dyn JitterSource>) -> Self {
        Self { jitter }
    }

    /// Score a validated request. Pure except for the confidence jitter.
    pub fn score(&self, input: &RiskPredictionInput) -> RiskPredictionResult {
        let elevation = input.elevation.unwrap_or(DEFAULT_ELEVATION_M);
        let drainage_density = input.drainage_density.unwrap_or(DEFAULT_DRAINAGE_DENSITY);
        let historical = input
            .historical_incidents
            .unwrap_or(DEFAULT_HISTORICAL_INCIDENTS);

        let normalized_rainfall = (input.rainfall / 200.0).min(1.0);
        let normalized_duration = (input.duration / 24.0).min(1.0);
        let normalized_elevation = 1.0 - (elevation / 300.0).min(1.0);
        let normalized_historical = (historical / 25.0).min(1.0);

        let rainfall_impact = normalized_rainfall * WEIGHT_RAINFALL * 100.0;
        let duration_impact = normalized_duration * WEIGHT_DURATION * 100.0;
        let elevation_impact = normalized_elevation * WEIGHT_ELEVATION * -100.0;
        let drainage_impact = (1.0 - drainage_density) * WEIGHT_DRAINAGE * -100.0;
        let historical_impact = normalized_historical * WEIGHT_HISTORICAL * 100.0;

        let mut risk_score = BASE_RISK * 100.0
            + rainfall_impact
            + duration_impact
            + elevation_impact
            + drainage_impact
            + historical_impact;

        // Nonlinear surge above 100mm of rainfall
        if input.rainfall > 100.0 {
            risk_score += ((input.rainfall - 100.0) / 100.0).powf(1.5) * 20.0;
        }

        risk_score = risk_score.clamp(0.0, 100.0);
        let risk_level = risk_level_for_score(risk_score);

        // Confidence drops 5 points per defaulted input, then jitters
        let mut confidence = 85.0;
        if input.elevation.is_none() {
            confidence -= 5.0;
        }
        if input.drainage_density.is_none() {
            confidence -= 5.0;
        }
        if input.historical_incidents.is_none() {
            confidence -= 5.0;
        }
        confidence += self.jitter.sample();
        confidence = confidence.clamp(70.0, 98.0);

        let recommendations = build_recommendations(risk_level, input.rainfall);

        RiskPredictionResult {
            ward_id: input.ward_id.clone(),
            ward_name: input.ward_name.clone(),
            risk_score: risk_score.round() as i32,
            risk_level,
            confidence: round1(confidence),
            factors: RiskFactors {
                rainfall_impact: round1(rainfall_impact),
                duration_impact: round1(duration_impact),
                elevation_impact: round1(elevation_impact),
                drainage_impact: round1(drainage_impact),
                historical_impact: round1(historical_impact),
            },
            recommendations,
            model_version: SIMULATED_MODEL_VERSION.to_string(),
            is_live: false,
            timestamp: Utc::now(),
        }
    }
}

#[async_trait]
impl RiskModel for SimulatedModel {
    async fn predict(&self, input: &RiskPredictionInput) -> AppResult<RiskPredictionResult> {
        Ok(self.score(input))
    }
}

/// The external ML model.
pub struct RemoteModel {
    client: MlClient,
}

impl RemoteModel {
    pub fn new(client: MlClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RiskModel for RemoteModel {
    async fn predict(&self, input: &RiskPredictionInput) -> AppResult<RiskPredictionResult> {
        self.client.predict(input).await
    }
}

/// Remote-first model with guaranteed local fallback.
pub struct FallbackModel {
    remote: Option<Box<dyn RiskModel>>,
    simulated: SimulatedModel,
}

impl FallbackModel {
    pub fn new(remote: Option<Box<dyn RiskModel>>, simulated: SimulatedModel) -> Self {
        Self { remote, simulated }
    }

    /// Build from configuration: remote model only when an endpoint is set.
    pub fn from_config(config: &MlConfig) -> Self {
        let remote = config
            .api_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .map(|url| {
                Box::new(RemoteModel::new(MlClient::new(
                    url.to_string(),
                    config.api_key.clone(),
                ))) as Box<dyn RiskModel>
            });

        Self::new(remote, SimulatedModel::default())
    }
}

#[async_trait]
impl RiskModel for FallbackModel {
    /// Never fails for a validated input: one remote attempt, then the
    /// simulated model tagged as a fallback.
    async fn predict(&self, input: &RiskPredictionInput) -> AppResult<RiskPredictionResult> {
        let Some(remote) = &self.remote else {
            let result = self.simulated.score(input);
            tracing::info!(
                "Simulated prediction for {}: {} ({}%)",
                input.ward_name,
                result.risk_level,
                result.risk_score
            );
            return Ok(result);
        };

        match remote.predict(input).await {
            Ok(result) => {
                tracing::info!(
                    "Live ML prediction for {}: {} ({}%)",
                    input.ward_name,
                    result.risk_level,
                    result.risk_score
                );
                Ok(result)
            }
            Err(e) => {
                tracing::warn!("External ML API failed, using fallback: {}", e);
                let mut result = self.simulated.score(input);
                result.model_version = FALLBACK_MODEL_VERSION.to_string();
                tracing::info!(
                    "Fallback prediction for {}: {} ({}%)",
                    input.ward_name,
                    result.risk_level,
                    result.risk_score
                );
                Ok(result)
            }
        }
    }
}

/// Append recommendations in fixed trigger order; triggers can stack.
fn build_recommendations(level: RiskLevel, rainfall_mm: f64) -> Vec<String> {
    let mut recommendations = Vec::new();

    if level == RiskLevel::Critical || level == RiskLevel::High {
        recommendations.push("Issue flood warning alert for the ward".to_string());
        recommendations.push("Pre-position emergency response teams".to_string());
    }
    if rainfall_mm > 100.0 {
        recommendations.push("Activate drainage pump stations".to_string());
        recommendations.push("Clear debris from storm drains".to_string());
    }
    if level == RiskLevel::Medium {
        recommendations.push("Monitor situation closely".to_string());
        recommendations.push("Prepare evacuation routes".to_string());
    }
    if level == RiskLevel::Low {
        recommendations.push("Routine monitoring sufficient".to_string());
    }

    recommendations
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
