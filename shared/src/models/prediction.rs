//! Flood-risk prediction models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::RiskLevel;

/// Elevation assumed for a ward when the caller does not supply one (m).
pub const DEFAULT_ELEVATION_M: f64 = 220.0;
/// Drainage density assumed when not supplied (0-1 scale).
pub const DEFAULT_DRAINAGE_DENSITY: f64 = 0.5;
/// Historical incident count assumed when not supplied.
pub const DEFAULT_HISTORICAL_INCIDENTS: f64 = 10.0;

/// Risk score (clamped, unrounded) at or above which a prediction is critical.
pub const CRITICAL_SCORE: f64 = 80.0;
/// Score at or above which a prediction is high risk.
pub const HIGH_SCORE: f64 = 60.0;
/// Score at or above which a prediction is medium risk.
pub const MEDIUM_SCORE: f64 = 40.0;

/// A flood-risk prediction request for one ward.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RiskPredictionInput {
    pub ward_id: String,
    pub ward_name: String,
    /// Rainfall in mm, 0-1000.
    pub rainfall: f64,
    /// Rainfall duration in hours, 0-168 (one week).
    pub duration: f64,
    /// Ward mean elevation in metres, 0-1000.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,
    /// Drainage infrastructure density, 0-1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drainage_density: Option<f64>,
    /// Recorded flood incidents for the ward, 0-1000.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub historical_incidents: Option<f64>,
}

/// Per-factor contributions to the risk score, percentage points rounded
/// to one decimal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RiskFactors {
    pub rainfall_impact: f64,
    pub duration_impact: f64,
    pub elevation_impact: f64,
    pub drainage_impact: f64,
    pub historical_impact: f64,
}

/// A completed flood-risk prediction. Immutable once returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskPredictionResult {
    pub ward_id: String,
    pub ward_name: String,
    /// Integer score, 0-100.
    pub risk_score: i32,
    pub risk_level: RiskLevel,
    /// Model confidence, 70.0-98.0, one decimal.
    pub confidence: f64,
    pub factors: RiskFactors,
    pub recommendations: Vec<String>,
    /// Tag of the scoring path that produced this result.
    pub model_version: String,
    /// True when the result came from the live external model.
    pub is_live: bool,
    pub timestamp: DateTime<Utc>,
}

/// Bucket a clamped risk score into a risk level.
///
/// The level is taken from the unrounded score; the reported integer score
/// is rounded separately, so a score of 79.6 reports as 80 with level
/// `High`. This matches the reference model.
pub fn risk_level_for_score(score: f64) -> RiskLevel {
    if score >= CRITICAL_SCORE {
        RiskLevel::Critical
    } else if score >= HIGH_SCORE {
        RiskLevel::High
    } else if score >= MEDIUM_SCORE {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}
