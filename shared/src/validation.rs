//! Validation utilities for the FloodSense Delhi platform
//!
//! Prediction requests are validated field by field before any scoring
//! runs; violations are collected so callers see every problem at once.

use serde::Serialize;

use crate::models::RiskPredictionInput;

/// Maximum rainfall accepted in a prediction request, mm.
pub const MAX_RAINFALL_MM: f64 = 1000.0;
/// Maximum rainfall duration accepted, hours (one week).
pub const MAX_DURATION_HOURS: f64 = 168.0;
/// Maximum ward elevation accepted, metres.
pub const MAX_ELEVATION_M: f64 = 1000.0;
/// Maximum historical incident count accepted.
pub const MAX_HISTORICAL_INCIDENTS: f64 = 1000.0;

/// One field-level validation failure.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Validate a ward identifier: 1-50 chars, alphanumeric/underscore/hyphen.
pub fn validate_ward_id(ward_id: &str) -> Result<(), &'static str> {
    if ward_id.is_empty() {
        return Err("Ward ID must not be empty");
    }
    if ward_id.len() > 50 {
        return Err("Ward ID must be at most 50 characters");
    }
    if !ward_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err("Ward ID may only contain letters, digits, underscores and hyphens");
    }
    Ok(())
}

/// Validate a ward display name: 1-100 characters.
pub fn validate_ward_name(ward_name: &str) -> Result<(), &'static str> {
    if ward_name.is_empty() {
        return Err("Ward name must not be empty");
    }
    if ward_name.chars().count() > 100 {
        return Err("Ward name must be at most 100 characters");
    }
    Ok(())
}

fn check_range(
    violations: &mut Vec<FieldViolation>,
    field: &str,
    value: f64,
    min: f64,
    max: f64,
) {
    if !value.is_finite() || value < min || value > max {
        violations.push(FieldViolation::new(
            field,
            format!("must be a number between {} and {}", min, max),
        ));
    }
}

/// Validate a full prediction request, collecting every violation.
///
/// A request that fails here must never reach a risk model.
pub fn validate_prediction_input(
    input: &RiskPredictionInput,
) -> Result<(), Vec<FieldViolation>> {
    let mut violations = Vec::new();

    if let Err(msg) = validate_ward_id(&input.ward_id) {
        violations.push(FieldViolation::new("wardId", msg));
    }
    if let Err(msg) = validate_ward_name(&input.ward_name) {
        violations.push(FieldViolation::new("wardName", msg));
    }

    check_range(&mut violations, "rainfall", input.rainfall, 0.0, MAX_RAINFALL_MM);
    check_range(&mut violations, "duration", input.duration, 0.0, MAX_DURATION_HOURS);

    if let Some(elevation) = input.elevation {
        check_range(&mut violations, "elevation", elevation, 0.0, MAX_ELEVATION_M);
    }
    if let Some(drainage) = input.drainage_density {
        check_range(&mut violations, "drainageDensity", drainage, 0.0, 1.0);
    }
    if let Some(historical) = input.historical_incidents {
        check_range(
            &mut violations,
            "historicalIncidents",
            historical,
            0.0,
            MAX_HISTORICAL_INCIDENTS,
        );
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}
