//! HTTP handlers for flood-risk prediction

use axum::extract::rejection::JsonRejection;
use axum::{extract::State, Json};
use shared::{validate_prediction_input, RiskPredictionInput, RiskPredictionResult};

use crate::error::{AppError, AppResult};
use crate::services::RiskModel;
use crate::AppState;

/// Predict flood risk for a ward.
///
/// Validation failures never reach a model; a validated request always
/// yields a result, degrading to the local model when the external one
/// fails.
pub async fn predict_flood_risk(
    State(state): State<AppState>,
    payload: Result<Json<RiskPredictionInput>, JsonRejection>,
) -> AppResult<Json<RiskPredictionResult>> {
    let Json(mut input) = payload.map_err(AppError::from)?;

    validate_prediction_input(&input)
        .map_err(|violations| AppError::Validation { violations })?;

    if state.ward_registry.enrich(&mut input) {
        tracing::debug!("Enriched prediction input from ward registry: {}", input.ward_id);
    }

    tracing::info!(
        "Prediction request for ward: {}, rainfall: {}mm, duration: {}h",
        input.ward_name,
        input.rainfall,
        input.duration
    );

    let result = state.risk_model.predict(&input).await?;

    Ok(Json(result))
}
