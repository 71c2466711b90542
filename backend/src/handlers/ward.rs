//! HTTP handlers for ward metadata

use axum::{
    extract::{Path, State},
    Json,
};
use shared::Ward;

use crate::error::{AppError, AppResult};
use crate::AppState;

/// List all registered wards.
pub async fn list_wards(State(state): State<AppState>) -> Json<Vec<Ward>> {
    Json(state.ward_registry.list().to_vec())
}

/// Get one ward by id.
pub async fn get_ward(
    State(state): State<AppState>,
    Path(ward_id): Path<String>,
) -> AppResult<Json<Ward>> {
    let ward = state
        .ward_registry
        .get(&ward_id)
        .cloned()
        .ok_or_else(|| AppError::NotFound("Ward".to_string()))?;
    Ok(Json(ward))
}
