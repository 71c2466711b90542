//! Error handling for the FloodSense Delhi backend
//!
//! Every failure path terminates in a well-formed JSON error object with a
//! distinguishing code; scoring fallbacks are handled before errors reach
//! this layer.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::FieldViolation;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Invalid input parameters")]
    Validation { violations: Vec<FieldViolation> },

    #[error("Invalid JSON payload")]
    InvalidJson,

    #[error("Request too large")]
    PayloadTooLarge,

    // Aggregation errors
    #[error("Malformed weather sample: {0}")]
    MalformedSample(String),

    // External service errors
    #[error("Weather service not configured")]
    WeatherNotConfigured,

    #[error("Weather service unavailable: {0}")]
    WeatherUnavailable(String),

    #[error("Prediction model error: {0}")]
    ModelError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldViolation>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::Validation { violations } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message: "Invalid input parameters".to_string(),
                    details: Some(violations.clone()),
                },
            ),
            AppError::InvalidJson => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "INVALID_JSON".to_string(),
                    message: "Invalid JSON payload".to_string(),
                    details: None,
                },
            ),
            AppError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                ErrorDetail {
                    code: "PAYLOAD_TOO_LARGE".to_string(),
                    message: "Request too large".to_string(),
                    details: None,
                },
            ),
            AppError::MalformedSample(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail {
                    code: "MALFORMED_SAMPLE".to_string(),
                    message: format!("Malformed weather sample: {}", msg),
                    details: None,
                },
            ),
            AppError::WeatherNotConfigured => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorDetail {
                    code: "SERVICE_NOT_CONFIGURED".to_string(),
                    message: "Weather service not configured".to_string(),
                    details: None,
                },
            ),
            AppError::WeatherUnavailable(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorDetail {
                    code: "SERVICE_UNAVAILABLE".to_string(),
                    message: "Weather data temporarily unavailable".to_string(),
                    details: None,
                },
            ),
            AppError::ModelError(msg) => (
                StatusCode::BAD_GATEWAY,
                ErrorDetail {
                    code: "MODEL_ERROR".to_string(),
                    message: format!("Prediction model error: {}", msg),
                    details: None,
                },
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "NOT_FOUND".to_string(),
                    message: format!("{} not found", resource),
                    details: None,
                },
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message: msg.clone(),
                    details: None,
                },
            ),
            AppError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred".to_string(),
                    details: None,
                },
            ),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge
        } else {
            AppError::InvalidJson
        }
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
