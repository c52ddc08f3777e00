//! Error handling

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use serde_json::json;

use placement_core::logic::model::{EstimatorError, InferenceError};
use placement_core::logic::roadmap::RoadmapError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Input errors
    #[error("validation failed: {0}")]
    ValidationError(String),
    #[error("{0}")]
    CoercionError(String),

    // Model errors
    #[error("model error: {0}")]
    ModelError(String),

    // Generic errors
    #[error("internal error: {0}")]
    InternalError(String),
}

impl AppError {
    /// Status code and the message safe to show a client
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::CoercionError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::ModelError(msg) => {
                tracing::error!("Model error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Prediction failed".to_string())
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = self.status_and_message();

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<InferenceError> for AppError {
    fn from(err: InferenceError) -> Self {
        match err {
            InferenceError::Align(e) => AppError::CoercionError(e.to_string()),
            InferenceError::Estimator(e @ EstimatorError::LayoutMismatch { .. }) => {
                AppError::InternalError(e.to_string())
            }
            InferenceError::Estimator(e) => AppError::ModelError(e.to_string()),
        }
    }
}

impl From<RoadmapError> for AppError {
    fn from(err: RoadmapError) -> Self {
        AppError::InternalError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}
