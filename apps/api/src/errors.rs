use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or empty required input. User-correctable, so it maps to 400.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An uploaded document could not be parsed into text. Distinguished
    /// from upstream failures so it maps to a 4xx and the user re-uploads.
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// The dialogue backend call failed or returned no usable text.
    #[error("Upstream error: {0}")]
    Upstream(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg),
            AppError::Extraction(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "EXTRACTION_ERROR", msg)
            }
            AppError::Upstream(msg) => {
                tracing::error!("Upstream dialogue error: {msg}");
                // The underlying message stays in the body for diagnostics.
                (StatusCode::INTERNAL_SERVER_ERROR, "UPSTREAM_ERROR", msg)
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
