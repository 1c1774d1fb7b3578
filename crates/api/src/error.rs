use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use cre8_core::error::CoreError;
use cre8_inference::InferenceError;

/// Application-level error type for HTTP handlers.
///
/// Wraps domain errors from `cre8_core`, upstream/classification errors
/// from `cre8_inference`, and database errors, and adds HTTP-specific
/// variants. Implements [`IntoResponse`] to produce consistent JSON error
/// responses: every body carries an `error` string and a machine-readable
/// `code`, plus `details` for upstream failures and `content` for
/// unclassifiable bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `cre8_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An error from the inference client layer.
    #[error(transparent)]
    Inference(#[from] InferenceError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => (
                    StatusCode::BAD_REQUEST,
                    json!({ "error": msg, "code": "VALIDATION_ERROR" }),
                ),
                CoreError::Unauthorized(msg) => (
                    StatusCode::UNAUTHORIZED,
                    json!({ "error": msg, "code": "UNAUTHORIZED" }),
                ),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        json!({ "error": "An internal error occurred", "code": "INTERNAL_ERROR" }),
                    )
                }
            },

            // --- Inference errors ---
            AppError::Inference(err) => inference_error_response(err),

            // --- Database errors ---
            AppError::Database(err) => {
                tracing::error!(error = %err, "Gallery store error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Failed to access the gallery store", "code": "STORAGE_ERROR" }),
                )
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": msg, "code": "BAD_REQUEST" }),
            ),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "An internal error occurred", "code": "INTERNAL_ERROR" }),
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

/// Map an inference-layer failure onto the HTTP surface.
///
/// Upstream rejections mirror the upstream status so callers can tell
/// "service rejected the request" from "service is down"; transport
/// failures become 502; unclassifiable bodies become 500 carrying a bounded
/// excerpt of the offending content.
fn inference_error_response(err: &InferenceError) -> (StatusCode, serde_json::Value) {
    match err {
        InferenceError::Upstream { status, body } => {
            tracing::error!(status = *status, details = %body, "Inference service rejected the request");
            let message = format!("API error: {status}");
            let status = StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY);
            (
                status,
                json!({ "error": message, "details": body, "code": "UPSTREAM_ERROR" }),
            )
        }
        InferenceError::Request(err) => {
            tracing::error!(error = %err, "Inference service unreachable");
            (
                StatusCode::BAD_GATEWAY,
                json!({
                    "error": "Inference service unreachable",
                    "details": err.to_string(),
                    "code": "UPSTREAM_ERROR",
                }),
            )
        }
        InferenceError::Classification { message, excerpt } => {
            tracing::error!(error = %message, "Unclassifiable inference response");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": "Unexpected response type from API",
                    "content": excerpt,
                    "code": "CLASSIFICATION_ERROR",
                }),
            )
        }
    }
}
