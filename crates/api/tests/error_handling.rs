//! Tests for `AppError` -> HTTP response mapping.
//!
//! These tests verify that each `AppError` variant produces the HTTP status
//! and JSON body shape the UI contracts depend on. They do NOT need an HTTP
//! server -- they call `IntoResponse` directly on `AppError` values.

use axum::response::IntoResponse;
use http_body_util::BodyExt;

use cre8_api::error::AppError;
use cre8_core::error::CoreError;
use cre8_inference::InferenceError;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (axum::http::StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Test: CoreError::Validation maps to 400 with a plain error body
// ---------------------------------------------------------------------------

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation(
        "Missing required parameter: prompt".into(),
    ));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Missing required parameter: prompt");
}

// ---------------------------------------------------------------------------
// Test: CoreError::Unauthorized maps to 401
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unauthorized_error_returns_401() {
    let err = AppError::Core(CoreError::Unauthorized("Missing Authorization header".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");
}

// ---------------------------------------------------------------------------
// Test: upstream rejections mirror the upstream status and carry details
// ---------------------------------------------------------------------------

#[tokio::test]
async fn upstream_error_mirrors_status_and_carries_details() {
    let err = AppError::Inference(InferenceError::Upstream {
        status: 415,
        body: "unsupported media type".into(),
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(json["error"], "API error: 415");
    assert_eq!(json["details"], "unsupported media type");
    assert_eq!(json["code"], "UPSTREAM_ERROR");
}

// ---------------------------------------------------------------------------
// Test: classification failures return 500 with a bounded content excerpt
// ---------------------------------------------------------------------------

#[tokio::test]
async fn classification_error_returns_500_with_content_excerpt() {
    let err = AppError::Inference(InferenceError::Classification {
        message: "invalid JSON body".into(),
        excerpt: "<html>oops".into(),
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Unexpected response type from API");
    assert_eq!(json["content"], "<html>oops");
    assert_eq!(json["code"], "CLASSIFICATION_ERROR");
}

// ---------------------------------------------------------------------------
// Test: database errors return a generic 500 and never leak details
// ---------------------------------------------------------------------------

#[tokio::test]
async fn database_error_returns_generic_500() {
    let err = AppError::Database(sqlx::Error::PoolTimedOut);

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "STORAGE_ERROR");

    let body_text = json.to_string();
    assert!(
        !body_text.contains("pool"),
        "Storage error response must not leak driver details"
    );
}

// ---------------------------------------------------------------------------
// Test: AppError::InternalError sanitizes the message
// ---------------------------------------------------------------------------

#[tokio::test]
async fn internal_error_returns_500_and_sanitizes_message() {
    let err = AppError::InternalError("secret credentials leaked".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");

    let body_text = json.to_string();
    assert!(
        !body_text.contains("secret"),
        "Internal error response must not leak sensitive details"
    );
    assert_eq!(json["error"], "An internal error occurred");
}
