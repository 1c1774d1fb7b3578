//! Shared response types and helpers for API handlers.

use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Pagination metadata returned by list endpoints.
#[derive(Debug, Serialize)]
pub struct Pagination {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub pages: i64,
}

/// Build a raw media response with the given MIME type.
///
/// Generated media is never cacheable: each call to the same URL produces a
/// distinct asset, so intermediaries must not reuse a previous body.
pub fn media_response(content_type: &str, bytes: Vec<u8>) -> Response {
    (
        [
            (CONTENT_TYPE, content_type.to_string()),
            (
                CACHE_CONTROL,
                "no-cache, no-store, must-revalidate".to_string(),
            ),
        ],
        bytes,
    )
        .into_response()
}
