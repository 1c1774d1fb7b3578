//! Integration tests for the gallery endpoints: authentication gates and
//! create-time validation.
//!
//! The test pool is lazy and points at a refusing port, so any test that
//! passes validation and reaches the repository layer observes a storage
//! failure -- which is itself part of the contract under test.

mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

use common::{bearer_token, build_test_app};

const UNUSED_UPSTREAM: &str = "http://127.0.0.1:1";

async fn send(
    request: Request<Body>,
) -> (StatusCode, serde_json::Value) {
    let app = build_test_app(UNUSED_UPSTREAM);
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

fn get_gallery(token: Option<&str>, query: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::GET)
        .uri(format!("/api/gallery{query}"));
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

fn post_gallery(token: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri("/api/gallery")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

// ---------------------------------------------------------------------------
// Authentication gates
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_requires_authentication() {
    let (status, body) = send(get_gallery(None, "")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn create_requires_authentication() {
    let (status, body) = send(post_gallery(None, json!({ "type": "Image" }))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn garbage_token_is_rejected() {
    let (status, body) = send(get_gallery(Some("not-a-real-token"), "")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid or expired token");
}

#[tokio::test]
async fn non_bearer_authorization_is_rejected() {
    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/gallery")
        .header(header::AUTHORIZATION, "Basic dXNlcjpwdw==")
        .body(Body::empty())
        .unwrap();

    let (status, _body) = send(request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Create-time validation (rejects before touching the store)
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_names_every_missing_required_field() {
    let token = bearer_token("user_a");

    let (status, body) = send(post_gallery(Some(&token), json!({ "type": "Image" }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Missing required fields: prompt, contentData, contentType"
    );
}

#[tokio::test]
async fn create_rejects_unknown_media_type() {
    let token = bearer_token("user_a");

    let (status, body) = send(post_gallery(
        Some(&token),
        json!({
            "type": "Painting",
            "prompt": "a cat",
            "contentData": "aGk=",
            "contentType": "image/png",
        }),
    ))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("Invalid media type"));
}

#[tokio::test]
async fn list_rejects_unknown_type_filter() {
    let token = bearer_token("user_a");

    let (status, _body) = send(get_gallery(Some(&token), "?type=Painting")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Storage failure surface
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unreachable_store_surfaces_as_generic_storage_error() {
    let token = bearer_token("user_a");

    let (status, body) = send(post_gallery(
        Some(&token),
        json!({
            "type": "Image",
            "prompt": "a cat",
            "contentData": "aGk=",
            "contentType": "image/png",
        }),
    ))
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "STORAGE_ERROR");
    assert_eq!(body["error"], "Failed to access the gallery store");
}
