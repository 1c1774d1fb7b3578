//! Fallback sequencing and end-to-end proxy tests against a local stand-in
//! for the inference service.
//!
//! The stand-in is a plain axum server bound to an ephemeral port, so these
//! tests exercise the real wire path (encodings, trailing-slash routes,
//! secondary fetches) without any external dependency.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use assert_matches::assert_matches;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;

use cre8_core::generation::GenerationRequest;
use cre8_inference::classify::ClassifyProfile;
use cre8_inference::encode;
use cre8_inference::{GenerationResult, InferenceClient, InferenceError};

/// Shared request counter for the stand-in service.
#[derive(Clone, Default)]
struct Hits(Arc<AtomicUsize>);

impl Hits {
    fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// Accepts only urlencoded bodies; everything else is 415.
async fn urlencoded_only(
    State(hits): State<Hits>,
    headers: HeaderMap,
    _body: axum::body::Bytes,
) -> axum::response::Response {
    hits.0.fetch_add(1, Ordering::SeqCst);
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if content_type.starts_with("application/x-www-form-urlencoded") {
        ([(header::CONTENT_TYPE, "video/mp4")], vec![1u8, 2, 3]).into_response()
    } else {
        StatusCode::UNSUPPORTED_MEDIA_TYPE.into_response()
    }
}

/// Rejects every encoding.
async fn always_415(State(hits): State<Hits>) -> StatusCode {
    hits.0.fetch_add(1, Ordering::SeqCst);
    StatusCode::UNSUPPORTED_MEDIA_TYPE
}

#[tokio::test]
async fn rejected_multipart_attempt_falls_back_to_urlencoded() {
    let hits = Hits::default();
    let router = Router::new()
        .route("/text2video/", post(urlencoded_only))
        .with_state(hits.clone());
    let base = spawn_upstream(router).await;

    let client = InferenceClient::new(base);
    let attempts = encode::plan(&GenerationRequest::TextToVideo {
        prompt: "a rocket launch".to_string(),
    })
    .unwrap();

    let raw = client.execute(&attempts).await.unwrap();

    // Multipart was rejected, urlencoded accepted: two requests, no more.
    assert_eq!(hits.count(), 2);
    assert_eq!(raw.bytes, vec![1, 2, 3]);
    assert_eq!(raw.content_type.as_deref(), Some("video/mp4"));
}

#[tokio::test]
async fn exhausted_fallback_stops_after_three_attempts() {
    let hits = Hits::default();
    let router = Router::new()
        .route("/text2music/", post(always_415))
        .with_state(hits.clone());
    let base = spawn_upstream(router).await;

    let client = InferenceClient::new(base);
    let attempts = encode::plan(&GenerationRequest::TextToMusic {
        prompt: "synthwave".to_string(),
    })
    .unwrap();

    let err = client.execute(&attempts).await.unwrap_err();

    assert_eq!(hits.count(), 3);
    assert_matches!(err, InferenceError::Upstream { status: 415, .. });
}

#[tokio::test]
async fn single_attempt_plan_sends_exactly_one_request() {
    let hits = Hits::default();
    let router = Router::new()
        .route(
            "/text2speech/",
            post(|State(hits): State<Hits>| async move {
                hits.0.fetch_add(1, Ordering::SeqCst);
                ([(header::CONTENT_TYPE, "audio/mpeg")], vec![4u8, 5])
            }),
        )
        .with_state(hits.clone());
    let base = spawn_upstream(router).await;

    let client = InferenceClient::new(base);
    let attempts = encode::plan(&GenerationRequest::TextToSpeech {
        prompt: "hello".to_string(),
    })
    .unwrap();

    let raw = client.execute(&attempts).await.unwrap();

    assert_eq!(hits.count(), 1);
    assert_eq!(raw.bytes, vec![4, 5]);
}

#[tokio::test]
async fn json_url_reply_is_resolved_via_secondary_fetch() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base = format!("http://{addr}");

    let clip_url = format!("{base}/files/clip.mp4");
    let router = Router::new()
        .route(
            "/text2video/",
            post(move || {
                let clip_url = clip_url.clone();
                async move {
                    (
                        [(header::CONTENT_TYPE, "application/json")],
                        format!(r#"{{"url":"{clip_url}"}}"#),
                    )
                }
            }),
        )
        .route(
            "/files/clip.mp4",
            get(|| async { ([(header::CONTENT_TYPE, "video/mp4")], vec![9u8, 9, 9]) }),
        );
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let client = InferenceClient::new(base);
    let attempts = encode::plan(&GenerationRequest::TextToVideo {
        prompt: "a rocket launch".to_string(),
    })
    .unwrap();

    let result = client
        .generate(&attempts, ClassifyProfile::VIDEO)
        .await
        .unwrap();

    assert_eq!(
        result,
        GenerationResult::Binary {
            bytes: vec![9, 9, 9],
            content_type: "video/mp4".to_string(),
        }
    );
}
