//! Handlers for the video generation proxy (`/api/text2video`).
//!
//! Video replies arrive in every shape the classifier knows about: raw
//! bytes, JSON with an embedded `url`/`video`/`data` field, and bare URLs
//! in plain text. The video profile resolves all of them to bytes where
//! possible; the classified content type is served as-is.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use cre8_core::generation::GenerationRequest;
use cre8_inference::classify::ClassifyProfile;
use cre8_inference::{encode, GenerationResult};

use crate::error::AppResult;
use crate::handlers::{log_excerpt, PromptRequest};
use crate::response::media_response;
use crate::state::AppState;

/// POST /api/text2video
pub async fn text2video_proxy(
    State(state): State<AppState>,
    Json(body): Json<PromptRequest>,
) -> AppResult<Response> {
    let request = GenerationRequest::TextToVideo {
        prompt: body.prompt.clone(),
    };
    let attempts = encode::plan(&request)?;

    tracing::info!(
        prompt = %log_excerpt(&body.prompt),
        "Processing text-to-video request"
    );

    let result = state
        .inference
        .generate(&attempts, ClassifyProfile::VIDEO)
        .await?;

    Ok(match result {
        GenerationResult::Binary {
            bytes,
            content_type,
        } => media_response(&content_type, bytes),
        GenerationResult::Json(value) => Json(value).into_response(),
        GenerationResult::Text(text) => Json(json!({ "result": text })).into_response(),
    })
}

/// GET /api/text2video -- usage stub.
pub async fn text2video_info() -> Json<serde_json::Value> {
    Json(json!({
        "status": "OK",
        "documentation": "POST to this endpoint with a JSON body containing a 'prompt' field to generate a video",
    }))
}
