//! Handler for the text-to-music proxy (`POST /api/text2music`).
//!
//! The music endpoint's accepted encoding is not stable, so the planned
//! attempt sequence is the three-step fallback (multipart, urlencoded,
//! bare JSON string).

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

/// MIME type every text2music reply is served with.
const MUSIC_CONTENT_TYPE: &str = "audio/wav";

/// POST /api/text2music
pub async fn text2music_proxy(
    State(state): State<AppState>,
    Json(body): Json<PromptRequest>,
) -> AppResult<Response> {
    let request = GenerationRequest::TextToMusic {
        prompt: body.prompt.clone(),
    };
    let attempts = encode::plan(&request)?;

    tracing::info!(
        prompt = %log_excerpt(&body.prompt),
        "Processing text-to-music request"
    );

    let result = state
        .inference
        .generate(&attempts, ClassifyProfile::AUDIO_WAV)
        .await?;

    Ok(match result {
        GenerationResult::Binary { bytes, .. } => media_response(MUSIC_CONTENT_TYPE, bytes),
        GenerationResult::Json(value) => Json(value).into_response(),
        GenerationResult::Text(text) => Json(json!({ "result": text })).into_response(),
    })
}
