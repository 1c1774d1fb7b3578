//! Handler for the text-to-speech proxy (`POST /api/text2speech`).

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

/// MIME type every text2speech reply is served with.
const SPEECH_CONTENT_TYPE: &str = "audio/mpeg";

/// POST /api/text2speech
pub async fn text2speech_proxy(
    State(state): State<AppState>,
    Json(body): Json<PromptRequest>,
) -> AppResult<Response> {
    let request = GenerationRequest::TextToSpeech {
        prompt: body.prompt.clone(),
    };
    let attempts = encode::plan(&request)?;

    tracing::info!(
        prompt = %log_excerpt(&body.prompt),
        "Processing text-to-speech request"
    );

    let result = state
        .inference
        .generate(&attempts, ClassifyProfile::AUDIO_MPEG)
        .await?;

    Ok(match result {
        GenerationResult::Binary { bytes, .. } => media_response(SPEECH_CONTENT_TYPE, bytes),
        GenerationResult::Json(value) => Json(value).into_response(),
        GenerationResult::Text(text) => Json(json!({ "result": text })).into_response(),
    })
}
