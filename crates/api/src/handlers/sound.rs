//! Handler for the image-to-sound proxy (`POST /api/img2sound`).
//!
//! The only proxy that accepts a browser upload directly: the request body
//! is `multipart/form-data` with a required `file` part plus optional
//! `prompt` and `duration` fields.

use axum::extract::{Multipart, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use cre8_core::generation::GenerationRequest;
use cre8_inference::classify::ClassifyProfile;
use cre8_inference::{encode, GenerationResult};

use crate::error::{AppError, AppResult};
use crate::response::media_response;
use crate::state::AppState;

/// MIME type every img2sound reply is served with.
const SOUND_CONTENT_TYPE: &str = "audio/wav";

/// POST /api/img2sound
pub async fn img2sound_proxy(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Response> {
    let request = read_upload(multipart).await?;
    let attempts = encode::plan(&request)?;

    tracing::info!("Processing image-to-sound request");

    let result = state
        .inference
        .generate(&attempts, ClassifyProfile::AUDIO_WAV)
        .await?;

    Ok(match result {
        GenerationResult::Binary { bytes, .. } => media_response(SOUND_CONTENT_TYPE, bytes),
        GenerationResult::Json(value) => Json(value).into_response(),
        GenerationResult::Text(text) => Json(json!({ "result": text })).into_response(),
    })
}

/// Pull the `file`, `prompt`, and `duration` fields out of the upload.
async fn read_upload(mut multipart: Multipart) -> Result<GenerationRequest, AppError> {
    let mut image: Vec<u8> = Vec::new();
    let mut prompt: Option<String> = None;
    let mut duration: Option<u32> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        // `name()` borrows the field; the readers below consume it.
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                image = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read file field: {e}")))?
                    .to_vec();
            }
            Some("prompt") => {
                prompt = Some(field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read prompt field: {e}"))
                })?);
            }
            Some("duration") => {
                let raw = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read duration field: {e}"))
                })?;
                duration = raw.trim().parse().ok();
            }
            _ => {}
        }
    }

    // Validation of the required file happens in `plan` via the core
    // request, alongside every other pre-network invariant.
    Ok(GenerationRequest::ImageToSound {
        image,
        prompt,
        duration,
    })
}
