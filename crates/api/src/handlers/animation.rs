//! Handler for the animation generation proxy (`POST /api/animationproxy`).

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;
use serde_json::{json, Value};

use cre8_core::generation::{
    GenerationRequest, DEFAULT_ANIMATION_STEPS, DEFAULT_GUIDANCE_SCALE, DEFAULT_NUM_FRAMES,
};
use cre8_inference::classify::ClassifyProfile;
use cre8_inference::{encode, GenerationResult};

use crate::error::AppResult;
use crate::handlers::log_excerpt;
use crate::state::AppState;

/// Request payload for `POST /api/animationproxy`.
#[derive(Debug, Deserialize)]
pub struct AnimationProxyRequest {
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub negative_prompt: Option<String>,
    #[serde(default)]
    pub num_frames: Option<u32>,
    #[serde(default)]
    pub guidance_scale: Option<f64>,
    #[serde(default)]
    pub num_inference_steps: Option<u32>,
}

/// POST /api/animationproxy
pub async fn animation_proxy(
    State(state): State<AppState>,
    Json(body): Json<AnimationProxyRequest>,
) -> AppResult<impl IntoResponse> {
    let request = GenerationRequest::TextToAnimation {
        prompt: body.prompt.clone(),
        negative_prompt: body.negative_prompt.clone(),
        num_frames: body.num_frames.unwrap_or(DEFAULT_NUM_FRAMES),
        guidance_scale: body.guidance_scale.unwrap_or(DEFAULT_GUIDANCE_SCALE),
        num_inference_steps: body.num_inference_steps.unwrap_or(DEFAULT_ANIMATION_STEPS),
    };
    let attempts = encode::plan(&request)?;

    tracing::info!(
        prompt = %log_excerpt(&body.prompt),
        "Processing animation generation request"
    );

    let result = state
        .inference
        .generate(&attempts, ClassifyProfile::ANIMATION)
        .await?;

    Ok(match result {
        GenerationResult::Binary {
            bytes,
            content_type,
        } => {
            // GIF replies use the `animation` envelope key the animation
            // page expects; any other binary type falls back to the generic
            // `data` key.
            let key = if content_type.contains("image/gif") {
                "animation"
            } else {
                "data"
            };
            let mut payload = serde_json::Map::new();
            payload.insert(key.to_string(), json!(BASE64.encode(bytes)));
            payload.insert("contentType".to_string(), json!(content_type));
            Json(Value::Object(payload))
        }
        GenerationResult::Json(value) => Json(value),
        GenerationResult::Text(text) => Json(json!({ "result": text })),
    })
}
