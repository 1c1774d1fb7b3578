//! Handler for the image generation proxy (`POST /api/imageproxy`).
//!
//! Fronts three upstream endpoints (`text2img`, `img2img`, `img2ghibli`)
//! behind one route. Binary replies are wrapped in the
//! `{ image, contentType }` envelope the image page consumes; structured
//! JSON passes through unchanged.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;
use serde_json::json;

use cre8_core::generation::{
    GenerationRequest, ImageSize, DEFAULT_GHIBLI_STRENGTH, DEFAULT_IMAGE_STEPS,
};
use cre8_inference::classify::ClassifyProfile;
use cre8_inference::{encode, GenerationResult};

use crate::error::{AppError, AppResult};
use crate::handlers::log_excerpt;
use crate::state::AppState;

/// Upstream endpoints this proxy can target.
const IMAGE_ENDPOINTS: &[&str] = &["img2img", "text2img", "img2ghibli"];

/// Request payload for `POST /api/imageproxy`.
#[derive(Debug, Deserialize)]
pub struct ImageProxyRequest {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub prompt: String,
    /// Base64-encoded source image for the image-to-image endpoints.
    #[serde(default)]
    pub init_image: Option<String>,
    /// Size preset key; anything but exactly `SQUARE` selects landscape.
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub steps: Option<u32>,
    /// Style strength for `img2ghibli`.
    #[serde(default)]
    pub strength: Option<f64>,
}

/// POST /api/imageproxy
pub async fn image_proxy(
    State(state): State<AppState>,
    Json(body): Json<ImageProxyRequest>,
) -> AppResult<impl IntoResponse> {
    let request = build_request(&body)?;
    let attempts = encode::plan(&request)?;

    tracing::info!(
        endpoint = request.capability(),
        prompt = %log_excerpt(&body.prompt),
        "Processing image generation request"
    );

    let result = state
        .inference
        .generate(&attempts, ClassifyProfile::IMAGE)
        .await?;

    Ok(match result {
        GenerationResult::Binary {
            bytes,
            content_type,
        } => Json(json!({
            "image": BASE64.encode(bytes),
            "contentType": content_type,
        })),
        GenerationResult::Json(value) => Json(value),
        GenerationResult::Text(text) => Json(json!({ "result": text })),
    })
}

/// Resolve the target endpoint and assemble the core request.
///
/// An unknown or missing `endpoint` falls back to `img2img` when a source
/// image is supplied and `text2img` otherwise.
fn build_request(body: &ImageProxyRequest) -> Result<GenerationRequest, AppError> {
    let endpoint = match body.endpoint.as_deref() {
        Some(e) if IMAGE_ENDPOINTS.contains(&e) => e,
        other => {
            let fallback = if body.init_image.is_some() {
                "img2img"
            } else {
                "text2img"
            };
            tracing::warn!(
                endpoint = ?other,
                fallback,
                "Invalid image endpoint specified, using fallback"
            );
            fallback
        }
    };

    let size = ImageSize::from_key(body.size.as_deref().unwrap_or("LANDSCAPE"));
    let steps = body.steps.unwrap_or(DEFAULT_IMAGE_STEPS);

    let image = body
        .init_image
        .as_deref()
        .map(|encoded| BASE64.decode(encoded))
        .transpose()
        .map_err(|e| AppError::BadRequest(format!("init_image is not valid base64: {e}")))?
        .unwrap_or_default();

    let request = match endpoint {
        "img2img" => GenerationRequest::ImageToImage {
            prompt: body.prompt.clone(),
            image,
            size,
            steps,
        },
        "img2ghibli" => GenerationRequest::ImageToGhibli {
            prompt: body.prompt.clone(),
            image,
            size,
            steps,
            // Zero means "not set" here, matching the size-key contract:
            // the upstream default is substituted rather than forwarded.
            strength: body
                .strength
                .filter(|s| *s != 0.0)
                .unwrap_or(DEFAULT_GHIBLI_STRENGTH),
        },
        _ => GenerationRequest::TextToImage {
            prompt: body.prompt.clone(),
            size,
            steps,
        },
    };

    Ok(request)
}
