//! Ordered response classification.
//!
//! The service's content-type declarations are not trustworthy: JSON-wrapped
//! binary, raw binary, and mislabeled text all occur for semantically
//! similar calls. [`classify`] applies a fixed rule order so the rest of the
//! system never has to care:
//!
//! 1. declared JSON is parsed, optionally resolving an embedded media field
//!    (`url` via a secondary fetch, `video`/`data` via base64),
//! 2. declared binary types pass through as bytes,
//! 3. anything else is read as text, with a JSON rescue parse and -- for
//!    video-producing capabilities -- a URL sniff before giving up and
//!    returning the raw text.
//!
//! Classification never panics: anything uninterpretable becomes
//! [`InferenceError::Classification`] with a bounded excerpt of the body.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::error::InferenceError;
use crate::result::GenerationResult;

/// Upper bound on diagnostic excerpts taken from response bodies.
const EXCERPT_MAX_CHARS: usize = 200;

/// Per-capability classification settings.
#[derive(Debug, Clone, Copy)]
pub struct ClassifyProfile {
    /// Resolve `url` / `video` / `data` fields embedded in JSON replies into
    /// fetched or decoded bytes. Only video-producing capabilities do this;
    /// everything else passes structured JSON through untouched.
    pub resolve_embedded: bool,
    /// MIME type substituted when the service declares the generic
    /// `application/octet-stream`, and applied to resolved embedded media.
    pub default_content_type: &'static str,
}

impl ClassifyProfile {
    pub const IMAGE: Self = Self {
        resolve_embedded: false,
        default_content_type: "image/png",
    };
    pub const ANIMATION: Self = Self {
        resolve_embedded: false,
        default_content_type: "image/gif",
    };
    pub const AUDIO_WAV: Self = Self {
        resolve_embedded: false,
        default_content_type: "audio/wav",
    };
    pub const AUDIO_MPEG: Self = Self {
        resolve_embedded: false,
        default_content_type: "audio/mpeg",
    };
    pub const VIDEO: Self = Self {
        resolve_embedded: true,
        default_content_type: "video/mp4",
    };
}

/// Fetches the bytes behind a URL found inside an upstream reply.
///
/// Production uses [`crate::client::InferenceClient`]; tests substitute a
/// counting fake so secondary fetches can be asserted without a network.
pub trait UrlFetcher {
    fn fetch(
        &self,
        url: &str,
    ) -> impl std::future::Future<Output = Result<Vec<u8>, InferenceError>> + Send;
}

/// Classify one upstream response body into exactly one [`GenerationResult`].
///
/// `content_type` is the declared `Content-Type` header, if any. Rules are
/// ordered and the first match wins; identical inputs always classify
/// identically.
pub async fn classify<F: UrlFetcher>(
    profile: ClassifyProfile,
    content_type: Option<&str>,
    body: Vec<u8>,
    fetcher: &F,
) -> Result<GenerationResult, InferenceError> {
    let declared = content_type.unwrap_or("");

    // Rule 1: declared JSON.
    if declared.contains("application/json") {
        let value: serde_json::Value = serde_json::from_slice(&body).map_err(|e| {
            classification_error(format!("invalid JSON body: {e}"), &body)
        })?;
        return classify_json(profile, value, fetcher).await;
    }

    // Rule 2: declared binary.
    if is_binary_type(declared) {
        let content_type = if declared.starts_with("application/octet-stream") {
            profile.default_content_type.to_string()
        } else {
            declared.to_string()
        };
        return Ok(GenerationResult::Binary {
            bytes: body,
            content_type,
        });
    }

    // Rule 3: unrecognized or missing content type. Read as text and try
    // the rescue paths before settling for plain text.
    let text = String::from_utf8_lossy(&body).into_owned();

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(&text) {
        return classify_json(profile, value, fetcher).await;
    }

    if profile.resolve_embedded && looks_like_video_url(text.trim()) {
        let bytes = fetch_media(fetcher, text.trim()).await?;
        return Ok(GenerationResult::Binary {
            bytes,
            content_type: profile.default_content_type.to_string(),
        });
    }

    Ok(GenerationResult::Text(text))
}

/// Resolve a parsed JSON value, honoring embedded media fields when the
/// profile asks for it.
async fn classify_json<F: UrlFetcher>(
    profile: ClassifyProfile,
    value: serde_json::Value,
    fetcher: &F,
) -> Result<GenerationResult, InferenceError> {
    if profile.resolve_embedded {
        if let Some(url) = value.get("url").and_then(|v| v.as_str()) {
            let bytes = fetch_media(fetcher, url).await?;
            return Ok(GenerationResult::Binary {
                bytes,
                content_type: profile.default_content_type.to_string(),
            });
        }

        let embedded = value
            .get("video")
            .or_else(|| value.get("data"))
            .and_then(|v| v.as_str());
        if let Some(encoded) = embedded {
            let bytes = BASE64.decode(encoded).map_err(|e| {
                classification_error(
                    format!("invalid base64 in embedded media field: {e}"),
                    encoded.as_bytes(),
                )
            })?;
            return Ok(GenerationResult::Binary {
                bytes,
                content_type: profile.default_content_type.to_string(),
            });
        }
    }

    Ok(GenerationResult::Json(value))
}

/// Perform the secondary fetch for a URL-valued media field. A failed fetch
/// is a classification failure, not an upstream one: the primary call
/// succeeded and handed us something we could not turn into a result.
async fn fetch_media<F: UrlFetcher>(fetcher: &F, url: &str) -> Result<Vec<u8>, InferenceError> {
    fetcher.fetch(url).await.map_err(|e| {
        classification_error(format!("secondary fetch failed: {e}"), url.as_bytes())
    })
}

fn is_binary_type(declared: &str) -> bool {
    declared.starts_with("image/")
        || declared.starts_with("video/")
        || declared.starts_with("audio/")
        || declared.starts_with("application/octet-stream")
}

/// Heuristic from the service's observed behavior: a plain-text reply that
/// is an HTTP URL mentioning video content points at the generated asset.
fn looks_like_video_url(text: &str) -> bool {
    text.starts_with("http") && (text.contains("video") || text.contains("mp4"))
}

/// Bounded, char-boundary-safe excerpt of a response body for diagnostics.
pub fn excerpt(body: &[u8]) -> String {
    String::from_utf8_lossy(body)
        .chars()
        .take(EXCERPT_MAX_CHARS)
        .collect()
}

fn classification_error(message: String, body: &[u8]) -> InferenceError {
    InferenceError::Classification {
        message,
        excerpt: excerpt(body),
    }
}
