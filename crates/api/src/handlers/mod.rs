//! HTTP handlers for the generation proxy and gallery endpoints.
//!
//! Each proxy handler follows the same shape: decode the UI payload into a
//! [`cre8_core::generation::GenerationRequest`], plan the outbound attempts
//! with [`cre8_inference::encode::plan`], execute and classify through
//! [`cre8_inference::InferenceClient`], and map the normalized result onto
//! the envelope that specific page expects.

pub mod animation;
pub mod gallery;
pub mod image;
pub mod music;
pub mod sound;
pub mod speech;
pub mod video;

use serde::Deserialize;

/// Request payload shared by the prompt-only endpoints
/// (`/text2speech`, `/text2music`, `/text2video`).
#[derive(Debug, Deserialize)]
pub struct PromptRequest {
    #[serde(default)]
    pub prompt: String,
}

/// Bounded prompt excerpt for log lines; full prompts never reach the logs.
pub(crate) fn log_excerpt(text: &str) -> String {
    text.chars().take(30).collect()
}
