//! Generation request model, tuning defaults, and validation.
//!
//! A [`GenerationRequest`] is the normalized form of one generation call,
//! independent of how the inference service wants it encoded on the wire
//! (that mapping lives in the `cre8-inference` crate). Validation here is
//! the gate in front of all network I/O: a request that fails [`validate`]
//! never produces an outbound call.
//!
//! [`validate`]: GenerationRequest::validate

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Tuning defaults
// ---------------------------------------------------------------------------

/// Default frame count for text-to-animation.
pub const DEFAULT_NUM_FRAMES: u32 = 30;
/// Default guidance scale for text-to-animation.
pub const DEFAULT_GUIDANCE_SCALE: f64 = 7.0;
/// Default inference steps for text-to-animation.
pub const DEFAULT_ANIMATION_STEPS: u32 = 25;
/// Default inference steps for the image endpoints.
pub const DEFAULT_IMAGE_STEPS: u32 = 30;
/// Default style strength for the Ghibli restyle endpoint.
pub const DEFAULT_GHIBLI_STRENGTH: f64 = 0.8;

/// Width and height of the square output preset.
pub const SQUARE_DIMENSIONS: (u32, u32) = (640, 640);
/// Width and height of the landscape output preset.
pub const LANDSCAPE_DIMENSIONS: (u32, u32) = (1280, 640);

// ---------------------------------------------------------------------------
// Size presets
// ---------------------------------------------------------------------------

/// Output dimension presets for the image endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    Square,
    Landscape,
}

impl ImageSize {
    /// Select a preset from the client-supplied size key.
    ///
    /// Exactly `"SQUARE"` selects the square preset; every other value,
    /// including miscapitalized spellings and the empty string, falls back
    /// to landscape. Observed contract of the original UI; preserved as-is.
    pub fn from_key(key: &str) -> Self {
        if key == "SQUARE" {
            ImageSize::Square
        } else {
            ImageSize::Landscape
        }
    }

    /// `(width, height)` of this preset.
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            ImageSize::Square => SQUARE_DIMENSIONS,
            ImageSize::Landscape => LANDSCAPE_DIMENSIONS,
        }
    }
}

// ---------------------------------------------------------------------------
// Request model
// ---------------------------------------------------------------------------

/// One normalized generation call, tagged by capability.
///
/// Image bytes are raw (already base64-decoded at the API boundary).
#[derive(Debug, Clone)]
pub enum GenerationRequest {
    TextToImage {
        prompt: String,
        size: ImageSize,
        steps: u32,
    },
    ImageToImage {
        prompt: String,
        image: Vec<u8>,
        size: ImageSize,
        steps: u32,
    },
    ImageToGhibli {
        prompt: String,
        image: Vec<u8>,
        size: ImageSize,
        steps: u32,
        strength: f64,
    },
    TextToAnimation {
        prompt: String,
        negative_prompt: Option<String>,
        num_frames: u32,
        guidance_scale: f64,
        num_inference_steps: u32,
    },
    /// The prompt is optional here: the uploaded image alone is a valid input.
    ImageToSound {
        image: Vec<u8>,
        prompt: Option<String>,
        duration: Option<u32>,
    },
    TextToSpeech {
        prompt: String,
    },
    TextToMusic {
        prompt: String,
    },
    TextToVideo {
        prompt: String,
    },
}

impl GenerationRequest {
    /// Short capability name used in logs.
    pub fn capability(&self) -> &'static str {
        match self {
            GenerationRequest::TextToImage { .. } => "text2img",
            GenerationRequest::ImageToImage { .. } => "img2img",
            GenerationRequest::ImageToGhibli { .. } => "img2ghibli",
            GenerationRequest::TextToAnimation { .. } => "text2animation",
            GenerationRequest::ImageToSound { .. } => "img2sound",
            GenerationRequest::TextToSpeech { .. } => "text2speech",
            GenerationRequest::TextToMusic { .. } => "text2music",
            GenerationRequest::TextToVideo { .. } => "text2video",
        }
    }

    /// Validate invariants that must hold before any network call.
    ///
    /// - The prompt must be non-empty after trimming, except for
    ///   image-to-sound where it is optional.
    /// - Variants that transform an image must carry non-empty image bytes.
    pub fn validate(&self) -> Result<(), CoreError> {
        match self {
            GenerationRequest::TextToImage { prompt, .. }
            | GenerationRequest::TextToAnimation { prompt, .. }
            | GenerationRequest::TextToSpeech { prompt }
            | GenerationRequest::TextToMusic { prompt }
            | GenerationRequest::TextToVideo { prompt } => require_prompt(prompt),
            GenerationRequest::ImageToImage { prompt, image, .. } => {
                require_prompt(prompt)?;
                require_image(image, "img2img")
            }
            GenerationRequest::ImageToGhibli { prompt, image, .. } => {
                require_prompt(prompt)?;
                require_image(image, "img2ghibli")
            }
            GenerationRequest::ImageToSound { image, .. } => {
                if image.is_empty() {
                    return Err(CoreError::Validation(
                        "Missing required parameter: file".to_string(),
                    ));
                }
                Ok(())
            }
        }
    }
}

fn require_prompt(prompt: &str) -> Result<(), CoreError> {
    if prompt.trim().is_empty() {
        return Err(CoreError::Validation(
            "Missing required parameter: prompt".to_string(),
        ));
    }
    Ok(())
}

fn require_image(image: &[u8], endpoint: &str) -> Result<(), CoreError> {
    if image.is_empty() {
        return Err(CoreError::Validation(format!(
            "Missing required image for {endpoint}"
        )));
    }
    Ok(())
}
