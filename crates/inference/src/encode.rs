//! Outbound request planning: wire encodings, field policy, and fallback
//! sequences per capability.
//!
//! Planning is pure. [`plan`] maps a validated [`GenerationRequest`] to an
//! ordered list of [`Attempt`]s; the executor in [`crate::client`] sends
//! them. Most capabilities map to a single attempt with a known encoding.
//! Text-to-video and text-to-music map to a three-step fallback sequence
//! because the service's accepted encoding for those endpoints is not
//! stable: multipart first, then urlencoded, then a bare JSON string.

use cre8_core::error::CoreError;
use cre8_core::generation::GenerationRequest;

/// MIME type attached to uploaded image parts.
const IMAGE_PART_MIME: &str = "image/png";

/// File name attached to uploaded image parts. The service keys on the
/// field name (`file`), not the file name.
const IMAGE_PART_NAME: &str = "image.png";

/// A text form field, named statically per capability.
pub type Field = (&'static str, String);

/// One planned HTTP attempt against the inference service.
///
/// Posted as `POST {base_url}/{endpoint}/` -- the trailing slash is part of
/// the service's route contract.
#[derive(Debug, Clone, PartialEq)]
pub struct Attempt {
    pub endpoint: &'static str,
    pub body: WireBody,
}

/// The three wire encodings the inference service is known to accept.
#[derive(Debug, Clone, PartialEq)]
pub enum WireBody {
    /// `application/x-www-form-urlencoded` fields.
    Form(Vec<Field>),
    /// `multipart/form-data`: an optional file part named `file` plus
    /// ordinary text fields.
    Multipart {
        file: Option<FilePart>,
        fields: Vec<Field>,
    },
    /// A JSON body that is the bare prompt string, not an object.
    JsonPrompt(String),
}

/// An uploaded file part.
#[derive(Debug, Clone, PartialEq)]
pub struct FilePart {
    pub bytes: Vec<u8>,
    pub file_name: &'static str,
    pub content_type: &'static str,
}

impl FilePart {
    fn image(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            file_name: IMAGE_PART_NAME,
            content_type: IMAGE_PART_MIME,
        }
    }
}

/// A form value under the "omit when falsy" policy.
///
/// Empty strings and zero-valued numbers are dropped from the outbound body
/// so the service applies its own defaults. This is the observed contract of
/// the service, preserved deliberately; every capability routes through the
/// same [`push`] helper so no endpoint hand-rolls its own checks.
#[derive(Debug, Clone)]
enum FieldValue {
    Text(String),
    Int(i64),
    Float(f64),
}

impl FieldValue {
    fn is_falsy(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Int(n) => *n == 0,
            FieldValue::Float(x) => *x == 0.0,
        }
    }

    fn render(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Int(n) => n.to_string(),
            FieldValue::Float(x) => x.to_string(),
        }
    }
}

/// Append `value` under `name` unless the omit-when-falsy policy drops it.
fn push(fields: &mut Vec<Field>, name: &'static str, value: FieldValue) {
    if !value.is_falsy() {
        fields.push((name, value.render()));
    }
}

/// Plan the ordered attempt sequence for a request.
///
/// Validates first: a request that fails validation produces no attempts
/// and therefore never reaches the network.
pub fn plan(request: &GenerationRequest) -> Result<Vec<Attempt>, CoreError> {
    request.validate()?;

    let attempts = match request {
        GenerationRequest::TextToImage {
            prompt,
            size,
            steps,
        } => {
            let (width, height) = size.dimensions();
            let mut fields = Vec::new();
            push(&mut fields, "prompt", FieldValue::Text(prompt.clone()));
            push(&mut fields, "width", FieldValue::Int(width.into()));
            push(&mut fields, "height", FieldValue::Int(height.into()));
            push(&mut fields, "steps", FieldValue::Int((*steps).into()));
            vec![Attempt {
                endpoint: "text2img",
                body: WireBody::Form(fields),
            }]
        }

        GenerationRequest::ImageToImage {
            prompt,
            image,
            size,
            steps,
        } => {
            let (width, height) = size.dimensions();
            let mut fields = Vec::new();
            push(&mut fields, "prompt", FieldValue::Text(prompt.clone()));
            push(&mut fields, "width", FieldValue::Int(width.into()));
            push(&mut fields, "height", FieldValue::Int(height.into()));
            push(&mut fields, "steps", FieldValue::Int((*steps).into()));
            vec![Attempt {
                endpoint: "img2img",
                body: WireBody::Multipart {
                    file: Some(FilePart::image(image.clone())),
                    fields,
                },
            }]
        }

        GenerationRequest::ImageToGhibli {
            prompt,
            image,
            size,
            steps,
            strength,
        } => {
            let (width, height) = size.dimensions();
            let mut fields = Vec::new();
            push(&mut fields, "prompt", FieldValue::Text(prompt.clone()));
            push(&mut fields, "strength", FieldValue::Float(*strength));
            push(&mut fields, "width", FieldValue::Int(width.into()));
            push(&mut fields, "height", FieldValue::Int(height.into()));
            push(&mut fields, "steps", FieldValue::Int((*steps).into()));
            vec![Attempt {
                endpoint: "img2ghibli",
                body: WireBody::Multipart {
                    file: Some(FilePart::image(image.clone())),
                    fields,
                },
            }]
        }

        GenerationRequest::TextToAnimation {
            prompt,
            negative_prompt,
            num_frames,
            guidance_scale,
            num_inference_steps,
        } => {
            let mut fields = Vec::new();
            push(&mut fields, "prompt", FieldValue::Text(prompt.clone()));
            push(
                &mut fields,
                "negative_prompt",
                FieldValue::Text(negative_prompt.clone().unwrap_or_default()),
            );
            push(&mut fields, "num_frames", FieldValue::Int((*num_frames).into()));
            push(
                &mut fields,
                "guidance_scale",
                FieldValue::Float(*guidance_scale),
            );
            push(
                &mut fields,
                "num_inference_steps",
                FieldValue::Int((*num_inference_steps).into()),
            );
            vec![Attempt {
                endpoint: "text2animation",
                body: WireBody::Form(fields),
            }]
        }

        GenerationRequest::ImageToSound {
            image,
            prompt,
            duration,
        } => {
            let mut fields = Vec::new();
            push(
                &mut fields,
                "prompt",
                FieldValue::Text(prompt.clone().unwrap_or_default()),
            );
            push(
                &mut fields,
                "duration",
                FieldValue::Int(duration.unwrap_or(0).into()),
            );
            vec![Attempt {
                endpoint: "img2sound",
                body: WireBody::Multipart {
                    file: Some(FilePart::image(image.clone())),
                    fields,
                },
            }]
        }

        GenerationRequest::TextToSpeech { prompt } => {
            let mut fields = Vec::new();
            push(&mut fields, "prompt", FieldValue::Text(prompt.clone()));
            vec![Attempt {
                endpoint: "text2speech",
                body: WireBody::Form(fields),
            }]
        }

        GenerationRequest::TextToMusic { prompt } => fallback_attempts("text2music", prompt),
        GenerationRequest::TextToVideo { prompt } => fallback_attempts("text2video", prompt),
    };

    Ok(attempts)
}

/// The three-step encoding fallback for endpoints whose accepted encoding is
/// not stable: multipart with just the prompt, then urlencoded, then a bare
/// JSON string. Never more than these three.
fn fallback_attempts(endpoint: &'static str, prompt: &str) -> Vec<Attempt> {
    vec![
        Attempt {
            endpoint,
            body: WireBody::Multipart {
                file: None,
                fields: vec![("prompt", prompt.to_string())],
            },
        },
        Attempt {
            endpoint,
            body: WireBody::Form(vec![("prompt", prompt.to_string())]),
        },
        Attempt {
            endpoint,
            body: WireBody::JsonPrompt(prompt.to_string()),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use cre8_core::generation::{
        ImageSize, DEFAULT_GHIBLI_STRENGTH, DEFAULT_GUIDANCE_SCALE, DEFAULT_IMAGE_STEPS,
        DEFAULT_NUM_FRAMES,
    };

    fn field<'a>(fields: &'a [Field], name: &str) -> Option<&'a str> {
        fields
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    // -- Validation gate --

    #[test]
    fn empty_prompt_produces_no_attempts() {
        let request = GenerationRequest::TextToVideo {
            prompt: "  ".to_string(),
        };
        assert!(plan(&request).is_err());
    }

    #[test]
    fn missing_image_produces_no_attempts() {
        let request = GenerationRequest::ImageToImage {
            prompt: "a cat".to_string(),
            image: Vec::new(),
            size: ImageSize::Landscape,
            steps: DEFAULT_IMAGE_STEPS,
        };
        assert!(plan(&request).is_err());
    }

    // -- Single-attempt plans --

    #[test]
    fn text2img_is_one_urlencoded_attempt_with_dimensions() {
        let request = GenerationRequest::TextToImage {
            prompt: "a lighthouse".to_string(),
            size: ImageSize::Landscape,
            steps: DEFAULT_IMAGE_STEPS,
        };
        let attempts = plan(&request).unwrap();
        assert_eq!(attempts.len(), 1);
        assert_eq!(attempts[0].endpoint, "text2img");
        let WireBody::Form(fields) = &attempts[0].body else {
            panic!("expected urlencoded body");
        };
        assert_eq!(field(fields, "prompt"), Some("a lighthouse"));
        assert_eq!(field(fields, "width"), Some("1280"));
        assert_eq!(field(fields, "height"), Some("640"));
        assert_eq!(field(fields, "steps"), Some("30"));
    }

    #[test]
    fn img2img_attaches_the_image_as_a_file_part() {
        let request = GenerationRequest::ImageToImage {
            prompt: "a cat".to_string(),
            image: vec![9, 8, 7],
            size: ImageSize::Square,
            steps: DEFAULT_IMAGE_STEPS,
        };
        let attempts = plan(&request).unwrap();
        let WireBody::Multipart { file, fields } = &attempts[0].body else {
            panic!("expected multipart body");
        };
        assert_eq!(file.as_ref().unwrap().bytes, vec![9, 8, 7]);
        assert_eq!(field(fields, "width"), Some("640"));
    }

    #[test]
    fn ghibli_includes_strength_and_omits_zero_steps() {
        let request = GenerationRequest::ImageToGhibli {
            prompt: "ghibli style".to_string(),
            image: vec![1],
            size: ImageSize::Square,
            steps: 0,
            strength: DEFAULT_GHIBLI_STRENGTH,
        };
        let attempts = plan(&request).unwrap();
        let WireBody::Multipart { fields, .. } = &attempts[0].body else {
            panic!("expected multipart body");
        };
        assert_eq!(field(fields, "strength"), Some("0.8"));
        assert_eq!(field(fields, "steps"), None);
    }

    // -- Omit-when-falsy policy --

    #[test]
    fn animation_omits_falsy_tuning_fields() {
        let request = GenerationRequest::TextToAnimation {
            prompt: "dancing robot".to_string(),
            negative_prompt: Some(String::new()),
            num_frames: 0,
            guidance_scale: 0.0,
            num_inference_steps: 25,
        };
        let attempts = plan(&request).unwrap();
        let WireBody::Form(fields) = &attempts[0].body else {
            panic!("expected urlencoded body");
        };
        assert_eq!(field(fields, "negative_prompt"), None);
        assert_eq!(field(fields, "num_frames"), None);
        assert_eq!(field(fields, "guidance_scale"), None);
        assert_eq!(field(fields, "num_inference_steps"), Some("25"));
    }

    #[test]
    fn animation_renders_supplied_tuning_fields() {
        let request = GenerationRequest::TextToAnimation {
            prompt: "dancing robot".to_string(),
            negative_prompt: Some("blurry".to_string()),
            num_frames: DEFAULT_NUM_FRAMES,
            guidance_scale: DEFAULT_GUIDANCE_SCALE,
            num_inference_steps: 25,
        };
        let attempts = plan(&request).unwrap();
        let WireBody::Form(fields) = &attempts[0].body else {
            panic!("expected urlencoded body");
        };
        assert_eq!(field(fields, "negative_prompt"), Some("blurry"));
        assert_eq!(field(fields, "num_frames"), Some("30"));
        assert_eq!(field(fields, "guidance_scale"), Some("7"));
    }

    #[test]
    fn img2sound_omits_absent_prompt_and_zero_duration() {
        let request = GenerationRequest::ImageToSound {
            image: vec![1, 2],
            prompt: None,
            duration: Some(0),
        };
        let attempts = plan(&request).unwrap();
        let WireBody::Multipart { file, fields } = &attempts[0].body else {
            panic!("expected multipart body");
        };
        assert!(file.is_some());
        assert!(fields.is_empty());
    }

    // -- Fallback sequences --

    #[test]
    fn text2video_plans_exactly_three_attempts_in_order() {
        let request = GenerationRequest::TextToVideo {
            prompt: "a rocket launch".to_string(),
        };
        let attempts = plan(&request).unwrap();
        assert_eq!(attempts.len(), 3);
        assert!(attempts.iter().all(|a| a.endpoint == "text2video"));
        assert_matches!(attempts[0].body, WireBody::Multipart { ref file, .. } if file.is_none());
        assert_matches!(attempts[1].body, WireBody::Form(_));
        assert_matches!(attempts[2].body, WireBody::JsonPrompt(ref p) if p == "a rocket launch");
    }

    #[test]
    fn text2music_uses_the_same_fallback_sequence() {
        let request = GenerationRequest::TextToMusic {
            prompt: "synthwave".to_string(),
        };
        let attempts = plan(&request).unwrap();
        assert_eq!(attempts.len(), 3);
        assert!(attempts.iter().all(|a| a.endpoint == "text2music"));
    }

    #[test]
    fn text2speech_is_a_single_urlencoded_attempt() {
        let request = GenerationRequest::TextToSpeech {
            prompt: "hello there".to_string(),
        };
        let attempts = plan(&request).unwrap();
        assert_eq!(attempts.len(), 1);
        assert_matches!(attempts[0].body, WireBody::Form(_));
    }
}
