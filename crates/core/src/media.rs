//! The fixed set of media types a gallery item can hold.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Kind of generated artifact stored in the gallery.
///
/// The set is closed: gallery records carry one of exactly these values, and
/// anything else is rejected at the API boundary before touching the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaType {
    Image,
    Ghibli,
    Animation,
    Speech,
    Music,
    Video,
}

/// All valid media type names, in canonical casing.
pub const VALID_MEDIA_TYPES: &[&str] =
    &["Image", "Ghibli", "Animation", "Speech", "Music", "Video"];

impl MediaType {
    /// Canonical string form, matching the stored column value.
    pub fn as_str(self) -> &'static str {
        match self {
            MediaType::Image => "Image",
            MediaType::Ghibli => "Ghibli",
            MediaType::Animation => "Animation",
            MediaType::Speech => "Speech",
            MediaType::Music => "Music",
            MediaType::Video => "Video",
        }
    }

    /// Parse a client-supplied type name. Case-sensitive.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "Image" => Ok(MediaType::Image),
            "Ghibli" => Ok(MediaType::Ghibli),
            "Animation" => Ok(MediaType::Animation),
            "Speech" => Ok(MediaType::Speech),
            "Music" => Ok(MediaType::Music),
            "Video" => Ok(MediaType::Video),
            other => Err(CoreError::Validation(format!(
                "Invalid media type '{other}'. Must be one of: {}",
                VALID_MEDIA_TYPES.join(", ")
            ))),
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_canonical_name() {
        for name in VALID_MEDIA_TYPES {
            assert_eq!(MediaType::parse(name).unwrap().as_str(), *name);
        }
    }

    #[test]
    fn rejects_unknown_and_miscased_names() {
        assert!(MediaType::parse("Painting").is_err());
        assert!(MediaType::parse("image").is_err());
        assert!(MediaType::parse("").is_err());
    }
}
