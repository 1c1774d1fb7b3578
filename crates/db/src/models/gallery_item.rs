//! Gallery item models and DTOs.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use cre8_core::media::MediaType;
use cre8_core::types::{DbId, Timestamp, UserId};

// ---------------------------------------------------------------------------
// Entity struct (database row)
// ---------------------------------------------------------------------------

/// A row from the `gallery_items` table.
///
/// Serialized in the camelCase wire casing the gallery UI consumes, with
/// `item_type` exposed as `type`.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryItem {
    pub id: DbId,
    pub user_id: UserId,
    #[serde(rename = "type")]
    pub item_type: String,
    pub prompt: String,
    pub negative_prompt: Option<String>,
    /// Base64 payload when the artifact is stored inline.
    pub content_data: Option<String>,
    /// External reference when the artifact is stored elsewhere.
    pub content_url: Option<String>,
    pub content_type: String,
    /// Open map of generation settings (strength, steps, ...). The core
    /// performs no schema validation on its contents.
    pub settings: Value,
    pub created_at: Timestamp,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for `POST /api/gallery`.
///
/// Every field is optional at the deserialization layer so the handler can
/// report all missing required fields in one response instead of failing on
/// the first.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGalleryItem {
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    pub prompt: Option<String>,
    pub content_data: Option<String>,
    pub content_url: Option<String>,
    pub content_type: Option<String>,
    pub negative_prompt: Option<String>,
    pub settings: Option<Value>,
}

impl CreateGalleryItem {
    /// Names of required fields that are missing or empty, in a stable order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(&self.item_type) {
            missing.push("type");
        }
        if is_blank(&self.prompt) {
            missing.push("prompt");
        }
        if is_blank(&self.content_data) {
            missing.push("contentData");
        }
        if is_blank(&self.content_type) {
            missing.push("contentType");
        }
        missing
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.is_empty())
}

/// Validated payload ready for insertion: all required fields present, type
/// checked against the closed enumeration.
#[derive(Debug, Clone)]
pub struct NewGalleryItem {
    pub item_type: MediaType,
    pub prompt: String,
    pub negative_prompt: Option<String>,
    pub content_data: Option<String>,
    pub content_url: Option<String>,
    pub content_type: String,
    pub settings: Value,
}

/// Query parameters for `GET /api/gallery`.
#[derive(Debug, Deserialize)]
pub struct GalleryListParams {
    /// Optional media type filter.
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    pub limit: Option<i64>,
    pub page: Option<i64>,
}
