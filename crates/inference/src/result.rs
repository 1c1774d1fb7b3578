/// Normalized outcome of one generation call.
///
/// Exactly one variant is produced per upstream response. Ownership moves to
/// the caller; nothing is retained between calls.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationResult {
    /// Structured JSON passed through unchanged.
    Json(serde_json::Value),
    /// Raw media bytes plus the MIME type they should be served with.
    Binary {
        bytes: Vec<u8>,
        content_type: String,
    },
    /// Plain text that was neither JSON nor a fetchable media reference.
    Text(String),
}
