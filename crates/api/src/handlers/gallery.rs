//! Handlers for the authenticated gallery (`/api/gallery`).
//!
//! Every operation is scoped to the verified caller identity: the owner
//! filter comes from [`AuthUser`], never from the request payload, so
//! cross-user reads and writes are impossible by construction.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use serde_json::json;

use cre8_core::error::CoreError;
use cre8_core::media::MediaType;
use cre8_db::models::gallery_item::{
    CreateGalleryItem, GalleryItem, GalleryListParams, NewGalleryItem,
};
use cre8_db::repositories::GalleryRepo;

use crate::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::response::Pagination;
use crate::state::AppState;

/// Response payload for `GET /api/gallery`.
#[derive(Debug, Serialize)]
pub struct GalleryPage {
    pub items: Vec<GalleryItem>,
    pub pagination: Pagination,
}

/// GET /api/gallery
///
/// List the caller's gallery items, newest first, optionally filtered by
/// `type`, paginated via `limit` and `page`.
pub async fn list_gallery(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<GalleryListParams>,
) -> AppResult<impl IntoResponse> {
    let item_type = params
        .item_type
        .as_deref()
        .map(MediaType::parse)
        .transpose()?;

    let limit = GalleryRepo::clamp_limit(params.limit);
    let page = GalleryRepo::clamp_page(params.page);
    let offset = (page - 1) * limit;

    let total = GalleryRepo::count_for_user(&state.pool, &auth.user_id, item_type).await?;
    let items =
        GalleryRepo::list_for_user(&state.pool, &auth.user_id, item_type, limit, offset).await?;

    tracing::info!(
        user_id = %auth.user_id,
        count = items.len(),
        total,
        "Fetched gallery items"
    );

    Ok(Json(GalleryPage {
        items,
        pagination: Pagination {
            total,
            page,
            limit,
            pages: (total as u64).div_ceil(limit as u64) as i64,
        },
    }))
}

/// POST /api/gallery
///
/// Save a generated artifact to the caller's gallery. Returns the
/// server-assigned item id.
pub async fn create_gallery_item(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(body): Json<CreateGalleryItem>,
) -> AppResult<impl IntoResponse> {
    let missing = body.missing_fields();
    if !missing.is_empty() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        ))));
    }

    let item_type = MediaType::parse(body.item_type.as_deref().unwrap_or_default())?;

    let item = NewGalleryItem {
        item_type,
        prompt: body.prompt.clone().unwrap_or_default(),
        negative_prompt: body.negative_prompt.clone(),
        content_data: body.content_data.clone(),
        content_url: body.content_url.clone(),
        content_type: body.content_type.clone().unwrap_or_default(),
        settings: body.settings.clone().unwrap_or_else(|| json!({})),
    };

    let item_id = GalleryRepo::insert(&state.pool, &auth.user_id, &item).await?;

    tracing::info!(
        user_id = %auth.user_id,
        item_id,
        item_type = %item_type,
        "Saved new gallery item"
    );

    Ok(Json(json!({
        "success": true,
        "message": format!("{item_type} successfully added to gallery"),
        "itemId": item_id,
    })))
}
