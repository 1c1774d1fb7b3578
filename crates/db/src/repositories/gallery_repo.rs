//! Repository for the `gallery_items` table.
//!
//! Every read is scoped by `user_id`: the owner filter is a mandatory bind
//! parameter on each query, so a caller cannot construct a cross-user read.

use sqlx::PgPool;

use cre8_core::media::MediaType;
use cre8_core::types::DbId;

use crate::models::gallery_item::{GalleryItem, NewGalleryItem};

/// Column list for `gallery_items` queries.
const GALLERY_COLUMNS: &str = "\
    id, user_id, item_type, prompt, negative_prompt, content_data, \
    content_url, content_type, settings, created_at";

/// Default page size for gallery listing.
pub const DEFAULT_LIMIT: i64 = 20;

/// Maximum page size for gallery listing.
pub const MAX_LIMIT: i64 = 100;

/// Provides append-only creation and scoped listing of gallery items.
pub struct GalleryRepo;

impl GalleryRepo {
    /// Insert a new gallery item owned by `user_id`. Returns the assigned id.
    ///
    /// `user_id` comes from the verified caller identity, never from the
    /// request payload.
    pub async fn insert(
        pool: &PgPool,
        user_id: &str,
        item: &NewGalleryItem,
    ) -> Result<DbId, sqlx::Error> {
        let row: (DbId,) = sqlx::query_as(
            "INSERT INTO gallery_items \
                 (user_id, item_type, prompt, negative_prompt, content_data, \
                  content_url, content_type, settings) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING id",
        )
        .bind(user_id)
        .bind(item.item_type.as_str())
        .bind(&item.prompt)
        .bind(&item.negative_prompt)
        .bind(&item.content_data)
        .bind(&item.content_url)
        .bind(&item.content_type)
        .bind(&item.settings)
        .fetch_one(pool)
        .await?;

        Ok(row.0)
    }

    /// List items owned by `user_id`, newest first, optionally filtered by
    /// media type.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: &str,
        item_type: Option<MediaType>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<GalleryItem>, sqlx::Error> {
        match item_type {
            Some(item_type) => {
                let query = format!(
                    "SELECT {GALLERY_COLUMNS} FROM gallery_items \
                     WHERE user_id = $1 AND item_type = $2 \
                     ORDER BY created_at DESC \
                     LIMIT $3 OFFSET $4"
                );
                sqlx::query_as::<_, GalleryItem>(&query)
                    .bind(user_id)
                    .bind(item_type.as_str())
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {GALLERY_COLUMNS} FROM gallery_items \
                     WHERE user_id = $1 \
                     ORDER BY created_at DESC \
                     LIMIT $2 OFFSET $3"
                );
                sqlx::query_as::<_, GalleryItem>(&query)
                    .bind(user_id)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Count items owned by `user_id` under the same filter as
    /// [`list_for_user`](Self::list_for_user).
    pub async fn count_for_user(
        pool: &PgPool,
        user_id: &str,
        item_type: Option<MediaType>,
    ) -> Result<i64, sqlx::Error> {
        match item_type {
            Some(item_type) => {
                sqlx::query_scalar(
                    "SELECT COUNT(*) FROM gallery_items \
                     WHERE user_id = $1 AND item_type = $2",
                )
                .bind(user_id)
                .bind(item_type.as_str())
                .fetch_one(pool)
                .await
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM gallery_items WHERE user_id = $1")
                    .bind(user_id)
                    .fetch_one(pool)
                    .await
            }
        }
    }

    /// Clamp a client-supplied page size into `1..=MAX_LIMIT`.
    pub fn clamp_limit(limit: Option<i64>) -> i64 {
        limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    /// Clamp a client-supplied page number to at least 1.
    pub fn clamp_page(page: Option<i64>) -> i64 {
        page.unwrap_or(1).max(1)
    }
}
