pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// POST /imageproxy       image generation (text2img / img2img / img2ghibli)
/// POST /animationproxy   text-to-animation
/// POST /img2sound        image-to-sound (multipart upload)
/// POST /text2speech      text-to-speech
/// POST /text2music       text-to-music
/// POST /text2video       text-to-video
/// GET  /text2video       usage stub
/// GET  /gallery          list the caller's gallery items (auth)
/// POST /gallery          save a gallery item (auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/imageproxy", post(handlers::image::image_proxy))
        .route(
            "/animationproxy",
            post(handlers::animation::animation_proxy),
        )
        .route("/img2sound", post(handlers::sound::img2sound_proxy))
        .route("/text2speech", post(handlers::speech::text2speech_proxy))
        .route("/text2music", post(handlers::music::text2music_proxy))
        .route(
            "/text2video",
            post(handlers::video::text2video_proxy).get(handlers::video::text2video_info),
        )
        .route(
            "/gallery",
            get(handlers::gallery::list_gallery).post(handlers::gallery::create_gallery_item),
        )
}
