use axum::{Router, routing::get};

use trilium_blog_cache::{CacheControlConfig, cache_control};

use crate::state::AppState;

use super::controller::get_attachment;

/// Attachment content, mounted both under `/api` and at the site root.
pub fn init_attachments_router(cache_control_config: CacheControlConfig) -> Router<AppState> {
    Router::new()
        .route("/attachments/{attachment_id}", get(get_attachment))
        .layer(cache_control(cache_control_config))
}
