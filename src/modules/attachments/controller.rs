use axum::{
    extract::{Path, State},
    http::{HeaderValue, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};

use trilium_blog_core::AppError;

use crate::metrics::track_fetch_failure;
use crate::state::AppState;

use super::service::AttachmentService;

const FALLBACK_MIME: &str = "application/octet-stream";

#[utoipa::path(
    get,
    path = "/api/attachments/{attachment_id}",
    params(
        ("attachment_id" = String, Path, description = "Attachment ID")
    ),
    responses(
        (status = 200, description = "Attachment content with its stored MIME type", content_type = "application/octet-stream", body = Vec<u8>),
        (status = 500, description = "Failed to fetch attachment", body = trilium_blog_models::ErrorResponse)
    ),
    tag = "Attachments"
)]
pub async fn get_attachment(
    State(state): State<AppState>,
    Path(attachment_id): Path<String>,
) -> Result<Response, AppError> {
    let payload =
        AttachmentService::get_attachment(state.notes.as_ref(), &state.cache, &attachment_id)
            .await
            .map_err(|e| {
                track_fetch_failure("get_attachment", e.is_not_blog_eligible());
                e.into_app_error("Failed to fetch attachment")
            })?;

    let content_type = Some(payload.mime.trim())
        .filter(|mime| !mime.is_empty())
        .and_then(|mime| HeaderValue::from_str(mime).ok())
        .unwrap_or_else(|| HeaderValue::from_static(FALLBACK_MIME));

    Ok(([(CONTENT_TYPE, content_type)], payload.content).into_response())
}
