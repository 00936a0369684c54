use tracing::{info, instrument};

use trilium_blog_cache::{CacheLayer, keys};
use trilium_blog_models::AttachmentPayload;

use crate::errors::BlogError;
use crate::upstream::NoteApi;

pub struct AttachmentService;

impl AttachmentService {
    /// Attachment bytes and MIME type, served only for attachments of
    /// published notes.
    ///
    /// Three sequential calls: attachment details, then the owning note,
    /// then, once the owner is known to be published, the content itself.
    #[instrument(skip(api, cache))]
    pub async fn get_attachment(
        api: &dyn NoteApi,
        cache: &CacheLayer,
        attachment_id: &str,
    ) -> Result<AttachmentPayload, BlogError> {
        cache
            .get_or_fetch_json(&keys::attachments::by_id(attachment_id), || async {
                let detail = api.get_attachment(attachment_id).await.map_err(|source| {
                    BlogError::AttachmentDetail {
                        attachment_id: attachment_id.to_string(),
                        source,
                    }
                })?;

                let owner = api.get_note(&detail.owner_id).await.map_err(|source| {
                    BlogError::AttachmentOwner {
                        attachment_id: attachment_id.to_string(),
                        owner_id: detail.owner_id.clone(),
                        source,
                    }
                })?;

                if !owner.is_blog_eligible() {
                    return Err(BlogError::AttachmentNotBlogEligible {
                        attachment_id: attachment_id.to_string(),
                        owner_id: detail.owner_id,
                    });
                }

                let content = api
                    .get_attachment_content(attachment_id)
                    .await
                    .map_err(|source| BlogError::AttachmentContent {
                        attachment_id: attachment_id.to_string(),
                        source,
                    })?;

                info!(
                    attachment.id = %attachment_id,
                    attachment.mime = %detail.mime,
                    bytes = content.len(),
                    "Fetched attachment"
                );

                Ok::<_, BlogError>(AttachmentPayload {
                    content,
                    mime: detail.mime,
                })
            })
            .await
    }
}
