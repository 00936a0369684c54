//! Failures of the fetch orchestrators.

use trilium_blog_cache::CacheError;
use trilium_blog_core::AppError;
use tracing::{error, warn};

use crate::upstream::UpstreamError;

fn outcome(result: &Option<UpstreamError>) -> String {
    match result {
        Some(e) => e.to_string(),
        None => "ok".to_string(),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BlogError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// One or both legs of the concurrent metadata/content fetch failed.
    #[error(
        "failed to retrieve article {note_id} (metadata: {}; content: {})",
        outcome(.metadata),
        outcome(.content)
    )]
    ArticleFetch {
        note_id: String,
        metadata: Option<UpstreamError>,
        content: Option<UpstreamError>,
    },

    #[error("note {note_id} is not a blog post")]
    NotBlogEligible { note_id: String },

    #[error("failed to retrieve attachment details for {attachment_id}: {source}")]
    AttachmentDetail {
        attachment_id: String,
        #[source]
        source: UpstreamError,
    },

    #[error("failed to retrieve owner note {owner_id} of attachment {attachment_id}: {source}")]
    AttachmentOwner {
        attachment_id: String,
        owner_id: String,
        #[source]
        source: UpstreamError,
    },

    #[error("attachment {attachment_id} belongs to non-blog note {owner_id}")]
    AttachmentNotBlogEligible {
        attachment_id: String,
        owner_id: String,
    },

    #[error("failed to retrieve attachment content for {attachment_id}: {source}")]
    AttachmentContent {
        attachment_id: String,
        #[source]
        source: UpstreamError,
    },

    #[error("cache failure: {0}")]
    Cache(#[from] CacheError),
}

impl BlogError {
    /// The target exists upstream but is not published.
    pub fn is_not_blog_eligible(&self) -> bool {
        matches!(
            self,
            Self::NotBlogEligible { .. } | Self::AttachmentNotBlogEligible { .. }
        )
    }

    /// Logs the full error and returns a generic 500 carrying only `message`.
    ///
    /// Ineligible content is reported exactly like a failed fetch.
    pub fn into_app_error(self, message: &'static str) -> AppError {
        if self.is_not_blog_eligible() {
            warn!(error = %self, "Rejected request for unpublished content");
        } else {
            error!(error = %self, "{}", message);
        }
        AppError::opaque(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn status_error(status: u16) -> UpstreamError {
        UpstreamError::Status {
            status,
            url: "http://trilium/api/notes/n1".into(),
        }
    }

    #[test]
    fn test_article_fetch_reports_both_outcomes() {
        let err = BlogError::ArticleFetch {
            note_id: "n1".into(),
            metadata: Some(status_error(404)),
            content: None,
        };
        let message = err.to_string();
        assert!(message.contains("metadata: note service request failed with status 404"));
        assert!(message.contains("content: ok"));

        let err = BlogError::ArticleFetch {
            note_id: "n1".into(),
            metadata: Some(status_error(500)),
            content: Some(status_error(502)),
        };
        let message = err.to_string();
        assert!(message.contains("500"));
        assert!(message.contains("502"));
    }

    #[test]
    fn test_eligibility_classification() {
        assert!(BlogError::NotBlogEligible { note_id: "n".into() }.is_not_blog_eligible());
        assert!(
            BlogError::AttachmentNotBlogEligible {
                attachment_id: "a".into(),
                owner_id: "n".into()
            }
            .is_not_blog_eligible()
        );
        assert!(!BlogError::Upstream(status_error(500)).is_not_blog_eligible());
    }

    #[test]
    fn test_app_error_hides_details() {
        let err = BlogError::NotBlogEligible {
            note_id: "secret".into(),
        }
        .into_app_error("Failed to fetch article");

        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error.to_string(), "Failed to fetch article");
    }
}
