//! Note service API.
//!
//! [`NoteApi`] is the seam the orchestrators depend on; [`TriliumClient`] is
//! the HTTP implementation used in production.

pub mod client;
pub mod error;

use async_trait::async_trait;
use trilium_blog_models::{Article, AttachmentDetail};

pub use client::TriliumClient;
pub use error::UpstreamError;

/// Read-only view of the note service.
///
/// Every call is a single attempt; failures are returned as-is and never
/// retried.
#[async_trait]
pub trait NoteApi: Send + Sync {
    /// All notes labelled `#blog=true`, ordered by modification time.
    async fn search_blog_notes(&self) -> Result<Vec<Article>, UpstreamError>;

    async fn get_note(&self, note_id: &str) -> Result<Article, UpstreamError>;

    /// Raw note body, usually HTML.
    async fn get_note_content(&self, note_id: &str) -> Result<Vec<u8>, UpstreamError>;

    async fn get_attachment(&self, attachment_id: &str) -> Result<AttachmentDetail, UpstreamError>;

    async fn get_attachment_content(&self, attachment_id: &str) -> Result<Vec<u8>, UpstreamError>;
}
