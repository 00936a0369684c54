//! # Trilium Blog Models
//!
//! Records decoded from the note service, the intermediate shapes stored in
//! the cache, and the JSON bodies returned to the front end.
//!
//! - [`articles`]: Notes, attributes and blog eligibility
//! - [`attachments`]: Attachment metadata and cached content
//! - [`responses`]: API response DTOs

pub mod articles;
pub mod attachments;
pub mod responses;

pub use articles::{Article, ArticlePage, ArticleWithContent, Attribute, NoteList, has_blog_label};
pub use attachments::{AttachmentDetail, AttachmentPayload};
pub use responses::{ArticleListResponse, ArticleResponse, BlogInfoResponse, ErrorResponse};
