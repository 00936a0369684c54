//! JSON bodies returned to the front end.

use serde::Serialize;
use utoipa::ToSchema;

use crate::articles::Article;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArticleListResponse {
    pub articles: Vec<Article>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_articles: usize,
    pub articles_per_page: usize,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArticleResponse {
    pub title: String,
    pub blog_name: String,
    pub domain: String,
    pub note_id: String,
    /// Sanitized, rewritten HTML body of the note.
    pub content: String,
    /// Value of the note's `pageUrl` attribute, or empty.
    pub page_url: String,
    pub date_modified: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlogInfoResponse {
    pub blog_name: String,
    pub blog_title: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
