use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use tracing::debug;

use trilium_blog_core::{AppError, PageQuery, total_pages};
use trilium_blog_models::{ArticleListResponse, ArticleResponse};

use crate::metrics::track_fetch_failure;
use crate::state::AppState;

use super::service::ArticleService;

const PAGE_URL_ATTRIBUTE: &str = "pageUrl";

#[utoipa::path(
    get,
    path = "/api/articles",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of published articles", body = ArticleListResponse),
        (status = 500, description = "Failed to fetch articles", body = trilium_blog_models::ErrorResponse)
    ),
    tag = "Articles"
)]
pub async fn list_articles(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<ArticleListResponse>, AppError> {
    // Malformed query strings fall back to the first page.
    let page = query.map(|Query(q)| q.page()).unwrap_or(1);
    let page_size = state.blog_config.articles_per_page;

    let result =
        ArticleService::list_articles(state.notes.as_ref(), &state.cache, page, page_size)
            .await
            .map_err(|e| {
                track_fetch_failure("list_articles", e.is_not_blog_eligible());
                e.into_app_error("Failed to fetch articles")
            })?;

    debug!(
        returned = result.articles.len(),
        total = result.total,
        page,
        "Listed articles"
    );

    Ok(Json(ArticleListResponse {
        total_pages: total_pages(result.total, page_size),
        total_articles: result.total,
        articles: result.articles,
        current_page: page,
        articles_per_page: page_size,
    }))
}

#[utoipa::path(
    get,
    path = "/api/articles/{note_id}",
    params(
        ("note_id" = String, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Rendered article", body = ArticleResponse),
        (status = 500, description = "Failed to fetch article", body = trilium_blog_models::ErrorResponse)
    ),
    tag = "Articles"
)]
pub async fn get_article(
    State(state): State<AppState>,
    Path(note_id): Path<String>,
) -> Result<Json<ArticleResponse>, AppError> {
    let rendered = ArticleService::get_article(
        state.notes.as_ref(),
        &state.cache,
        &state.transformer,
        &note_id,
    )
    .await
    .map_err(|e| {
        track_fetch_failure("get_article", e.is_not_blog_eligible());
        e.into_app_error("Failed to fetch article")
    })?;

    let page_url = rendered
        .article
        .attribute_value(PAGE_URL_ATTRIBUTE)
        .unwrap_or_default()
        .to_string();

    Ok(Json(ArticleResponse {
        title: rendered.article.title,
        blog_name: state.blog_config.blog_name.clone(),
        domain: state.blog_config.domain.clone(),
        note_id,
        content: rendered.content,
        page_url,
        date_modified: rendered.article.date_modified,
    }))
}
