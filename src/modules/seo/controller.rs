use axum::{
    extract::State,
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};

use trilium_blog_core::AppError;

use crate::metrics::track_fetch_failure;
use crate::state::AppState;

use super::service::SeoService;

#[utoipa::path(
    get,
    path = "/sitemap.xml",
    responses(
        (status = 200, description = "Sitemap of published articles", content_type = "application/xml", body = String),
        (status = 500, description = "Failed to generate sitemap", body = trilium_blog_models::ErrorResponse)
    ),
    tag = "SEO"
)]
pub async fn get_sitemap(State(state): State<AppState>) -> Result<Response, AppError> {
    let xml = SeoService::generate_sitemap(state.notes.as_ref(), &state.cache, &state.blog_config)
        .await
        .map_err(|e| {
            track_fetch_failure("generate_sitemap", e.is_not_blog_eligible());
            e.into_app_error("Failed to generate sitemap")
        })?;

    Ok(([(CONTENT_TYPE, "application/xml")], xml).into_response())
}

#[utoipa::path(
    get,
    path = "/robots.txt",
    responses(
        (status = 200, description = "Crawler rules", content_type = "text/plain", body = String)
    ),
    tag = "SEO"
)]
pub async fn get_robots_txt(State(state): State<AppState>) -> String {
    SeoService::robots_txt(&state.blog_config)
}
