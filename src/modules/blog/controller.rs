use axum::{Json, extract::State};

use trilium_blog_models::BlogInfoResponse;

use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/info",
    responses(
        (status = 200, description = "Blog name and title", body = BlogInfoResponse)
    ),
    tag = "Blog"
)]
pub async fn get_blog_info(State(state): State<AppState>) -> Json<BlogInfoResponse> {
    Json(BlogInfoResponse {
        blog_name: state.blog_config.blog_name.clone(),
        blog_title: state.blog_config.blog_title.clone(),
    })
}
