use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::get_blog_info;

pub fn init_blog_router() -> Router<AppState> {
    Router::new().route("/info", get(get_blog_info))
}
