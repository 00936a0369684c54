use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{get_robots_txt, get_sitemap};

pub fn init_seo_router() -> Router<AppState> {
    Router::new()
        .route("/sitemap.xml", get(get_sitemap))
        .route("/robots.txt", get(get_robots_txt))
}
