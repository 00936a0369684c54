use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{get_article, list_articles};

pub fn init_articles_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_articles))
        .route("/{note_id}", get(get_article))
}
