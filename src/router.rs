use std::path::Path;

use axum::{
    Json, Router,
    extract::Request,
    http::{HeaderValue, Method, StatusCode, header::CONTENT_TYPE},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use trilium_blog_cache::{CacheControlConfig, etag_middleware};
use trilium_blog_config::CorsConfig;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::metrics::metrics_middleware;
use crate::modules::articles::router::init_articles_router;
use crate::modules::attachments::router::init_attachments_router;
use crate::modules::blog::router::init_blog_router;
use crate::modules::seo::router::init_seo_router;
use crate::state::AppState;

async fn api_not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "message": "Not found" })))
}

/// Serves `.js`/`.mjs` assets as `application/javascript`.
async fn javascript_mime(req: Request, next: Next) -> Response {
    let is_script = matches!(
        Path::new(req.uri().path())
            .extension()
            .and_then(|ext| ext.to_str()),
        Some("js" | "mjs")
    );

    let mut response = next.run(req).await;
    if is_script && response.status().is_success() {
        response.headers_mut().insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/javascript"),
        );
    }
    response
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins = if config.allows_any_origin() {
        AllowOrigin::any()
    } else {
        let allowed: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        AllowOrigin::list(allowed)
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
}

/// Built front end: `/assets/*`, favicon and logo from the static directory,
/// and `index.html` for every other path so client-side routes resolve.
fn static_router(static_dir: &Path) -> Router {
    Router::new()
        .nest_service("/assets", ServeDir::new(static_dir.join("assets")))
        .route_service("/favicon.ico", ServeFile::new(static_dir.join("favicon.ico")))
        .route_service("/logo.png", ServeFile::new(static_dir.join("logo.png")))
        .fallback_service(ServeFile::new(static_dir.join("index.html")))
        .layer(middleware::from_fn(javascript_mime))
}

pub fn init_router(state: AppState) -> Router {
    let attachment_cache = CacheControlConfig::from_ttl(state.cache.ttl());

    let api = Router::new()
        .merge(init_blog_router())
        .nest("/articles", init_articles_router())
        .merge(init_attachments_router(attachment_cache.clone()))
        .fallback(api_not_found);

    let content = Router::new()
        .nest("/api", api)
        .merge(init_attachments_router(attachment_cache))
        .merge(init_seo_router())
        .layer(middleware::from_fn(etag_middleware));

    let mut router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .merge(content);

    if let Some(handle) = state.metrics.clone() {
        router = router.route("/metrics", get(move || async move { handle.render() }));
    }

    router
        .with_state(state.clone())
        .merge(static_router(&state.server_config.static_dir))
        .layer(cors_layer(&state.cors_config))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}

