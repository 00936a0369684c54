//! HTTP caching headers for proxied blog responses.
//!
//! Upstream data is cached server-side for a fixed TTL, so clients can be
//! told to reuse a response for the same window. Bodies are small JSON or XML
//! documents, which makes hashing them for an `ETag` cheap.
//!
//! ```ignore
//! use trilium_blog_cache::{CacheControlConfig, cache_control, etag_middleware};
//!
//! let api = Router::new()
//!     .route("/api/articles", get(list))
//!     .layer(cache_control(CacheControlConfig::public(3600)))
//!     .layer(axum::middleware::from_fn(etag_middleware));
//! ```

use axum::{
    body::Body,
    extract::Request,
    http::{
        HeaderValue, Method, StatusCode,
        header::{CACHE_CONTROL, ETAG, IF_NONE_MATCH},
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use http_body_util::BodyExt;
use sha2::{Digest, Sha256};
use std::time::Duration;
use tower_http::set_header::SetResponseHeaderLayer;

/// Cache-Control directives for a group of routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheControlConfig {
    pub max_age: u64,
    /// `no-cache`; when set, `max_age` is ignored.
    pub no_cache: bool,
}

impl CacheControlConfig {
    pub fn public(max_age: u64) -> Self {
        Self {
            max_age,
            no_cache: false,
        }
    }

    pub fn from_ttl(ttl: Duration) -> Self {
        Self::public(ttl.as_secs())
    }

    pub fn no_cache() -> Self {
        Self {
            max_age: 0,
            no_cache: true,
        }
    }

    pub fn to_header_value(&self) -> HeaderValue {
        if self.no_cache {
            return HeaderValue::from_static("no-cache");
        }

        HeaderValue::from_str(&format!("public, max-age={}", self.max_age))
            .unwrap_or_else(|_| HeaderValue::from_static("no-cache"))
    }
}

impl Default for CacheControlConfig {
    fn default() -> Self {
        Self::no_cache()
    }
}

#[derive(Clone)]
pub struct CacheControlMakeHeader(HeaderValue);

impl<B> tower_http::set_header::MakeHeaderValue<Response<B>> for CacheControlMakeHeader {
    fn make_header_value(&mut self, message: &Response<B>) -> Option<HeaderValue> {
        // Error bodies must not be reused by clients.
        message
            .status()
            .is_success()
            .then(|| self.0.clone())
    }
}

/// Sets `Cache-Control` on successful responses that don't already carry one.
pub fn cache_control(config: CacheControlConfig) -> SetResponseHeaderLayer<CacheControlMakeHeader> {
    SetResponseHeaderLayer::if_not_present(
        CACHE_CONTROL,
        CacheControlMakeHeader(config.to_header_value()),
    )
}

fn generate_etag(body: &[u8]) -> String {
    let hash = Sha256::digest(body);
    format!("\"{}\"", hex::encode(&hash[..16]))
}

/// Weak comparison, ignoring any `W/` prefix.
fn etags_match(client_etag: &str, server_etag: &str) -> bool {
    let client = client_etag.trim().trim_start_matches("W/");
    let server = server_etag.trim().trim_start_matches("W/");
    client == server || client == "*"
}

fn any_etag_matches(if_none_match: &str, etag: &str) -> bool {
    if_none_match.split(',').any(|tag| etags_match(tag, etag))
}

/// Adds a body-hash `ETag` to successful GET responses and answers
/// `If-None-Match` revalidations with 304.
///
/// Buffers the whole response body.
pub async fn etag_middleware(request: Request, next: Next) -> Response {
    if request.method() != Method::GET {
        return next.run(request).await;
    }

    let if_none_match = request
        .headers()
        .get(IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let response = next.run(request).await;

    if !response.status().is_success() {
        return response;
    }

    if let Some(existing) = response.headers().get(ETAG).and_then(|v| v.to_str().ok()) {
        if if_none_match
            .as_deref()
            .is_some_and(|client| any_etag_matches(client, existing))
        {
            return StatusCode::NOT_MODIFIED.into_response();
        }
        return response;
    }

    let (parts, body) = response.into_parts();
    let bytes = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(_) => return (parts, Body::empty()).into_response(),
    };

    let etag = generate_etag(&bytes);

    if if_none_match
        .as_deref()
        .is_some_and(|client| any_etag_matches(client, &etag))
    {
        let mut not_modified = StatusCode::NOT_MODIFIED.into_response();
        if let Ok(value) = HeaderValue::from_str(&etag) {
            not_modified.headers_mut().insert(ETAG, value);
        }
        return not_modified;
    }

    let mut response = Response::from_parts(parts, Body::from(bytes));
    if let Ok(value) = HeaderValue::from_str(&etag) {
        response.headers_mut().insert(ETAG, value);
    }

    response
}
