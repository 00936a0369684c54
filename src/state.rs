use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use tracing::info;

use trilium_blog_cache::{CacheConfig, CacheLayer, open_store};
use trilium_blog_config::{BlogConfig, CorsConfig, ServerConfig, UpstreamConfig};

use crate::content::ContentTransformer;
use crate::upstream::{NoteApi, TriliumClient};

/// Process-wide handles shared by every request.
///
/// Configuration is read once at startup. The note client and the cache
/// layer are singletons injected here, so tests can swap in fakes.
#[derive(Clone)]
pub struct AppState {
    pub blog_config: BlogConfig,
    pub server_config: ServerConfig,
    pub cors_config: CorsConfig,
    pub notes: Arc<dyn NoteApi>,
    pub cache: Arc<CacheLayer>,
    pub transformer: ContentTransformer,
    pub metrics: Option<PrometheusHandle>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("blog_config", &self.blog_config)
            .field("server_config", &self.server_config)
            .field("cors_config", &self.cors_config)
            .field("cache", &self.cache)
            .field("metrics", &self.metrics.is_some())
            .finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(
        blog_config: BlogConfig,
        server_config: ServerConfig,
        cors_config: CorsConfig,
        notes: Arc<dyn NoteApi>,
        cache: Arc<CacheLayer>,
    ) -> Self {
        let transformer = ContentTransformer::from_config(&blog_config);
        Self {
            blog_config,
            server_config,
            cors_config,
            notes,
            cache,
            transformer,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: Option<PrometheusHandle>) -> Self {
        self.metrics = handle;
        self
    }
}

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let upstream_config = UpstreamConfig::from_env();
    info!(upstream = ?upstream_config, "Configuring note service client");
    let notes: Arc<dyn NoteApi> = Arc::new(TriliumClient::new(upstream_config)?);

    let cache_config = CacheConfig::from_env();
    let store = open_store(&cache_config).await;
    let cache = Arc::new(CacheLayer::new(
        store,
        cache_config.ttl(),
        cache_config.fill_lock,
    ));
    info!(cache = ?cache, "Cache layer ready");

    Ok(AppState::new(
        BlogConfig::from_env(),
        ServerConfig::from_env(),
        CorsConfig::from_env(),
        notes,
        cache,
    ))
}
