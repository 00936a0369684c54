//! # Trilium Blog Cache
//!
//! Cache-aside storage for upstream fetches.
//!
//! This crate provides:
//! - [`CacheStore`]: the key-value store seam, with Redis and in-memory backends
//! - [`CacheLayer`]: `get_or_fetch` with gzip-compressed values, a fixed TTL
//!   and single-flight protection against duplicate concurrent fills
//! - Cache configuration from environment variables
//! - Cache key builders
//! - HTTP caching middleware (ETag, Cache-Control)
//!
//! # Example
//!
//! ```ignore
//! use trilium_blog_cache::{CacheConfig, CacheLayer, open_store};
//!
//! let config = CacheConfig::from_env();
//! let store = open_store(&config).await;
//! let cache = CacheLayer::new(store, config.ttl(), config.fill_lock);
//!
//! let page: ArticlePage = cache
//!     .get_or_fetch_json(&keys::articles::page(1, 10), || async {
//!         fetch_page_from_upstream().await
//!     })
//!     .await?;
//! ```

pub mod compression;
pub mod config;
pub mod keys;
pub mod layer;
pub mod memory;
pub mod middleware;
pub mod redis;
pub mod store;

pub use config::{CacheBackend, CacheConfig};
pub use layer::{CacheLayer, FillLockPolicy};
pub use memory::MemoryStore;
pub use middleware::{CacheControlConfig, cache_control, etag_middleware};
pub use redis::RedisCache;
pub use store::{CacheError, CacheStore, open_store};
