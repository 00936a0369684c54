//! Key-value store seam for the cache layer.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::config::{CacheBackend, CacheConfig};
use crate::memory::MemoryStore;
use crate::redis::RedisCache;

/// Error type for cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    Redis(#[from] ::redis::RedisError),

    #[error("Failed to compress cache value: {0}")]
    Compress(#[source] std::io::Error),

    #[error("Failed to decompress cached value for {key}: {source}")]
    Decompress {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A byte-oriented key-value store with per-entry expiry.
///
/// `get` returns `Ok(None)` for a missing or expired key; any other failure
/// is an error.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError>;

    fn backend(&self) -> &'static str;
}

/// Opens the configured store.
///
/// A Redis store that cannot be reached at startup is replaced by an
/// in-memory store so the proxy keeps serving.
pub async fn open_store(config: &CacheConfig) -> Arc<dyn CacheStore> {
    match config.backend {
        CacheBackend::Memory => {
            info!(capacity = config.memory_capacity, "Using in-memory cache store");
            Arc::new(MemoryStore::new(config.memory_capacity))
        }
        CacheBackend::Redis => match RedisCache::new(&config.redis_url).await {
            Ok(cache) => {
                info!(redis_url = %config.redis_url, "Connected to Redis cache store");
                Arc::new(cache)
            }
            Err(e) => {
                warn!(
                    redis_url = %config.redis_url,
                    error = %e,
                    "Redis unavailable at startup, falling back to in-memory cache store"
                );
                Arc::new(MemoryStore::new(config.memory_capacity))
            }
        },
    }
}
