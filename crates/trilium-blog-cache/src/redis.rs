//! Redis cache store.
//!
//! Values are stored as raw bytes with `SETEX`; compression happens in the
//! cache layer, not here.

use std::time::Duration;

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, instrument};

use crate::store::{CacheError, CacheStore};

/// Redis store backed by a multiplexed, auto-reconnecting connection.
#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
}

impl std::fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCache").finish_non_exhaustive()
    }
}

impl RedisCache {
    /// Connects to Redis.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::Redis` if the URL is invalid or the server is
    /// unreachable.
    pub async fn new(redis_url: &str) -> Result<Self, CacheError> {
        let client = Client::open(redis_url)?;
        let conn = ConnectionManager::new(client).await?;

        Ok(Self { conn })
    }
}

#[async_trait]
impl CacheStore for RedisCache {
    #[instrument(skip(self), fields(cache.operation = "GET"))]
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let mut conn = self.conn.clone();
        let value: Option<Vec<u8>> = conn.get(key).await?;

        debug!(cache.key = %key, cache.hit = value.is_some(), "Redis GET");

        Ok(value)
    }

    #[instrument(skip(self, value), fields(cache.operation = "SETEX", cache.bytes = value.len()))]
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();

        conn.set_ex::<_, _, ()>(key, value, ttl.as_secs().max(1))
            .await?;

        debug!(cache.key = %key, cache.ttl_secs = %ttl.as_secs(), "Redis SETEX");

        Ok(())
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
