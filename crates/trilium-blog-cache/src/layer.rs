//! Cache-aside reads with single-flight fills.
//!
//! [`CacheLayer::get_or_fetch`] looks a key up, and on a miss takes a fill
//! lock, looks again, and only then runs the caller's fetch. The fetched
//! payload is gzip-compressed and written with a fixed TTL. Nothing is ever
//! invalidated explicitly; entries expire passively.
//!
//! # Failure semantics
//!
//! - store read errors and undecodable cached values propagate
//! - a missing key is a normal miss
//! - store write errors are logged and swallowed; the fetched value is
//!   still returned
//!
//! # Fill lock granularity
//!
//! [`FillLockPolicy::Global`] uses one process-wide lock: fills for different
//! keys serialize behind each other. [`FillLockPolicy::PerKey`] only
//! serializes fills of the same key.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Weak};
use std::time::Duration;

use metrics::counter;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info, instrument, warn};

use crate::compression::{compress, decompress};
use crate::store::{CacheError, CacheStore};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FillLockPolicy {
    Global,
    #[default]
    PerKey,
}

impl std::str::FromStr for FillLockPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "global" => Ok(Self::Global),
            "per-key" | "per_key" | "perkey" => Ok(Self::PerKey),
            other => Err(format!("unknown fill lock policy: {other}")),
        }
    }
}

enum FillLocks {
    Global(Arc<Mutex<()>>),
    /// Weak so that finished fills do not pin their lock in the map.
    PerKey(Mutex<HashMap<String, Weak<Mutex<()>>>>),
}

impl FillLocks {
    fn new(policy: FillLockPolicy) -> Self {
        match policy {
            FillLockPolicy::Global => Self::Global(Arc::new(Mutex::new(()))),
            FillLockPolicy::PerKey => Self::PerKey(Mutex::new(HashMap::new())),
        }
    }

    async fn acquire(&self, key: &str) -> OwnedMutexGuard<()> {
        match self {
            Self::Global(lock) => lock.clone().lock_owned().await,
            Self::PerKey(locks) => {
                let lock = {
                    let mut locks = locks.lock().await;
                    locks.retain(|_, lock| lock.strong_count() > 0);

                    match locks.get(key).and_then(Weak::upgrade) {
                        Some(lock) => lock,
                        None => {
                            let lock = Arc::new(Mutex::new(()));
                            locks.insert(key.to_owned(), Arc::downgrade(&lock));
                            lock
                        }
                    }
                };
                lock.lock_owned().await
            }
        }
    }
}

/// Compressed cache-aside layer over a [`CacheStore`].
pub struct CacheLayer {
    store: Arc<dyn CacheStore>,
    ttl: Duration,
    policy: FillLockPolicy,
    locks: FillLocks,
}

impl std::fmt::Debug for CacheLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheLayer")
            .field("backend", &self.store.backend())
            .field("ttl", &self.ttl)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl CacheLayer {
    pub fn new(store: Arc<dyn CacheStore>, ttl: Duration, policy: FillLockPolicy) -> Self {
        Self {
            store,
            ttl,
            policy,
            locks: FillLocks::new(policy),
        }
    }

    pub fn policy(&self) -> FillLockPolicy {
        self.policy
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached bytes for `key`, or runs `fetch` and caches its
    /// result.
    ///
    /// At most one `fetch` per key runs at a time; callers that queued behind
    /// it are served from the value it stored.
    #[instrument(skip(self, fetch), fields(cache.backend = self.store.backend()))]
    pub async fn get_or_fetch<F, Fut, E>(&self, key: &str, fetch: F) -> Result<Vec<u8>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<u8>, E>>,
        E: From<CacheError>,
    {
        if let Some(hit) = self.lookup(key).await? {
            return Ok(hit);
        }

        let _fill = self.locks.acquire(key).await;

        if let Some(hit) = self.lookup(key).await? {
            debug!(cache.key = %key, "Filled by a concurrent caller");
            return Ok(hit);
        }

        info!(cache.key = %key, "Cache miss, fetching from source");
        let fresh = fetch().await?;
        counter!("cache_fills_total").increment(1);

        self.write(key, &fresh).await;

        Ok(fresh)
    }

    /// [`get_or_fetch`](Self::get_or_fetch) for a JSON-serializable value.
    pub async fn get_or_fetch_json<T, F, Fut, E>(&self, key: &str, fetch: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: From<CacheError>,
    {
        let bytes = self
            .get_or_fetch(key, || async move {
                let value = fetch().await?;
                serde_json::to_vec(&value).map_err(|e| E::from(CacheError::Serialization(e)))
            })
            .await?;

        serde_json::from_slice(&bytes).map_err(|e| E::from(CacheError::Serialization(e)))
    }

    async fn lookup(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let Some(compressed) = self.store.get(key).await? else {
            counter!("cache_lookups_total", "result" => "miss").increment(1);
            return Ok(None);
        };

        counter!("cache_lookups_total", "result" => "hit").increment(1);
        debug!(cache.key = %key, "Cache hit");

        decompress(&compressed)
            .map(Some)
            .map_err(|source| CacheError::Decompress {
                key: key.to_string(),
                source,
            })
    }

    async fn write(&self, key: &str, payload: &[u8]) {
        let compressed = match compress(payload).map_err(CacheError::Compress) {
            Ok(compressed) => compressed,
            Err(e) => {
                warn!(cache.key = %key, error = %e, "Failed to compress data, not caching");
                counter!("cache_write_failures_total").increment(1);
                return;
            }
        };

        if let Err(e) = self.store.set(key, compressed, self.ttl).await {
            warn!(cache.key = %key, error = %e, "Failed to cache data");
            counter!("cache_write_failures_total").increment(1);
        }
    }
}
