//! Cache configuration.
//!
//! This module provides configuration for the cache store and fill policy
//! loaded from environment variables.

use std::env;
use std::time::Duration;

use crate::layer::FillLockPolicy;

/// Which store backs the cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CacheBackend {
    #[default]
    Redis,
    Memory,
}

impl std::str::FromStr for CacheBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redis" => Ok(Self::Redis),
            "memory" | "in-memory" => Ok(Self::Memory),
            other => Err(format!("unknown cache backend: {other}")),
        }
    }
}

/// Cache configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `REDIS_URL`: Redis connection URL (default: `redis://127.0.0.1:6379`)
/// - `CACHE_BACKEND`: `redis` or `memory` (default: `redis`)
/// - `CACHE_TTL_SECONDS`: TTL for every cached entry (default: `3600`)
/// - `CACHE_FILL_LOCK`: `per-key` or `global` (default: `per-key`)
/// - `CACHE_MEMORY_CAPACITY`: Max entries in the in-memory store (default: `10000`)
#[derive(Clone, Debug)]
pub struct CacheConfig {
    pub redis_url: String,
    pub backend: CacheBackend,
    pub ttl_seconds: u64,
    pub fill_lock: FillLockPolicy,
    pub memory_capacity: u64,
}

impl CacheConfig {
    /// Load configuration from environment variables, falling back to the
    /// defaults for anything missing or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            redis_url: env::var("REDIS_URL").unwrap_or(defaults.redis_url),
            backend: env::var("CACHE_BACKEND")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.backend),
            ttl_seconds: env::var("CACHE_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.ttl_seconds),
            fill_lock: env::var("CACHE_FILL_LOCK")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.fill_lock),
            memory_capacity: env::var("CACHE_MEMORY_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.memory_capacity),
        }
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            redis_url: "redis://127.0.0.1:6379".into(),
            backend: CacheBackend::Redis,
            ttl_seconds: 3600,
            fill_lock: FillLockPolicy::PerKey,
            memory_capacity: 10_000,
        }
    }
}
