//! Request cache facade.

use std::time::Duration;

use tracing::debug;

use super::backend::CacheBackend;
use super::memory::MemoryBackend;
use super::redis::RedisBackend;
use crate::config::{CacheConfig, CacheType};
use crate::response::CachedResponse;
use crate::Result;

/// Uniform front over the configured cache backend.
///
/// This is the only surface the proxy front end depends on: store a captured
/// response under its request key, test membership, read it back, walk the
/// keys, query the usage metric. No caching policy lives here — the facade
/// delegates and (for redis) applies the configured per-entry TTL.
///
/// Construction selects the backend family once, from configuration.
/// Constructing a second `RequestCache` is not an isolation boundary: both
/// in-memory instances (process-wide store) and redis instances (shared
/// server) observe the same entries as every other handle.
pub struct RequestCache {
    backend: Box<dyn CacheBackend>,
    ttl: Option<Duration>,
}

impl RequestCache {
    /// Builds the cache selected by `config`.
    ///
    /// For the redis family this establishes the connection and fails with
    /// `BackendUnavailable` when the store cannot be reached.
    pub async fn new(config: &CacheConfig) -> Result<Self> {
        let backend: Box<dyn CacheBackend> = match config.cache_type {
            CacheType::InMemory => Box::new(MemoryBackend::new()),
            CacheType::Redis => Box::new(RedisBackend::connect(&config.redis).await?),
        };
        debug!(backend = backend.name(), "request cache ready");
        Ok(Self {
            backend,
            ttl: config.redis.ttl,
        })
    }

    /// Stores `entry` under `key`, replacing any previous entry wholesale.
    pub async fn write(&self, key: &str, entry: &CachedResponse) -> Result<()> {
        self.backend.set(key, entry, self.ttl).await?;
        debug!(key, status = entry.status, "cached upstream response");
        Ok(())
    }

    /// Fetches the entry stored under `key`; `NotFound` on a miss.
    pub async fn read(&self, key: &str) -> Result<CachedResponse> {
        self.backend.get(key).await
    }

    /// Whether `key` currently has a cached entry.
    pub async fn has(&self, key: &str) -> Result<bool> {
        self.backend.contains(key).await
    }

    /// Snapshot of the cached keys, in no particular order.
    pub async fn iterate(&self) -> Result<Vec<String>> {
        self.backend.keys().await
    }

    /// Backend usage metric: entry count in-memory, server memory usage in
    /// bytes on redis.
    pub async fn usage_metric(&self) -> Result<u64> {
        self.backend.approximate_size().await
    }

    /// Number of cached entries.
    pub async fn count(&self) -> Result<u64> {
        self.backend.count().await
    }

    /// Family tag of the selected backend.
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }
}
