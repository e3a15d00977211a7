//! Cache backend contract.

use std::time::Duration;

use async_trait::async_trait;

use crate::response::CachedResponse;
use crate::Result;

/// Uniform key/value contract over the storage variants.
///
/// The implementations form a closed set: [`MemoryBackend`] for the
/// process-local store and [`RedisBackend`] for the shared networked store.
/// Callers observe the same semantics through either, with one documented
/// exception on `approximate_size`.
///
/// [`MemoryBackend`]: super::MemoryBackend
/// [`RedisBackend`]: super::RedisBackend
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Fetches the entry stored under `key`.
    ///
    /// Fails with `NotFound` when the key is absent and with
    /// `BackendUnavailable` when the store cannot be reached. The two are
    /// never conflated: a miss and an outage call for different fallbacks.
    async fn get(&self, key: &str) -> Result<CachedResponse>;

    /// Stores `entry` under `key`, unconditionally replacing any previous
    /// entry. The TTL is honored natively by the redis backend and ignored
    /// by the in-memory backend.
    async fn set(&self, key: &str, entry: &CachedResponse, ttl: Option<Duration>) -> Result<()>;

    /// Whether `key` currently has an entry. Absence is `Ok(false)`, never
    /// an error.
    async fn contains(&self, key: &str) -> Result<bool>;

    /// Snapshot of the stored keys. Order is not guaranteed.
    async fn keys(&self) -> Result<Vec<String>>;

    /// Usage metric for observability. The in-memory backend reports its
    /// entry count; the redis backend reports the server's own memory usage
    /// in bytes. The two are not comparable across backend families.
    async fn approximate_size(&self) -> Result<u64>;

    /// Number of keys currently stored.
    async fn count(&self) -> Result<u64>;

    /// Backend family tag, for logs.
    fn name(&self) -> &'static str;
}
