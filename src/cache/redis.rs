//! Redis cache backend.
//!
//! Delegates storage to a networked redis instance, shared by every process
//! pointed at the same store. Entries are serialized to JSON on the way in
//! and deserialized on the way out; expiry is redis-native (`PSETEX`, with
//! millisecond precision).
//!
//! Every round trip runs under the configured deadline. A timeout, a refused
//! connection or an authentication failure all surface as
//! `BackendUnavailable` — never as `NotFound`, because an outage and a miss
//! call for different fallbacks in the proxy.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tracing::warn;

use super::backend::CacheBackend;
use crate::config::RedisConfig;
use crate::response::CachedResponse;
use crate::{Error, Result};

/// Expiry for `PSETEX`, in milliseconds. Redis rejects a zero expiry, so
/// durations below one millisecond are floored to 1 rather than turning
/// every write into an error.
fn expiry_millis(ttl: Duration) -> u64 {
    (ttl.as_millis() as u64).max(1)
}

/// Networked backend over a redis connection.
///
/// The connection manager multiplexes one connection across concurrent
/// callers and reconnects on failure; per-key write atomicity is the
/// server's, the backend adds no locking of its own.
pub struct RedisBackend {
    conn: ConnectionManager,
    timeout: Duration,
}

impl std::fmt::Debug for RedisBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisBackend")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl RedisBackend {
    /// Connects to the store described by `config`.
    ///
    /// Connection establishment itself runs under the configured deadline,
    /// so a wedged store fails construction instead of hanging startup.
    pub async fn connect(config: &RedisConfig) -> Result<Self> {
        let client = redis::Client::open(config.url())?;
        let conn = tokio::time::timeout(config.timeout, client.get_connection_manager())
            .await
            .map_err(|_| Error::unavailable("timed out connecting to redis"))??;
        Ok(Self {
            conn,
            timeout: config.timeout,
        })
    }

    /// Runs one redis operation under the backend deadline.
    async fn with_deadline<T, F>(&self, op: F) -> Result<T>
    where
        F: Future<Output = redis::RedisResult<T>>,
    {
        match tokio::time::timeout(self.timeout, op).await {
            Ok(result) => result.map_err(Error::from),
            Err(_) => {
                warn!(timeout = ?self.timeout, "redis operation exceeded deadline");
                Err(Error::unavailable(format!(
                    "redis operation exceeded {:?} deadline",
                    self.timeout
                )))
            }
        }
    }
}

#[async_trait]
impl CacheBackend for RedisBackend {
    async fn get(&self, key: &str) -> Result<CachedResponse> {
        let mut conn = self.conn.clone();
        let data = self
            .with_deadline(conn.get::<_, Option<Vec<u8>>>(key))
            .await?;
        match data {
            // A present-but-corrupt payload is a Decode error, not a miss.
            Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
            None => Err(Error::not_found(key)),
        }
    }

    async fn set(&self, key: &str, entry: &CachedResponse, ttl: Option<Duration>) -> Result<()> {
        let data = serde_json::to_vec(entry)?;
        let mut conn = self.conn.clone();
        match ttl {
            Some(ttl) => {
                self.with_deadline(conn.pset_ex::<_, _, ()>(key, data, expiry_millis(ttl)))
                    .await
            }
            None => self.with_deadline(conn.set::<_, _, ()>(key, data)).await,
        }
    }

    async fn contains(&self, key: &str) -> Result<bool> {
        let mut conn = self.conn.clone();
        self.with_deadline(conn.exists::<_, bool>(key)).await
    }

    async fn keys(&self) -> Result<Vec<String>> {
        // Cursor SCAN, never KEYS: the store is shared with other callers
        // and must not be blocked by a full keyspace walk.
        let mut conn = self.conn.clone();
        let scan = async move {
            let mut keys = Vec::new();
            let mut iter = conn.scan::<String>().await?;
            while let Some(key) = iter.next_item().await {
                keys.push(key);
            }
            Ok(keys)
        };
        self.with_deadline(scan).await
    }

    async fn approximate_size(&self) -> Result<u64> {
        // The server's own memory usage in bytes, not an entry count.
        let mut conn = self.conn.clone();
        let info = self
            .with_deadline(redis::cmd("INFO").arg("memory").query_async::<_, String>(&mut conn))
            .await?;
        info.lines()
            .find_map(|line| line.strip_prefix("used_memory:"))
            .and_then(|value| value.trim().parse().ok())
            .ok_or_else(|| Error::unavailable("used_memory missing from INFO reply"))
    }

    async fn count(&self) -> Result<u64> {
        let mut conn = self.conn.clone();
        self.with_deadline(redis::cmd("DBSIZE").query_async::<_, u64>(&mut conn))
            .await
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}
