//! In-memory cache backend.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;

use super::backend::CacheBackend;
use crate::response::CachedResponse;
use crate::{Error, Result};

/// The process-wide store. Every `MemoryBackend` in the process reads and
/// writes this one map, so a second `RequestCache` constructed with the
/// in-memory configuration is a handle to the same data, not a fresh cache.
static STORE: Lazy<RwLock<HashMap<String, CachedResponse>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Process-local backend over a shared in-memory map.
///
/// Operations never block beyond lock acquisition and never report
/// `BackendUnavailable`. TTL hints are ignored; entries live until
/// overwritten or the process exits.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryBackend;

impl MemoryBackend {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CacheBackend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<CachedResponse> {
        STORE
            .read()
            .unwrap()
            .get(key)
            .cloned()
            .ok_or_else(|| Error::not_found(key))
    }

    async fn set(&self, key: &str, entry: &CachedResponse, _ttl: Option<Duration>) -> Result<()> {
        STORE
            .write()
            .unwrap()
            .insert(key.to_string(), entry.clone());
        Ok(())
    }

    async fn contains(&self, key: &str) -> Result<bool> {
        Ok(STORE.read().unwrap().contains_key(key))
    }

    async fn keys(&self) -> Result<Vec<String>> {
        Ok(STORE.read().unwrap().keys().cloned().collect())
    }

    async fn approximate_size(&self) -> Result<u64> {
        Ok(STORE.read().unwrap().len() as u64)
    }

    async fn count(&self) -> Result<u64> {
        Ok(STORE.read().unwrap().len() as u64)
    }

    fn name(&self) -> &'static str {
        "in-memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn entry(body: &str, status: u16) -> CachedResponse {
        CachedResponse::new(body.as_bytes().to_vec(), HashMap::new(), status, body)
    }

    // The store is process-wide, so tests use keys no other test touches.
    #[tokio::test]
    async fn round_trip_and_overwrite() {
        let backend = MemoryBackend::new();
        let key = "memory-test:round-trip";

        backend.set(key, &entry("first", 200), None).await.unwrap();
        assert_eq!(backend.get(key).await.unwrap().text, "first");

        backend.set(key, &entry("second", 304), None).await.unwrap();
        let stored = backend.get(key).await.unwrap();
        assert_eq!(stored.text, "second");
        assert_eq!(stored.status, 304);
    }

    #[tokio::test]
    async fn missing_key_is_not_found() {
        let backend = MemoryBackend::new();
        let err = backend.get("memory-test:never-written").await.unwrap_err();
        assert!(err.is_miss());
        assert!(!backend
            .contains("memory-test:never-written")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn instances_share_the_store() {
        let writer = MemoryBackend::new();
        writer
            .set("memory-test:shared", &entry("bar", 200), None)
            .await
            .unwrap();

        let reader = MemoryBackend::new();
        let stored = reader.get("memory-test:shared").await.unwrap();
        assert_eq!(stored.body, b"bar");
        assert_eq!(stored.status, 200);
    }

    #[tokio::test]
    async fn keys_and_count_observe_written_entries() {
        let backend = MemoryBackend::new();
        backend
            .set("memory-test:keys", &entry("bar", 200), None)
            .await
            .unwrap();

        let keys = backend.keys().await.unwrap();
        assert!(keys.iter().any(|k| k == "memory-test:keys"));
        assert!(backend.count().await.unwrap() >= 1);
        assert_eq!(
            backend.approximate_size().await.unwrap(),
            backend.count().await.unwrap()
        );
    }
}
