//! Cache configuration.
//!
//! The backend family is chosen exactly once, at [`RequestCache`]
//! construction, by [`CacheType`]. Configuration can be assembled with the
//! builder methods or read from the environment (`CACHE_TYPE`,
//! `REDIS_ADDRESS`, `REDIS_PORT`, `REDIS_TOKEN`, `REDIS_SSL`, `REDIS_TTL`).
//!
//! [`RequestCache`]: crate::cache::RequestCache

use std::env;
use std::time::Duration;

use crate::{Error, Result};

/// Backend family selector. A closed set: backend-specific behavior is
/// matched exhaustively wherever it surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheType {
    /// Process-local in-memory store.
    InMemory,
    /// Networked redis store, shared across processes.
    Redis,
}

impl CacheType {
    /// Parses the `CACHE_TYPE` configuration value.
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "in-memory" => Ok(Self::InMemory),
            "redis" => Ok(Self::Redis),
            other => Err(Error::configuration(format!(
                "unknown CACHE_TYPE {other:?}, expected \"in-memory\" or \"redis\""
            ))),
        }
    }
}

/// Connection settings for the redis backend.
#[derive(Debug, Clone)]
pub struct RedisConfig {
    /// Host name or IP of the redis instance.
    pub address: String,
    pub port: u16,
    /// Access credential, sent as the AUTH password when present.
    pub token: Option<String>,
    /// Encrypt the connection in transit (`rediss://`).
    pub ssl: bool,
    /// Per-entry expiry applied on every write. `None` stores forever.
    pub ttl: Option<Duration>,
    /// Deadline for a single round trip. Operations that exceed it fail
    /// with `BackendUnavailable` instead of blocking the caller.
    pub timeout: Duration,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            address: "localhost".to_string(),
            port: 6379,
            token: None,
            ssl: false,
            ttl: None,
            timeout: Duration::from_secs(5),
        }
    }
}

impl RedisConfig {
    /// Connection URL in the form the redis client expects.
    pub fn url(&self) -> String {
        let scheme = if self.ssl { "rediss" } else { "redis" };
        match &self.token {
            Some(token) => format!("{scheme}://:{token}@{}:{}/", self.address, self.port),
            None => format!("{scheme}://{}:{}/", self.address, self.port),
        }
    }
}

/// Full cache configuration, consumed at `RequestCache` construction.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub cache_type: CacheType,
    pub redis: RedisConfig,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            cache_type: CacheType::InMemory,
            redis: RedisConfig::default(),
        }
    }
}

impl CacheConfig {
    pub fn new(cache_type: CacheType) -> Self {
        Self {
            cache_type,
            ..Self::default()
        }
    }

    pub fn in_memory() -> Self {
        Self::new(CacheType::InMemory)
    }

    pub fn redis(redis: RedisConfig) -> Self {
        Self {
            cache_type: CacheType::Redis,
            redis,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.redis.ttl = Some(ttl);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.redis.timeout = timeout;
        self
    }

    /// Reads the configuration from the process environment.
    ///
    /// Missing variables fall back to defaults; a present but malformed
    /// `CACHE_TYPE` is a configuration error rather than a silent default.
    pub fn from_env() -> Result<Self> {
        let cache_type = match env::var("CACHE_TYPE") {
            Ok(value) => CacheType::parse(&value)?,
            Err(_) => CacheType::InMemory,
        };

        let redis = RedisConfig {
            address: env::var("REDIS_ADDRESS").unwrap_or_else(|_| "localhost".to_string()),
            port: env::var("REDIS_PORT")
                .ok()
                .and_then(|s| s.parse::<u16>().ok())
                .unwrap_or(6379),
            token: env::var("REDIS_TOKEN").ok(),
            ssl: env::var("REDIS_SSL")
                .map(|s| s.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            ttl: env::var("REDIS_TTL")
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
                .map(Duration::from_secs),
            timeout: Duration::from_secs(5),
        };

        Ok(Self { cache_type, redis })
    }
}
