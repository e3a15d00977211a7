//! Cache storage layer.
//!
//! A uniform key/value surface over two storage variants, selected once at
//! construction by [`CacheConfig`](crate::config::CacheConfig):
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`RequestCache`] | Facade the proxy front end talks to |
//! | [`CacheBackend`] | Contract shared by the storage variants |
//! | [`MemoryBackend`] | Process-wide in-memory store |
//! | [`RedisBackend`] | Shared networked store with native TTL |
//!
//! The facade stores whole [`CachedResponse`] entries under opaque request
//! keys supplied by the caller; it derives no keys and applies no eviction
//! policy of its own.
//!
//! [`CachedResponse`]: crate::response::CachedResponse

mod backend;
mod facade;
mod memory;
mod redis;

pub use self::backend::CacheBackend;
pub use self::facade::RequestCache;
pub use self::memory::MemoryBackend;
pub use self::redis::RedisBackend;
