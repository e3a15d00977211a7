//! # mirror-cache
//!
//! Decision-and-storage core for a transparent caching mirror placed in
//! front of a rate-limited REST API (a GitHub-like upstream).
//!
//! ## Overview
//!
//! A read-heavy API consumer behind a strict per-caller rate limit loses
//! availability every time the upstream throttles or fails. This crate is
//! the part of the mirror that fixes that: it stores successful upstream
//! responses, decides when a live error should be answered with a previously
//! cached response instead, and makes that substitution observable.
//!
//! The HTTP front end that accepts client connections, forwards requests
//! upstream and manages tokens is an external collaborator; it drives this
//! core through [`RequestCache`], [`classify`] and [`StatsCounter`].
//!
//! ## Core Flow
//!
//! On every upstream round trip the proxy:
//! 1. calls [`classify::should_serve_from_cache`] with the captured response,
//! 2. on a cache-eligible success, writes the entry into [`RequestCache`],
//! 3. on fallback, reads the cached entry back, attaches the decision's
//!    reason tag as a response header, and bumps [`StatsCounter`].
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`cache`] | Backend contract, in-memory and redis stores, facade |
//! | [`classify`] | Rate-limit detection and serve-from-cache decision |
//! | [`config`] | Backend selection and redis connection settings |
//! | [`pagination`] | `per_page` extraction for the proxy's fetch strategy |
//! | [`response`] | Captured upstream response value type |
//! | [`stats`] | Process-wide cache-serve counter |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mirror_cache::{CacheConfig, CachedResponse, RequestCache};
//! use std::collections::HashMap;
//!
//! #[tokio::main]
//! async fn main() -> mirror_cache::Result<()> {
//!     let cache = RequestCache::new(&CacheConfig::in_memory()).await?;
//!
//!     let entry = CachedResponse::new(b"[]".to_vec(), HashMap::new(), 200, "[]");
//!     cache.write("GET:/repos/acme/widgets/issues", &entry).await?;
//!
//!     let cached = cache.read("GET:/repos/acme/widgets/issues").await?;
//!     assert_eq!(cached.status, 200);
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod classify;
pub mod config;
pub mod pagination;
pub mod response;
pub mod stats;

mod error;

pub use cache::RequestCache;
pub use classify::{is_rate_limit_error, should_serve_from_cache, ServeDecision};
pub use config::{CacheConfig, CacheType, RedisConfig};
pub use error::Error;
pub use pagination::elements_per_page;
pub use response::CachedResponse;
pub use stats::StatsCounter;

/// Result type alias for the library.
pub type Result<T> = std::result::Result<T, Error>;
