//! Unified error type for the mirror cache core.
//!
//! The taxonomy deliberately keeps a cache miss (`NotFound`) apart from a
//! backend outage (`BackendUnavailable`): the proxy front end reacts to the
//! two differently, so they must never collapse into one another.

use thiserror::Error;

/// Errors surfaced by cache backends, the request-cache facade and response
/// capture.
#[derive(Debug, Error)]
pub enum Error {
    /// The key is not present in the backend. An expected, recoverable miss.
    #[error("cache key not found: {key}")]
    NotFound { key: String },

    /// The remote backend could not complete the operation (connectivity,
    /// timeout, authentication). Never silently converted into `NotFound`.
    #[error("cache backend unavailable: {reason}")]
    BackendUnavailable { reason: String },

    /// A cache entry could not be serialized for storage or deserialized on
    /// the way back out. Distinct from `NotFound`: on the read side the key
    /// exists, its payload is corrupt.
    #[error("cache entry (de)serialization failed: {0}")]
    Decode(#[from] serde_json::Error),

    /// Invalid cache configuration (unknown `CACHE_TYPE`, bad redis settings).
    #[error("cache configuration error: {message}")]
    Configuration { message: String },

    /// Capturing an upstream response body failed.
    #[error("upstream response error: {0}")]
    Upstream(#[from] reqwest::Error),
}

impl Error {
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::BackendUnavailable {
            reason: reason.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// True when the error represents a plain miss rather than a failure.
    pub fn is_miss(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<redis::RedisError> for Error {
    fn from(err: redis::RedisError) -> Self {
        Self::BackendUnavailable {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn miss_and_outage_are_distinguishable() {
        assert!(Error::not_found("foo").is_miss());
        assert!(!Error::unavailable("connection refused").is_miss());
    }

    #[test]
    fn serde_failures_map_to_decode_in_either_direction() {
        let json_err = serde_json::from_str::<std::collections::HashMap<String, u32>>("not json")
            .unwrap_err();
        let err = Error::from(json_err);
        assert!(matches!(err, Error::Decode(_)));
        assert!(!err.is_miss());
        assert!(err
            .to_string()
            .starts_with("cache entry (de)serialization failed"));
    }

    #[test]
    fn display_names_the_key() {
        let err = Error::not_found("GET:/repos/foo");
        assert_eq!(err.to_string(), "cache key not found: GET:/repos/foo");
    }
}
