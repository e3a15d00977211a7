//! Captured upstream responses.
//!
//! A [`CachedResponse`] is the single value shape the cache stores: the raw
//! body bytes, the header map, the status code and the decoded text of one
//! upstream HTTP response. The decoded text is kept alongside the bytes
//! because the serve-from-cache classifier inspects text, not payload.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::Result;

/// One upstream HTTP response, frozen at capture time.
///
/// Entries are immutable after construction; an overwrite of the same cache
/// key replaces the whole entry, never a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedResponse {
    /// Raw response payload.
    pub body: Vec<u8>,
    /// Response headers. Insertion order is irrelevant.
    pub headers: HashMap<String, String>,
    /// HTTP status of the originally captured response.
    pub status: u16,
    /// Decoded textual body.
    pub text: String,
}

impl CachedResponse {
    pub fn new(
        body: impl Into<Vec<u8>>,
        headers: HashMap<String, String>,
        status: u16,
        text: impl Into<String>,
    ) -> Self {
        Self {
            body: body.into(),
            headers,
            status,
            text: text.into(),
        }
    }

    /// Captures a live upstream response into a cacheable entry.
    ///
    /// Consumes the response: the body can only be read once. Headers that
    /// are not valid UTF-8 are skipped rather than failing the capture.
    pub async fn capture(response: reqwest::Response) -> Result<Self> {
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.bytes().await?.to_vec();
        let text = String::from_utf8_lossy(&body).into_owned();

        Ok(Self {
            body,
            headers,
            status,
            text,
        })
    }

    /// Header lookup, case-insensitive on the header name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
