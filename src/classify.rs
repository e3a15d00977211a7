//! Upstream error classification.
//!
//! Pure, total decision functions the proxy front end calls after every
//! upstream round trip: is this response the upstream's rate limiter talking,
//! and should a previously cached entry be served in its place?
//!
//! The decision is deliberately conservative. A 403 alone is not rate
//! limiting: the upstream returns 403 for ordinary permission failures too,
//! and serving stale data for those would mask a real error. Only the
//! status/phrase combination counts.

use crate::response::CachedResponse;

/// Body phrase the upstream emits when its abuse detection throttles a caller.
const RATE_LIMIT_PHRASE: &str = "You have triggered an abuse detection mechanism.";

/// Status the upstream uses for abuse/rate-limit rejections.
const RATE_LIMIT_STATUS: u16 = 403;

/// Reason tags attached by the proxy as an observability header on served
/// cached responses. Stable literals, not translatable messages.
pub const REASON_RATE_LIMITED: &str = "RATE_LIMITED";
pub const REASON_API_ERROR: &str = "API_ERROR";

/// Outcome of [`should_serve_from_cache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServeDecision {
    /// Serve the cached entry instead of propagating the live response.
    pub serve: bool,
    /// `"RATE_LIMITED"`, `"API_ERROR"`, or `""` for pass-through.
    pub reason: &'static str,
}

impl ServeDecision {
    const PASS_THROUGH: Self = Self {
        serve: false,
        reason: "",
    };

    fn serve(reason: &'static str) -> Self {
        Self {
            serve: true,
            reason,
        }
    }
}

/// True when the response signals the upstream's abuse/rate-limit mechanism.
pub fn is_rate_limit_error(response: &CachedResponse) -> bool {
    response.status == RATE_LIMIT_STATUS && response.text.contains(RATE_LIMIT_PHRASE)
}

/// Decides whether a cached entry should be substituted for this response.
///
/// The rate-limit check runs first and is authoritative; a server error that
/// somehow also matched the rate-limit rule would be reported as
/// `RATE_LIMITED`. Server-side failures cover the whole 5xx class.
pub fn should_serve_from_cache(response: &CachedResponse) -> ServeDecision {
    if is_rate_limit_error(response) {
        return ServeDecision::serve(REASON_RATE_LIMITED);
    }
    if (500..=599).contains(&response.status) {
        return ServeDecision::serve(REASON_API_ERROR);
    }
    ServeDecision::PASS_THROUGH
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn response(status: u16, text: &str) -> CachedResponse {
        CachedResponse::new(b"bar".to_vec(), HashMap::new(), status, text)
    }

    #[test]
    fn rate_limit_needs_status_and_phrase() {
        let limited = response(403, RATE_LIMIT_PHRASE);
        assert!(is_rate_limit_error(&limited));

        let plain_forbidden = response(403, "it's fine.");
        assert!(!is_rate_limit_error(&plain_forbidden));

        let wrong_status = response(500, RATE_LIMIT_PHRASE);
        assert!(!is_rate_limit_error(&wrong_status));
    }

    #[test]
    fn rate_limited_response_is_served_from_cache() {
        let decision = should_serve_from_cache(&response(403, RATE_LIMIT_PHRASE));
        assert!(decision.serve);
        assert_eq!(decision.reason, "RATE_LIMITED");
    }

    #[test]
    fn server_errors_are_served_from_cache() {
        for status in [500, 502, 503, 599] {
            let decision = should_serve_from_cache(&response(status, "it's fine."));
            assert!(decision.serve, "status {status} should trigger fallback");
            assert_eq!(decision.reason, "API_ERROR");
        }
    }

    #[test]
    fn successful_response_passes_through() {
        let decision = should_serve_from_cache(&response(200, "it's fine."));
        assert!(!decision.serve);
        assert_eq!(decision.reason, "");
    }

    #[test]
    fn client_errors_pass_through() {
        // 404s and plain 403s propagate to the client untouched.
        for status in [400, 403, 404, 422] {
            let decision = should_serve_from_cache(&response(status, "it's fine."));
            assert!(!decision.serve, "status {status} must not trigger fallback");
        }
    }
}
