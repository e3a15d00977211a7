//! Cache-serve counter.
//!
//! One counter for the whole process: every [`StatsCounter`] constructed
//! anywhere is a handle to the same underlying count. The proxy front end
//! bumps it each time a cached entry is served in place of a live upstream
//! error, and the observability surface reads it back.

use std::sync::atomic::{AtomicU64, Ordering};

/// The process-wide count of fallback-serve events.
static CACHE_SERVES: AtomicU64 = AtomicU64::new(0);

/// Handle to the shared serve counter.
///
/// Constructing a `StatsCounter` never resets anything; the first handle in
/// the process observes zero, every later handle observes whatever the
/// earlier ones counted. There is no decrement and no reset.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatsCounter;

impl StatsCounter {
    pub fn new() -> Self {
        Self
    }

    /// Records one cache-serve event. Atomic: concurrent calls are each
    /// observed exactly once.
    pub fn count(&self) {
        CACHE_SERVES.fetch_add(1, Ordering::Relaxed);
    }

    /// Current value of the shared counter.
    pub fn value(&self) -> u64 {
        CACHE_SERVES.load(Ordering::Relaxed)
    }
}
