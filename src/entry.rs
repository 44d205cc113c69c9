//! Stored values plus their per-policy bookkeeping.

use std::time::{Duration, Instant};

/// LFU entry: the value and how many read hits it has seen.
///
/// The count starts at 0 and moves in lockstep with the key's bucket in the
/// [`FrequencyIndex`](crate::ds::FrequencyIndex).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LfuEntry<V> {
    pub value: V,
    pub use_count: u64,
}

impl<V> LfuEntry<V> {
    pub fn new(value: V) -> Self {
        Self {
            value,
            use_count: 0,
        }
    }
}

/// LRU/TTL entry: the value and the instant after which it is stale.
///
/// `expires_at == None` means the entry never expires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpiringEntry<V> {
    pub value: V,
    pub expires_at: Option<Instant>,
}

impl<V> ExpiringEntry<V> {
    /// Entry expiring `ttl` after `now`.
    pub fn new(value: V, ttl: Duration, now: Instant) -> Self {
        Self {
            value,
            expires_at: now.checked_add(ttl),
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now > at)
    }
}
