//! Unbounded cache whose entries expire a fixed duration after their last write.
//!
//! There is no eviction: entries leave only when they are read after their
//! deadline, purged with [`TtlCache::purge_expired`], removed or cleared.
//! The optional capacity given at construction only pre-sizes the map.
//!
//! | Operation       | Effect                                     |
//! |-----------------|--------------------------------------------|
//! | `get` live      | clone value                                |
//! | `get` expired   | drop entry, return `None`                  |
//! | `set`           | overwrite value, deadline = now + ttl      |

use std::hash::Hash;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::builder::CachePolicy;
use crate::entry::ExpiringEntry;
use crate::error::{ConfigError, Result};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::CacheMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::CacheMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{CoreMetricsRecorder, MetricsSnapshotProvider};
use crate::traits::Cache;

#[derive(Debug)]
struct TtlState<K, V> {
    map: FxHashMap<K, ExpiringEntry<V>>,
    #[cfg(feature = "metrics")]
    metrics: CacheMetrics,
}

/// Thread-safe expiring cache without a size bound.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use inmem_cache::policy::ttl::TtlCache;
/// use inmem_cache::traits::Cache;
///
/// let cache = TtlCache::new(Duration::from_secs(30)).unwrap();
/// cache.set("session", 42).unwrap();
/// assert_eq!(cache.get(&"session"), Some(42));
/// assert_eq!(cache.capacity(), None);
/// ```
#[derive(Debug)]
pub struct TtlCache<K, V> {
    ttl: Duration,
    state: Mutex<TtlState<K, V>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
{
    /// # Errors
    ///
    /// [`ConfigError::IllegalTtl`] if `ttl` is zero.
    pub fn new(ttl: Duration) -> std::result::Result<Self, ConfigError> {
        Self::with_capacity(ttl, 0)
    }

    /// Like [`new`](Self::new), pre-allocating room for `hint` entries.
    pub fn with_capacity(ttl: Duration, hint: usize) -> std::result::Result<Self, ConfigError> {
        if ttl.is_zero() {
            return Err(ConfigError::IllegalTtl);
        }
        Ok(Self {
            ttl,
            state: Mutex::new(TtlState {
                map: FxHashMap::with_capacity_and_hasher(hint, Default::default()),
                #[cfg(feature = "metrics")]
                metrics: CacheMetrics::default(),
            }),
        })
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Drops every expired entry and returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut state = self.state.lock();
        let before = state.map.len();
        state.map.retain(|_, entry| !entry.is_expired(now));
        let purged = before - state.map.len();
        #[cfg(feature = "metrics")]
        {
            state.metrics.expired_entries += purged as u64;
        }
        if purged > 0 {
            debug!(purged, "ttl purged expired entries");
        }
        purged
    }
}

#[cfg(feature = "metrics")]
impl<K, V> TtlCache<K, V> {
    pub fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        let state = self.state.lock();
        state.metrics.snapshot(state.map.len(), None)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<CacheMetricsSnapshot> for TtlCache<K, V> {
    fn snapshot(&self) -> CacheMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V> Cache<K, V> for TtlCache<K, V>
where
    K: Eq + Hash + Send,
    V: Clone + Send,
{
    fn get(&self, key: &K) -> Option<V> {
        let now = Instant::now();
        let mut guard = self.state.lock();
        let state = &mut *guard;

        let Some(entry) = state.map.get(key) else {
            #[cfg(feature = "metrics")]
            state.metrics.record_get_miss();
            trace!("ttl miss");
            return None;
        };

        if entry.is_expired(now) {
            state.map.remove(key);
            #[cfg(feature = "metrics")]
            {
                state.metrics.record_expired_entry();
                state.metrics.record_get_miss();
            }
            debug!(ttl = ?self.ttl, "ttl entry expired on read");
            return None;
        }

        let value = entry.value.clone();
        #[cfg(feature = "metrics")]
        state.metrics.record_get_hit();
        trace!("ttl hit");
        Some(value)
    }

    fn set(&self, key: K, value: V) -> Result<()> {
        let entry = ExpiringEntry::new(value, self.ttl, Instant::now());
        let mut state = self.state.lock();
        #[cfg_attr(not(feature = "metrics"), allow(unused_variables))]
        let replaced = state.map.insert(key, entry).is_some();
        #[cfg(feature = "metrics")]
        {
            if replaced {
                state.metrics.record_insert_update();
            } else {
                state.metrics.record_insert_new();
            }
        }
        Ok(())
    }

    fn remove(&self, key: &K) -> Option<V> {
        let now = Instant::now();
        let mut state = self.state.lock();
        let entry = state.map.remove(key)?;
        if entry.is_expired(now) {
            #[cfg(feature = "metrics")]
            state.metrics.record_expired_entry();
            return None;
        }
        Some(entry.value)
    }

    fn len(&self) -> usize {
        self.state.lock().map.len()
    }

    fn capacity(&self) -> Option<usize> {
        None
    }

    fn clear(&self) {
        let mut state = self.state.lock();
        state.map.clear();
        #[cfg(feature = "metrics")]
        state.metrics.record_clear();
    }

    fn policy(&self) -> CachePolicy {
        CachePolicy::Ttl
    }
}
