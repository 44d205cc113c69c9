//! # LRU (Least Recently Used) Cache with expiry
//!
//! Bounded cache that evicts the least recently used key and lazily expires
//! entries older than a cache-wide TTL.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                        LruCache<K, V>                                │
//!   │                                                                      │
//!   │   capacity: usize      ttl: Duration      (both fixed, > 0)          │
//!   │                                                                      │
//!   │   Mutex<LruState>                                                    │
//!   │   ┌────────────────────────────────────┐                             │
//!   │   │ map: FxHashMap<K, ExpiringEntry>   │                             │
//!   │   │ ages: AgeList<K>                   │                             │
//!   │   │                                    │                             │
//!   │   │   oldest                 youngest  │                             │
//!   │   │   [k1] ◄──► [k2] ◄──► [k3]         │                             │
//!   │   │     ▲                              │                             │
//!   │   │     └── evicted when full          │                             │
//!   │   └────────────────────────────────────┘                             │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! | Operation       | Effect                                                 |
//! |-----------------|--------------------------------------------------------|
//! | `get` hit       | make youngest, clone value                             |
//! | `get` expired   | drop from map and age list, return `None`              |
//! | `set` resident  | replace value and deadline, make youngest              |
//! | `set` new, full | evict oldest, then insert youngest                     |
//! | `purge_expired` | drop every expired entry                               |
//!
//! Expired entries that are never read stay resident. They count toward
//! `len` and toward capacity until they are read, purged or evicted.

use std::hash::Hash;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::builder::CachePolicy;
use crate::ds::AgeList;
use crate::entry::ExpiringEntry;
use crate::error::{ConfigError, InvariantError, Result};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::CacheMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::CacheMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{CoreMetricsRecorder, MetricsSnapshotProvider};
use crate::traits::Cache;

#[derive(Debug)]
struct LruState<K, V> {
    map: FxHashMap<K, ExpiringEntry<V>>,
    ages: AgeList<K>,
    #[cfg(feature = "metrics")]
    metrics: CacheMetrics,
}

impl<K, V> LruState<K, V>
where
    K: Eq + Hash + Clone,
{
    fn unlink(&mut self, key: &K) -> Option<ExpiringEntry<V>> {
        let entry = self.map.remove(key)?;
        self.ages.remove(key);
        Some(entry)
    }

    fn evict_oldest(&mut self) -> bool {
        let Some(key) = self.ages.pop_oldest() else {
            return false;
        };
        self.map.remove(&key);
        #[cfg(feature = "metrics")]
        self.metrics.record_evicted_entry();
        true
    }
}

/// Thread-safe LRU cache with a fixed time-to-live.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use inmem_cache::policy::lru::LruCache;
/// use inmem_cache::traits::Cache;
///
/// let cache = LruCache::new(2, Duration::from_secs(60)).unwrap();
/// cache.set(1, "one").unwrap();
/// cache.set(2, "two").unwrap();
/// cache.get(&1);
///
/// cache.set(3, "three").unwrap(); // 2 is now the oldest
/// assert_eq!(cache.get(&2), None);
/// assert_eq!(cache.get(&1), Some("one"));
/// ```
#[derive(Debug)]
pub struct LruCache<K, V> {
    capacity: usize,
    ttl: Duration,
    state: Mutex<LruState<K, V>>,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `capacity` keys, each living `ttl`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::IllegalCapacity`] if `capacity` is 0, otherwise
    /// [`ConfigError::IllegalTtl`] if `ttl` is zero.
    pub fn new(capacity: usize, ttl: Duration) -> std::result::Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::IllegalCapacity);
        }
        if ttl.is_zero() {
            return Err(ConfigError::IllegalTtl);
        }
        Ok(Self {
            capacity,
            ttl,
            state: Mutex::new(LruState {
                map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
                ages: AgeList::with_capacity(capacity),
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
        let mut guard = self.state.lock();
        let state = &mut *guard;

        let expired: Vec<K> = state
            .ages
            .iter()
            .filter(|key| state.map.get(*key).is_some_and(|e| e.is_expired(now)))
            .cloned()
            .collect();
        for key in &expired {
            state.unlink(key);
            #[cfg(feature = "metrics")]
            state.metrics.record_expired_entry();
        }
        if !expired.is_empty() {
            debug!(purged = expired.len(), "lru purged expired entries");
        }
        expired.len()
    }

    /// Verifies that the key map and the age list hold the same keys.
    pub fn check_invariants(&self) -> std::result::Result<(), InvariantError> {
        let state = self.state.lock();
        if state.map.len() != state.ages.len() {
            return Err(InvariantError::new(format!(
                "map holds {} keys but age list holds {}",
                state.map.len(),
                state.ages.len()
            )));
        }
        if state.map.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "{} keys resident with capacity {}",
                state.map.len(),
                self.capacity
            )));
        }
        if let Some(missing) = state.ages.iter().position(|key| !state.map.contains_key(key)) {
            return Err(InvariantError::new(format!(
                "age list position {missing} has no map entry"
            )));
        }
        Ok(())
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LruCache<K, V> {
    pub fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        let state = self.state.lock();
        state.metrics.snapshot(state.map.len(), Some(self.capacity))
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<CacheMetricsSnapshot> for LruCache<K, V> {
    fn snapshot(&self) -> CacheMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V> Cache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone + Send,
    V: Clone + Send,
{
    fn get(&self, key: &K) -> Option<V> {
        let now = Instant::now();
        let mut guard = self.state.lock();
        let state = &mut *guard;

        let expired = match state.map.get(key) {
            Some(entry) => entry.is_expired(now),
            None => {
                #[cfg(feature = "metrics")]
                state.metrics.record_get_miss();
                trace!("lru miss");
                return None;
            },
        };

        if expired {
            state.unlink(key);
            #[cfg(feature = "metrics")]
            {
                state.metrics.record_expired_entry();
                state.metrics.record_get_miss();
            }
            debug!(ttl = ?self.ttl, "lru entry expired on read");
            return None;
        }

        state.ages.make_youngest(key);
        #[cfg(feature = "metrics")]
        state.metrics.record_get_hit();
        trace!("lru hit");
        state.map.get(key).map(|entry| entry.value.clone())
    }

    fn set(&self, key: K, value: V) -> Result<()> {
        let entry = ExpiringEntry::new(value, self.ttl, Instant::now());
        let mut state = self.state.lock();

        if let Some(slot) = state.map.get_mut(&key) {
            *slot = entry;
            state.ages.make_youngest(&key);
            #[cfg(feature = "metrics")]
            state.metrics.record_insert_update();
            return Ok(());
        }

        if state.map.len() >= self.capacity && state.evict_oldest() {
            debug!(capacity = self.capacity, "lru evicted least recently used entry");
        }

        state.map.insert(key.clone(), entry);
        state.ages.add(key);
        #[cfg(feature = "metrics")]
        state.metrics.record_insert_new();
        Ok(())
    }

    fn remove(&self, key: &K) -> Option<V> {
        let now = Instant::now();
        let mut state = self.state.lock();
        let entry = state.unlink(key)?;
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
        Some(self.capacity)
    }

    fn clear(&self) {
        let mut state = self.state.lock();
        state.map.clear();
        state.ages.clear();
        #[cfg(feature = "metrics")]
        state.metrics.record_clear();
    }

    fn policy(&self) -> CachePolicy {
        CachePolicy::Lru
    }
}
