//! # LFU (Least Frequently Used) Cache
//!
//! Bounded cache that evicts the key with the fewest read hits. Ties go to the
//! key that entered its frequency bucket first.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                        LfuCache<K, V>                                │
//!   │                                                                      │
//!   │   Mutex<LfuState>                                                    │
//!   │   ┌──────────────────────────────┐   ┌────────────────────────────┐  │
//!   │   │ map: FxHashMap<K, LfuEntry>  │   │ freq: FrequencyIndex<K>    │  │
//!   │   │                              │   │                            │  │
//!   │   │  page_1 → { v, use_count:3 } │   │  0: [page_3]               │  │
//!   │   │  page_2 → { v, use_count:1 } │   │  1: [page_2]               │  │
//!   │   │  page_3 → { v, use_count:0 } │   │  3: [page_1]               │  │
//!   │   └──────────────────────────────┘   │  min_count = 0             │  │
//!   │                                      └────────────────────────────┘  │
//!   │   capacity: usize (fixed, > 0)                                       │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operation Flow
//!
//! ```text
//!   get(key)   hit  → freq.touch(key, use_count); use_count += 1; clone value
//!              miss → None
//!
//!   set(key, v) resident        → replace value, use_count unchanged
//!               new, not full   → map insert + freq.add (count 0)
//!               new, full       → evict freq.least_frequent(), then insert
//! ```
//!
//! ## Performance
//!
//! | Operation          | Time |
//! |--------------------|------|
//! | `get`              | O(1) |
//! | `set` (no evict)   | O(1) |
//! | `set` (evict)      | O(1) |
//! | `remove`           | O(1) |
//!
//! A new key always enters at count 0, so it is the next victim until it is
//! read at least once.

use std::hash::Hash;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::builder::CachePolicy;
use crate::ds::FrequencyIndex;
use crate::entry::LfuEntry;
use crate::error::{ConfigError, InvariantError, Result};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::CacheMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::CacheMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{CoreMetricsRecorder, MetricsSnapshotProvider};
use crate::traits::Cache;

#[derive(Debug)]
struct LfuState<K, V> {
    map: FxHashMap<K, LfuEntry<V>>,
    freq: FrequencyIndex<K>,
    #[cfg(feature = "metrics")]
    metrics: CacheMetrics,
}

impl<K, V> LfuState<K, V>
where
    K: Eq + Hash + Clone,
{
    fn evict_least_frequent(&mut self) -> Option<LfuEntry<V>> {
        let key = self.freq.least_frequent()?;
        let entry = self.map.remove(&key)?;
        self.freq.remove(&key, entry.use_count);
        #[cfg(feature = "metrics")]
        self.metrics.record_evicted_entry();
        Some(entry)
    }
}

/// Thread-safe LFU cache.
///
/// # Example
///
/// ```
/// use inmem_cache::policy::lfu::LfuCache;
/// use inmem_cache::traits::Cache;
///
/// let cache = LfuCache::new(2).unwrap();
/// cache.set("a", 1).unwrap();
/// cache.set("b", 2).unwrap();
/// cache.get(&"a");
///
/// cache.set("c", 3).unwrap(); // evicts "b": never read
/// assert_eq!(cache.get(&"b"), None);
/// assert_eq!(cache.get(&"a"), Some(1));
/// ```
#[derive(Debug)]
pub struct LfuCache<K, V> {
    capacity: usize,
    state: Mutex<LfuState<K, V>>,
}

impl<K, V> LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `capacity` keys.
    ///
    /// # Errors
    ///
    /// [`ConfigError::IllegalCapacity`] if `capacity` is 0.
    pub fn new(capacity: usize) -> std::result::Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::IllegalCapacity);
        }
        Ok(Self {
            capacity,
            state: Mutex::new(LfuState {
                map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
                freq: FrequencyIndex::new(),
                #[cfg(feature = "metrics")]
                metrics: CacheMetrics::default(),
            }),
        })
    }

    /// Read-hit count of `key` without counting this call as a read.
    pub fn use_count(&self, key: &K) -> Option<u64> {
        self.state.lock().map.get(key).map(|entry| entry.use_count)
    }

    /// Verifies that the key map and the frequency index agree.
    pub fn check_invariants(&self) -> std::result::Result<(), InvariantError> {
        let state = self.state.lock();
        if state.map.len() != state.freq.len() {
            return Err(InvariantError::new(format!(
                "map holds {} keys but frequency index holds {}",
                state.map.len(),
                state.freq.len()
            )));
        }
        if state.map.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "{} keys resident with capacity {}",
                state.map.len(),
                self.capacity
            )));
        }
        for (key, entry) in &state.map {
            if state.freq.inserted_at(key, entry.use_count).is_none() {
                return Err(InvariantError::new(format!(
                    "key missing from frequency bucket {}",
                    entry.use_count
                )));
            }
        }
        Ok(())
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LfuCache<K, V> {
    pub fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        let state = self.state.lock();
        state.metrics.snapshot(state.map.len(), Some(self.capacity))
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<CacheMetricsSnapshot> for LfuCache<K, V> {
    fn snapshot(&self) -> CacheMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V> Cache<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone + Send,
    V: Clone + Send,
{
    fn get(&self, key: &K) -> Option<V> {
        let mut guard = self.state.lock();
        let state = &mut *guard;
        match state.map.get_mut(key) {
            Some(entry) => {
                state.freq.touch(key, entry.use_count);
                entry.use_count = entry.use_count.saturating_add(1);
                #[cfg(feature = "metrics")]
                state.metrics.record_get_hit();
                trace!(use_count = entry.use_count, "lfu hit");
                Some(entry.value.clone())
            },
            None => {
                #[cfg(feature = "metrics")]
                state.metrics.record_get_miss();
                trace!("lfu miss");
                None
            },
        }
    }

    fn set(&self, key: K, value: V) -> Result<()> {
        let mut state = self.state.lock();

        if let Some(entry) = state.map.get_mut(&key) {
            entry.value = value;
            #[cfg(feature = "metrics")]
            state.metrics.record_insert_update();
            return Ok(());
        }

        if state.map.len() >= self.capacity {
            if let Some(evicted) = state.evict_least_frequent() {
                debug!(
                    capacity = self.capacity,
                    use_count = evicted.use_count,
                    "lfu evicted least frequently used entry"
                );
            }
        }

        state.map.insert(key.clone(), LfuEntry::new(value));
        state.freq.add(key);
        #[cfg(feature = "metrics")]
        state.metrics.record_insert_new();
        Ok(())
    }

    fn remove(&self, key: &K) -> Option<V> {
        let mut state = self.state.lock();
        let entry = state.map.remove(key)?;
        state.freq.remove(key, entry.use_count);
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
        state.freq.clear();
        #[cfg(feature = "metrics")]
        state.metrics.record_clear();
    }

    fn policy(&self) -> CachePolicy {
        CachePolicy::Lfu
    }
}
