//! # Cache Trait
//!
//! One generic contract satisfied by every eviction engine, so callers can
//! hold any policy behind `&dyn Cache<K, V>` or a generic parameter.
//!
//! ## Architecture
//!
//! ```text
//!                     ┌─────────────────────────────────────────┐
//!                     │              Cache<K, V>                │
//!                     │                                         │
//!                     │  get(&, &K) → Option<V>                 │
//!                     │  set(&, K, V) → Result<()>              │
//!                     │  remove(&, &K) → Option<V>              │
//!                     │  len / is_empty / capacity / clear      │
//!                     │  policy(&) → CachePolicy                │
//!                     └──────────────────┬──────────────────────┘
//!                                        │
//!          ┌─────────────────────────────┼─────────────────────────────┐
//!          ▼                             ▼                             ▼
//!   ┌──────────────┐             ┌──────────────┐             ┌──────────────┐
//!   │ LfuCache     │             │ LruCache     │             │ TtlCache     │
//!   │ capacity     │             │ capacity+ttl │             │ ttl          │
//!   └──────────────┘             └──────────────┘             └──────────────┘
//!                                        ▲
//!                          InMemCache (facade enum) also implements Cache
//! ```
//!
//! ## Policy Comparison
//!
//! | Policy | Bounded by | Evicts                      | Expires on read |
//! |--------|------------|-----------------------------|-----------------|
//! | LFU    | capacity   | lowest use-count, oldest    | no              |
//! | LRU    | capacity   | least recently used         | yes             |
//! | TTL    | nothing    | never                       | yes             |
//!
//! ## Thread Safety
//!
//! Every method takes `&self`. Implementations hold one mutex per instance for
//! the full duration of each call, including `get`, which updates recency or
//! frequency bookkeeping. Share an instance across threads with `Arc`.
//!
//! ## TTL convention
//!
//! The time-to-live is fixed when the cache is built; `set` never takes a TTL.

use crate::builder::CachePolicy;
use crate::error::Result;

/// Generic key-value cache contract.
///
/// # Example
///
/// ```
/// use inmem_cache::policy::lfu::LfuCache;
/// use inmem_cache::traits::Cache;
///
/// fn warm<C: Cache<u64, String>>(cache: &C, data: &[(u64, &str)]) {
///     for (key, value) in data {
///         cache.set(*key, value.to_string()).unwrap();
///     }
/// }
///
/// let cache = LfuCache::new(10).unwrap();
/// warm(&cache, &[(1, "one"), (2, "two")]);
/// assert_eq!(cache.get(&1), Some("one".to_string()));
/// assert_eq!(cache.len(), 2);
/// ```
pub trait Cache<K, V>: Send + Sync {
    /// Returns a clone of the value for `key`, or `None` if it is absent or
    /// expired.
    ///
    /// A hit updates the policy's bookkeeping (use-count or recency).
    fn get(&self, key: &K) -> Option<V>;

    /// Inserts or replaces `key`.
    ///
    /// Bounded caches evict before inserting a new key when full. Once a cache
    /// is constructed this never fails; the `Result` keeps the contract open
    /// for implementations that can.
    fn set(&self, key: K, value: V) -> Result<()>;

    /// Removes `key` and returns its value if it was resident and unexpired.
    fn remove(&self, key: &K) -> Option<V>;

    /// Number of resident entries, including expired ones not yet read.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum resident entries, or `None` for unbounded caches.
    fn capacity(&self) -> Option<usize>;

    /// Drops every entry.
    fn clear(&self);

    /// The eviction policy this instance implements.
    fn policy(&self) -> CachePolicy;
}

impl<K, V, C> Cache<K, V> for Box<C>
where
    C: Cache<K, V> + ?Sized,
{
    fn get(&self, key: &K) -> Option<V> {
        (**self).get(key)
    }

    fn set(&self, key: K, value: V) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &K) -> Option<V> {
        (**self).remove(key)
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn capacity(&self) -> Option<usize> {
        (**self).capacity()
    }

    fn clear(&self) {
        (**self).clear()
    }

    fn policy(&self) -> CachePolicy {
        (**self).policy()
    }
}
