//! Facade for building a cache by policy name.
//!
//! A policy tag (`"lfu"`, `"lru"` or `"ttl"`) plus a list of options selects
//! and configures one of the engines in [`crate::policy`]. The result is an
//! [`InMemCache`], which implements [`Cache`] by dispatching to the engine.
//!
//! ## Required options
//!
//! | Policy | `capacity`              | `ttl`    |
//! |--------|-------------------------|----------|
//! | `lfu`  | required                | ignored  |
//! | `lru`  | required                | required |
//! | `ttl`  | pre-allocation hint     | required |
//!
//! A missing required option is reported like an illegal one: no capacity is
//! [`ConfigError::IllegalCapacity`], no TTL is [`ConfigError::IllegalTtl`].
//! Capacity is validated first.
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//! use inmem_cache::builder::{CacheBuilder, CachePolicy, new_cache, with_capacity, with_ttl};
//! use inmem_cache::traits::Cache;
//!
//! let cache = new_cache::<u64, String>("lru", [with_capacity(100), with_ttl(Duration::from_secs(5))])
//!     .unwrap();
//! cache.set(1, "hello".to_string()).unwrap();
//! assert_eq!(cache.get(&1), Some("hello".to_string()));
//! assert_eq!(cache.policy(), CachePolicy::Lru);
//!
//! // Fluent equivalent
//! let cache = CacheBuilder::new(CachePolicy::Lfu).capacity(100).build::<u64, String>().unwrap();
//! assert_eq!(cache.capacity(), Some(100));
//! ```

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::{CacheError, ConfigError, InvariantError, Result};
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::CacheMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::MetricsSnapshotProvider;
use crate::policy::lfu::LfuCache;
use crate::policy::lru::LruCache;
use crate::policy::ttl::TtlCache;
use crate::traits::Cache;

/// Available cache eviction policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CachePolicy {
    /// Least Frequently Used eviction, bounded by capacity.
    Lfu,
    /// Least Recently Used eviction with a fixed TTL, bounded by capacity.
    Lru,
    /// Expiry only, unbounded.
    Ttl,
}

impl CachePolicy {
    pub const ALL: [CachePolicy; 3] = [CachePolicy::Lfu, CachePolicy::Lru, CachePolicy::Ttl];

    /// The literal tag accepted by [`new_cache`].
    pub fn tag(self) -> &'static str {
        match self {
            CachePolicy::Lfu => "lfu",
            CachePolicy::Lru => "lru",
            CachePolicy::Ttl => "ttl",
        }
    }
}

impl fmt::Display for CachePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for CachePolicy {
    type Err = CacheError;

    /// Tags are case-sensitive.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "lfu" => Ok(CachePolicy::Lfu),
            "lru" => Ok(CachePolicy::Lru),
            "ttl" => Ok(CachePolicy::Ttl),
            other => Err(CacheError::UnknownPolicy(other.to_string())),
        }
    }
}

/// One construction option. Later options override earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOption {
    Capacity(usize),
    Ttl(Duration),
}

pub fn with_capacity(capacity: usize) -> CacheOption {
    CacheOption::Capacity(capacity)
}

pub fn with_ttl(ttl: Duration) -> CacheOption {
    CacheOption::Ttl(ttl)
}

/// Folded construction options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CacheConfig {
    pub capacity: Option<usize>,
    pub ttl: Option<Duration>,
}

impl CacheConfig {
    pub fn from_options<I>(options: I) -> Self
    where
        I: IntoIterator<Item = CacheOption>,
    {
        let mut config = Self::default();
        for option in options {
            config.apply(option);
        }
        config
    }

    pub fn apply(&mut self, option: CacheOption) {
        match option {
            CacheOption::Capacity(capacity) => self.capacity = Some(capacity),
            CacheOption::Ttl(ttl) => self.ttl = Some(ttl),
        }
    }
}

/// Builder for creating cache instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheBuilder {
    policy: CachePolicy,
    config: CacheConfig,
}

impl CacheBuilder {
    pub fn new(policy: CachePolicy) -> Self {
        Self::from_config(policy, CacheConfig::default())
    }

    pub fn from_config(policy: CachePolicy, config: CacheConfig) -> Self {
        Self { policy, config }
    }

    pub fn capacity(mut self, capacity: usize) -> Self {
        self.config.capacity = Some(capacity);
        self
    }

    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.config.ttl = Some(ttl);
        self
    }

    pub fn option(mut self, option: CacheOption) -> Self {
        self.config.apply(option);
        self
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Build a cache with the configured policy.
    ///
    /// # Errors
    ///
    /// [`CacheError::Build`] carrying the policy and the engine's
    /// [`ConfigError`] when a required option is missing or illegal.
    pub fn build<K, V>(self) -> Result<InMemCache<K, V>>
    where
        K: Eq + Hash + Clone,
    {
        let capacity = self.config.capacity.unwrap_or(0);
        let ttl = self.config.ttl.unwrap_or(Duration::ZERO);

        let inner = match self.policy {
            CachePolicy::Lfu => LfuCache::new(capacity).map(CacheInner::Lfu),
            CachePolicy::Lru => LruCache::new(capacity, ttl).map(CacheInner::Lru),
            CachePolicy::Ttl => TtlCache::with_capacity(ttl, capacity).map(CacheInner::Ttl),
        }
        .map_err(|source: ConfigError| CacheError::Build {
            policy: self.policy,
            source,
        })?;

        debug!(
            policy = %self.policy,
            capacity = ?self.config.capacity,
            ttl = ?self.config.ttl,
            "built cache"
        );
        Ok(InMemCache { inner })
    }
}

/// Creates a cache from a policy tag and a list of options.
///
/// # Errors
///
/// - [`CacheError::UnknownPolicy`] if `tag` is not `lfu`, `lru` or `ttl`.
/// - [`CacheError::Build`] if the selected engine rejects the options.
pub fn new_cache<K, V>(
    tag: &str,
    options: impl IntoIterator<Item = CacheOption>,
) -> Result<InMemCache<K, V>>
where
    K: Eq + Hash + Clone,
{
    let policy = tag.parse::<CachePolicy>().inspect_err(|_| {
        warn!(tag, "unknown cache type");
    })?;
    CacheBuilder::from_config(policy, CacheConfig::from_options(options)).build()
}

/// Unified cache wrapper that provides a consistent API regardless of policy.
#[derive(Debug)]
pub struct InMemCache<K, V> {
    inner: CacheInner<K, V>,
}

#[derive(Debug)]
enum CacheInner<K, V> {
    Lfu(LfuCache<K, V>),
    Lru(LruCache<K, V>),
    Ttl(TtlCache<K, V>),
}

impl<K, V> InMemCache<K, V>
where
    K: Eq + Hash + Clone + Send + 'static,
    V: Clone + Send + 'static,
{
    /// Type-erases the cache.
    pub fn into_boxed(self) -> Box<dyn Cache<K, V>> {
        match self.inner {
            CacheInner::Lfu(lfu) => Box::new(lfu),
            CacheInner::Lru(lru) => Box::new(lru),
            CacheInner::Ttl(ttl) => Box::new(ttl),
        }
    }
}

impl<K, V> InMemCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// The fixed time-to-live, or `None` for LFU.
    pub fn ttl(&self) -> Option<Duration> {
        match &self.inner {
            CacheInner::Lfu(_) => None,
            CacheInner::Lru(lru) => Some(lru.ttl()),
            CacheInner::Ttl(ttl) => Some(ttl.ttl()),
        }
    }

    /// Drops expired entries; always 0 for LFU.
    pub fn purge_expired(&self) -> usize {
        match &self.inner {
            CacheInner::Lfu(_) => 0,
            CacheInner::Lru(lru) => lru.purge_expired(),
            CacheInner::Ttl(ttl) => ttl.purge_expired(),
        }
    }

    pub fn check_invariants(&self) -> std::result::Result<(), InvariantError> {
        match &self.inner {
            CacheInner::Lfu(lfu) => lfu.check_invariants(),
            CacheInner::Lru(lru) => lru.check_invariants(),
            CacheInner::Ttl(_) => Ok(()),
        }
    }

    pub fn as_lfu(&self) -> Option<&LfuCache<K, V>> {
        match &self.inner {
            CacheInner::Lfu(lfu) => Some(lfu),
            _ => None,
        }
    }

    pub fn as_lru(&self) -> Option<&LruCache<K, V>> {
        match &self.inner {
            CacheInner::Lru(lru) => Some(lru),
            _ => None,
        }
    }

    pub fn as_ttl(&self) -> Option<&TtlCache<K, V>> {
        match &self.inner {
            CacheInner::Ttl(ttl) => Some(ttl),
            _ => None,
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> InMemCache<K, V> {
    pub fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        match &self.inner {
            CacheInner::Lfu(lfu) => lfu.metrics_snapshot(),
            CacheInner::Lru(lru) => lru.metrics_snapshot(),
            CacheInner::Ttl(ttl) => ttl.metrics_snapshot(),
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<CacheMetricsSnapshot> for InMemCache<K, V> {
    fn snapshot(&self) -> CacheMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V> Cache<K, V> for InMemCache<K, V>
where
    K: Eq + Hash + Clone + Send,
    V: Clone + Send,
{
    fn get(&self, key: &K) -> Option<V> {
        match &self.inner {
            CacheInner::Lfu(lfu) => lfu.get(key),
            CacheInner::Lru(lru) => lru.get(key),
            CacheInner::Ttl(ttl) => ttl.get(key),
        }
    }

    fn set(&self, key: K, value: V) -> Result<()> {
        match &self.inner {
            CacheInner::Lfu(lfu) => lfu.set(key, value),
            CacheInner::Lru(lru) => lru.set(key, value),
            CacheInner::Ttl(ttl) => ttl.set(key, value),
        }
    }

    fn remove(&self, key: &K) -> Option<V> {
        match &self.inner {
            CacheInner::Lfu(lfu) => lfu.remove(key),
            CacheInner::Lru(lru) => lru.remove(key),
            CacheInner::Ttl(ttl) => ttl.remove(key),
        }
    }

    fn len(&self) -> usize {
        match &self.inner {
            CacheInner::Lfu(lfu) => lfu.len(),
            CacheInner::Lru(lru) => lru.len(),
            CacheInner::Ttl(ttl) => ttl.len(),
        }
    }

    fn capacity(&self) -> Option<usize> {
        match &self.inner {
            CacheInner::Lfu(lfu) => lfu.capacity(),
            CacheInner::Lru(lru) => lru.capacity(),
            CacheInner::Ttl(ttl) => ttl.capacity(),
        }
    }

    fn clear(&self) {
        match &self.inner {
            CacheInner::Lfu(lfu) => lfu.clear(),
            CacheInner::Lru(lru) => lru.clear(),
            CacheInner::Ttl(ttl) => ttl.clear(),
        }
    }

    fn policy(&self) -> CachePolicy {
        match &self.inner {
            CacheInner::Lfu(_) => CachePolicy::Lfu,
            CacheInner::Lru(_) => CachePolicy::Lru,
            CacheInner::Ttl(_) => CachePolicy::Ttl,
        }
    }
}
