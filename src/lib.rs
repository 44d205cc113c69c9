//! inmem-cache: thread-safe in-memory key-value caches with LFU, LRU and TTL
//! policies behind one [`Cache`](traits::Cache) trait.
//!
//! | Module       | Contents                                               |
//! |--------------|--------------------------------------------------------|
//! | [`builder`]  | policy tags, options, `new_cache`, `InMemCache` facade |
//! | [`policy`]   | the three engines                                      |
//! | [`ds`]       | frequency index, age list and their building blocks    |
//! | [`entry`]    | stored values with use-count or deadline               |
//! | [`error`]    | configuration and facade errors                        |
//! | `metrics`    | per-engine counters (feature `metrics`)                |

pub mod builder;
pub mod ds;
pub mod entry;
pub mod error;
#[cfg(feature = "metrics")]
pub mod metrics;
pub mod policy;
pub mod prelude;
pub mod traits;

pub use crate::builder::{
    CacheBuilder, CacheConfig, CacheOption, CachePolicy, InMemCache, new_cache, with_capacity,
    with_ttl,
};
pub use crate::error::{CacheError, ConfigError, InvariantError, Result};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::CacheMetricsSnapshot;
pub use crate::policy::lfu::LfuCache;
pub use crate::policy::lru::LruCache;
pub use crate::policy::ttl::TtlCache;
pub use crate::traits::Cache;
