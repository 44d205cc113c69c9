pub use crate::builder::{
    CacheBuilder, CacheConfig, CacheOption, CachePolicy, InMemCache, new_cache, with_capacity,
    with_ttl,
};
pub use crate::ds::{AgeList, FrequencyIndex};
pub use crate::error::{CacheError, ConfigError};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::CacheMetricsSnapshot;
pub use crate::policy::lfu::LfuCache;
pub use crate::policy::lru::LruCache;
pub use crate::policy::ttl::TtlCache;
pub use crate::traits::Cache;
