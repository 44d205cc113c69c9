//! Eviction engines.
//!
//! | Engine                   | Bound    | Evicts                            | Expiry |
//! |--------------------------|----------|-----------------------------------|--------|
//! | [`lfu::LfuCache`]        | capacity | fewest reads, earliest in bucket  | none   |
//! | [`lru::LruCache`]        | capacity | least recently used               | lazy   |
//! | [`ttl::TtlCache`]        | none     | never                             | lazy   |

pub mod lfu;
pub mod lru;
pub mod ttl;
