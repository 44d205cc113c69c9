//! Auxiliary data structures behind the eviction policies.
//!
//! - [`FrequencyIndex`]: use-count buckets for LFU
//! - [`AgeList`]: recency order for LRU
//! - [`IntrusiveList`] / [`SlotArena`]: the O(1) linked storage both build on

pub mod age_list;
pub mod frequency_index;
pub mod intrusive_list;
pub mod slot_arena;

pub use age_list::AgeList;
pub use frequency_index::FrequencyIndex;
pub use intrusive_list::IntrusiveList;
pub use slot_arena::{SlotArena, SlotId};
