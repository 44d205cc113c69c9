//! Frequency index for LFU eviction.
//!
//! Maps a use-count to the bucket of keys currently at that count. Each bucket
//! is an insertion-ordered set, so the key that entered the bucket first sits
//! at the front and is the LFU victim for that count. `min_count` points at
//! the lowest non-empty bucket.
//!
//! ## Architecture
//!
//! ```text
//!   buckets: FxHashMap<u64, Bucket<K>>          min_count = 0
//!                                                      │
//!   count=0: front ─► [b @7] ◄──► [d @9] ◄── back  ◄───┘
//!   count=1: front ─► [c @8] ◄── back
//!   count=3: front ─► [a @4] ◄──► [e @6] ◄── back
//!
//!   Bucket<K> = IntrusiveList<K> (order) + FxHashMap<K, SlotId> (lookup)
//!   @n        = logical insertion stamp, strictly increasing per index
//! ```
//!
//! ## Operations
//!
//! | Operation        | Time | Notes                                        |
//! |------------------|------|----------------------------------------------|
//! | `add`            | O(1) | bucket 0, `min_count = 0`                    |
//! | `touch`          | O(1) | bucket `n` → back of bucket `n + 1`          |
//! | `remove`         | O(1) | leaves `min_count` untouched                 |
//! | `least_frequent` | O(1) | front of `min_count`; O(buckets) when stale  |
//!
//! ## Lazy `min_count` correction
//!
//! `remove` never moves the cursor. When it empties the minimum bucket the
//! cursor is left pointing below every live bucket; `touch` and `add` keep
//! working because they only ever lower or advance it from a live bucket, and
//! `least_frequent` re-derives it from the remaining buckets before answering.
//! The LFU engine always follows an eviction with `add`, which resets the
//! cursor to 0, so on the eviction path the stale value is never observed.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::intrusive_list::IntrusiveList;
use crate::ds::slot_arena::SlotId;

#[derive(Debug)]
struct Bucket<K> {
    order: IntrusiveList<K>,
    slots: FxHashMap<K, SlotId>,
}

impl<K> Bucket<K>
where
    K: Eq + Hash + Clone,
{
    fn new() -> Self {
        Self {
            order: IntrusiveList::new(),
            slots: FxHashMap::default(),
        }
    }

    fn push_back(&mut self, key: K, stamp: u64) {
        let id = self.order.push_back(key.clone(), stamp);
        self.slots.insert(key, id);
    }

    fn take(&mut self, key: &K) -> Option<K> {
        let id = self.slots.remove(key)?;
        self.order.remove(id)
    }

    fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Use-count → insertion-ordered key set, with a cursor on the minimum count.
///
/// The index does not store each key's count; callers pass the count they
/// track alongside the value, exactly as [`LfuCache`](crate::policy::lfu::LfuCache)
/// does with its entries.
///
/// # Example
///
/// ```
/// use inmem_cache::ds::FrequencyIndex;
///
/// let mut index = FrequencyIndex::new();
/// index.add("a");
/// index.add("b");
/// index.touch(&"a", 0); // "a" now at count 1
///
/// assert_eq!(index.min_count(), 0);
/// assert_eq!(index.least_frequent(), Some("b"));
/// ```
#[derive(Debug)]
pub struct FrequencyIndex<K> {
    buckets: FxHashMap<u64, Bucket<K>>,
    min_count: u64,
    clock: u64,
    len: usize,
}

impl<K> FrequencyIndex<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            buckets: FxHashMap::default(),
            min_count: 0,
            clock: 0,
            len: 0,
        }
    }

    /// Number of keys tracked across all buckets.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current value of the minimum-count cursor (may be stale after `remove`).
    pub fn min_count(&self) -> u64 {
        self.min_count
    }

    /// Number of keys sitting in bucket `count`.
    pub fn bucket_len(&self, count: u64) -> usize {
        self.buckets.get(&count).map_or(0, |bucket| bucket.order.len())
    }

    /// Logical stamp at which `key` entered bucket `count`.
    pub fn inserted_at(&self, key: &K, count: u64) -> Option<u64> {
        let bucket = self.buckets.get(&count)?;
        let id = *bucket.slots.get(key)?;
        bucket.order.stamp(id)
    }

    /// Inserts a never-used key into bucket 0.
    ///
    /// Returns `false` if the key is already in bucket 0. The caller must not
    /// add a key that lives in any other bucket.
    pub fn add(&mut self, key: K) -> bool {
        if self
            .buckets
            .get(&0)
            .is_some_and(|bucket| bucket.slots.contains_key(&key))
        {
            return false;
        }
        self.push_into(0, key);
        self.len += 1;
        self.min_count = 0;
        true
    }

    /// Moves `key` from bucket `count` to the back of bucket `count + 1`.
    ///
    /// Returns `false` if the key is not in bucket `count`.
    pub fn touch(&mut self, key: &K, count: u64) -> bool {
        let Some(bucket) = self.buckets.get_mut(&count) else {
            return false;
        };
        let Some(owned) = bucket.take(key) else {
            return false;
        };
        let emptied = bucket.is_empty();
        if emptied {
            self.buckets.remove(&count);
        }

        let next = count.saturating_add(1);
        self.push_into(next, owned);
        if emptied && count == self.min_count {
            self.min_count = next;
        }
        true
    }

    /// Returns the eviction candidate: the oldest key in the minimum bucket.
    ///
    /// `None` only when the index is empty.
    pub fn least_frequent(&mut self) -> Option<K> {
        if self.is_empty() {
            return None;
        }
        if !self.buckets.contains_key(&self.min_count) {
            self.min_count = self.buckets.keys().copied().min()?;
        }
        self.buckets.get(&self.min_count)?.order.front().cloned()
    }

    /// Deletes `key` from bucket `count` without moving the cursor.
    pub fn remove(&mut self, key: &K, count: u64) -> bool {
        let Some(bucket) = self.buckets.get_mut(&count) else {
            return false;
        };
        if bucket.take(key).is_none() {
            return false;
        }
        if bucket.is_empty() {
            self.buckets.remove(&count);
        }
        self.len -= 1;
        true
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
        self.min_count = 0;
        self.len = 0;
    }

    fn push_into(&mut self, count: u64, key: K) {
        self.clock += 1;
        let stamp = self.clock;
        self.buckets
            .entry(count)
            .or_insert_with(Bucket::new)
            .push_back(key, stamp);
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        let mut seen = std::collections::HashSet::new();
        let mut total = 0usize;

        for (&count, bucket) in &self.buckets {
            assert!(!bucket.is_empty(), "empty bucket {count} retained");
            assert_eq!(bucket.order.len(), bucket.slots.len());
            bucket.order.debug_validate_invariants();
            for (key, &id) in &bucket.slots {
                assert!(bucket.order.get(id) == Some(key), "bucket slot points at another key");
                assert!(seen.insert(key.clone()), "key present in two buckets");
                assert!(bucket.order.stamp(id).unwrap_or(0) <= self.clock);
            }
            assert!(self.min_count <= count, "min_count above a live bucket");
            total += bucket.order.len();
        }

        assert_eq!(total, self.len);
        if self.is_empty() {
            assert!(self.buckets.is_empty());
        }
    }
}

impl<K> Default for FrequencyIndex<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
