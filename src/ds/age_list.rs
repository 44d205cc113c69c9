//! Recency order for LRU eviction, oldest first.
//!
//! An [`IntrusiveList`] holds the keys in access order and an index maps each
//! key to its node, so every operation is O(1):
//!
//! ```text
//!   index: FxHashMap<K, SlotId>
//!
//!   oldest                                   youngest
//!   front ─► [k1] ◄──► [k2] ◄──► [k3] ◄── back
//!              ▲
//!              └── eviction candidate
//! ```

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::intrusive_list::{self, IntrusiveList};
use crate::ds::slot_arena::SlotId;

/// Keys ordered from least to most recently used.
///
/// # Example
///
/// ```
/// use inmem_cache::ds::AgeList;
///
/// let mut ages = AgeList::new();
/// ages.add("a");
/// ages.add("b");
/// ages.make_youngest(&"a");
///
/// assert_eq!(ages.oldest(), Some(&"b"));
/// ```
#[derive(Debug)]
pub struct AgeList<K> {
    order: IntrusiveList<K>,
    index: FxHashMap<K, SlotId>,
    clock: u64,
}

impl<K> AgeList<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            order: IntrusiveList::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            clock: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Appends `key` as the youngest. A key already present is moved instead.
    pub fn add(&mut self, key: K) {
        if self.make_youngest(&key) {
            return;
        }
        let stamp = self.tick();
        let id = self.order.push_back(key.clone(), stamp);
        self.index.insert(key, id);
    }

    /// The least recently used key, if any.
    pub fn oldest(&self) -> Option<&K> {
        self.order.front()
    }

    /// Moves `key` to the youngest position; returns `false` if absent.
    pub fn make_youngest(&mut self, key: &K) -> bool {
        let Some(&id) = self.index.get(key) else {
            return false;
        };
        let stamp = self.tick();
        self.order.move_to_back(id, stamp)
    }

    /// Removes `key`, preserving the relative order of the others.
    pub fn remove(&mut self, key: &K) -> bool {
        match self.index.remove(key) {
            Some(id) => self.order.remove(id).is_some(),
            None => false,
        }
    }

    /// Removes and returns the oldest key.
    pub fn pop_oldest(&mut self) -> Option<K> {
        let key = self.order.pop_front()?;
        self.index.remove(&key);
        Some(key)
    }

    /// Iterates keys from oldest to youngest.
    pub fn iter(&self) -> intrusive_list::Iter<'_, K> {
        self.order.iter()
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.index.clear();
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.order.debug_validate_invariants();
        assert_eq!(self.order.len(), self.index.len());
        for (key, &id) in &self.index {
            assert!(self.order.get(id) == Some(key), "index points at another key");
        }
    }
}

impl<K> Default for AgeList<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(ages: &AgeList<&'static str>) -> Vec<&'static str> {
        ages.iter().copied().collect()
    }

    // Key type without a Debug impl.
    #[derive(Clone, PartialEq, Eq, Hash)]
    struct PageId(u32);

    #[test]
    fn age_list_validates_keys_without_debug() {
        let mut ages = AgeList::new();
        ages.add(PageId(1));
        ages.add(PageId(2));
        ages.make_youngest(&PageId(1));
        ages.debug_validate_invariants();
        assert!(ages.oldest() == Some(&PageId(2)));
    }

    #[test]
    fn age_list_add_appends_youngest() {
        let mut ages = AgeList::new();
        ages.add("a");
        ages.add("b");
        ages.add("c");
        assert_eq!(keys(&ages), vec!["a", "b", "c"]);
        assert_eq!(ages.oldest(), Some(&"a"));
        ages.debug_validate_invariants();
    }

    #[test]
    fn age_list_add_existing_moves_instead_of_duplicating() {
        let mut ages = AgeList::new();
        ages.add("a");
        ages.add("b");
        ages.add("a");
        assert_eq!(ages.len(), 2);
        assert_eq!(keys(&ages), vec!["b", "a"]);
    }

    #[test]
    fn age_list_make_youngest() {
        let mut ages = AgeList::new();
        ages.add("a");
        ages.add("b");
        ages.add("c");

        assert!(ages.make_youngest(&"a"));
        assert_eq!(keys(&ages), vec!["b", "c", "a"]);
        assert!(ages.make_youngest(&"a"));
        assert_eq!(keys(&ages), vec!["b", "c", "a"]);
        assert!(!ages.make_youngest(&"missing"));
        ages.debug_validate_invariants();
    }

    #[test]
    fn age_list_remove_preserves_order() {
        let mut ages = AgeList::new();
        for key in ["a", "b", "c", "d"] {
            ages.add(key);
        }
        assert!(ages.remove(&"b"));
        assert!(!ages.remove(&"b"));
        assert_eq!(keys(&ages), vec!["a", "c", "d"]);
        assert!(!ages.contains(&"b"));
        ages.debug_validate_invariants();
    }

    #[test]
    fn age_list_oldest_on_empty() {
        let mut ages: AgeList<u32> = AgeList::new();
        assert_eq!(ages.oldest(), None);
        assert_eq!(ages.pop_oldest(), None);
        ages.add(1);
        assert_eq!(ages.pop_oldest(), Some(1));
        assert!(ages.is_empty());
    }

    #[test]
    fn age_list_clear() {
        let mut ages = AgeList::with_capacity(4);
        ages.add(1u32);
        ages.add(2);
        ages.clear();
        assert!(ages.is_empty());
        assert!(!ages.contains(&1));
        ages.debug_validate_invariants();
    }
}
