#![no_main]

use std::collections::HashMap;

use inmem_cache::ds::FrequencyIndex;
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary operation sequences on FrequencyIndex
//
// The index does not own use-counts, so a side map plays the role of the
// cache entries and supplies the count for touch/remove.
fuzz_target!(|data: &[u8]| {
    let mut index: FrequencyIndex<u8> = FrequencyIndex::new();
    let mut counts: HashMap<u8, u64> = HashMap::new();

    for pair in data.chunks_exact(2) {
        let op = pair[0] % 5;
        let key = pair[1] % 32;

        match op {
            0 => {
                if !counts.contains_key(&key) {
                    assert!(index.add(key));
                    counts.insert(key, 0);
                }
            },
            1 => {
                if let Some(count) = counts.get_mut(&key) {
                    assert!(index.touch(&key, *count));
                    *count += 1;
                } else {
                    assert!(!index.touch(&key, 0));
                }
            },
            2 => {
                if let Some(count) = counts.remove(&key) {
                    assert!(index.remove(&key, count));
                }
            },
            3 => {
                // Evict
                if let Some(victim) = index.least_frequent() {
                    assert!(index.bucket_len(index.min_count()) > 0);
                    let count = counts.remove(&victim).expect("victim is tracked");
                    let min = counts.values().copied().min().unwrap_or(count);
                    assert!(count <= min, "victim count {count} above minimum {min}");
                    assert!(index.remove(&victim, count));
                } else {
                    assert!(counts.is_empty());
                }
            },
            4 => {
                index.clear();
                counts.clear();
            },
            _ => unreachable!(),
        }

        index.debug_validate_invariants();
        assert_eq!(index.len(), counts.len());
    }
});
