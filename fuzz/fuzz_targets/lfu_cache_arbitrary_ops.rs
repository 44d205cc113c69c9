#![no_main]

use inmem_cache::policy::lfu::LfuCache;
use inmem_cache::traits::Cache;
use libfuzzer_sys::fuzz_target;

// Fuzz get/set/remove/clear on LfuCache with a capacity taken from the input
fuzz_target!(|data: &[u8]| {
    let Some((&first, ops)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(first % 16) + 1;
    let cache: LfuCache<u8, u8> = LfuCache::new(capacity).expect("capacity > 0");

    for pair in ops.chunks_exact(2) {
        let key = pair[1] % 48;
        match pair[0] % 4 {
            0 => cache.set(key, pair[0]).expect("set never fails"),
            1 => {
                if let Some(count_before) = cache.use_count(&key) {
                    assert!(cache.get(&key).is_some());
                    assert_eq!(cache.use_count(&key), Some(count_before + 1));
                } else {
                    assert_eq!(cache.get(&key), None);
                }
            },
            2 => {
                cache.remove(&key);
            },
            3 => cache.clear(),
            _ => unreachable!(),
        }

        assert!(cache.len() <= capacity);
        if let Err(err) = cache.check_invariants() {
            panic!("invariant violated: {err}");
        }
    }
});
