#![no_main]

use inmem_cache::ds::AgeList;
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary operation sequences on AgeList against a Vec model
fuzz_target!(|data: &[u8]| {
    let mut ages: AgeList<u8> = AgeList::new();
    let mut model: Vec<u8> = Vec::new();

    for pair in data.chunks_exact(2) {
        let op = pair[0] % 5;
        let key = pair[1] % 32;

        match op {
            0 => {
                ages.add(key);
                model.retain(|k| *k != key);
                model.push(key);
            },
            1 => {
                let present = model.contains(&key);
                assert_eq!(ages.make_youngest(&key), present);
                if present {
                    model.retain(|k| *k != key);
                    model.push(key);
                }
            },
            2 => {
                assert_eq!(ages.remove(&key), model.contains(&key));
                model.retain(|k| *k != key);
            },
            3 => {
                let expected = (!model.is_empty()).then(|| model.remove(0));
                assert_eq!(ages.pop_oldest(), expected);
            },
            4 => {
                ages.clear();
                model.clear();
            },
            _ => unreachable!(),
        }

        ages.debug_validate_invariants();
        assert_eq!(ages.oldest(), model.first());
        assert!(ages.iter().eq(model.iter()));
    }
});
