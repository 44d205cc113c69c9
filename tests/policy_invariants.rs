// ==============================================
// CROSS-POLICY INVARIANT TESTS (integration)
// ==============================================
//
// Behavior every engine must share, exercised through the public API and the
// `Cache` trait rather than engine internals.

use std::time::Duration;

use inmem_cache::builder::{CachePolicy, new_cache, with_capacity, with_ttl};
use inmem_cache::error::{CacheError, ConfigError};
use inmem_cache::policy::lfu::LfuCache;
use inmem_cache::policy::lru::LruCache;
use inmem_cache::policy::ttl::TtlCache;
use inmem_cache::traits::Cache;

const HOUR: Duration = Duration::from_secs(3600);

fn bounded_caches(capacity: usize) -> Vec<Box<dyn Cache<u32, u32>>> {
    vec![
        Box::new(LfuCache::new(capacity).unwrap()),
        Box::new(LruCache::new(capacity, HOUR).unwrap()),
    ]
}

// ==============================================
// Capacity
// ==============================================

#[test]
fn bounded_caches_never_exceed_capacity() {
    for cache in bounded_caches(5) {
        for i in 0..100 {
            cache.set(i, i).unwrap();
            assert!(
                cache.len() <= 5,
                "{} cache grew to {} entries",
                cache.policy(),
                cache.len()
            );
            if i % 3 == 0 {
                cache.get(&(i / 2));
            }
        }
        assert_eq!(cache.len(), 5);
    }
}

#[test]
fn ttl_cache_is_unbounded() {
    let cache: TtlCache<u32, u32> = TtlCache::with_capacity(HOUR, 4).unwrap();
    for i in 0..1000 {
        cache.set(i, i).unwrap();
    }
    assert_eq!(cache.len(), 1000);
}

#[test]
fn zero_capacity_is_rejected_everywhere_it_matters() {
    assert_eq!(LfuCache::<u32, u32>::new(0).unwrap_err(), ConfigError::IllegalCapacity);
    assert_eq!(
        LruCache::<u32, u32>::new(0, HOUR).unwrap_err(),
        ConfigError::IllegalCapacity
    );
    assert!(TtlCache::<u32, u32>::with_capacity(HOUR, 0).is_ok());
}

#[test]
fn zero_ttl_is_rejected() {
    assert_eq!(
        LruCache::<u32, u32>::new(4, Duration::ZERO).unwrap_err(),
        ConfigError::IllegalTtl
    );
    assert_eq!(
        TtlCache::<u32, u32>::new(Duration::ZERO).unwrap_err(),
        ConfigError::IllegalTtl
    );
}

// ==============================================
// LFU ordering
// ==============================================

#[test]
fn lfu_evicts_the_less_read_key() {
    let cache = LfuCache::new(2).unwrap();
    cache.set("a", 1).unwrap();
    cache.set("b", 2).unwrap();
    cache.get(&"a");
    cache.get(&"a");
    cache.get(&"a");
    cache.get(&"b");

    cache.set("c", 3).unwrap();

    assert_eq!(cache.get(&"b"), None);
    assert_eq!(cache.get(&"a"), Some(1));
    assert_eq!(cache.get(&"c"), Some(3));
}

#[test]
fn lfu_tie_goes_to_earliest_in_bucket() {
    let cache = LfuCache::new(2).unwrap();
    cache.set("x", 1).unwrap();
    cache.set("y", 2).unwrap();

    cache.set("z", 3).unwrap();

    assert_eq!(cache.get(&"x"), None);
    assert_eq!(cache.get(&"y"), Some(2));
    assert_eq!(cache.get(&"z"), Some(3));
}

#[test]
fn lfu_update_does_not_count_as_use() {
    let cache = LfuCache::new(2).unwrap();
    cache.set("a", 1).unwrap();
    cache.set("b", 2).unwrap();
    cache.get(&"b");
    for value in 10..20 {
        cache.set("a", value).unwrap();
    }

    cache.set("c", 3).unwrap();
    assert_eq!(cache.get(&"a"), None);
    assert_eq!(cache.get(&"b"), Some(2));
}

// ==============================================
// LRU ordering
// ==============================================

#[test]
fn lru_capacity_one_keeps_only_latest() {
    let cache = LruCache::new(1, HOUR).unwrap();
    cache.set("first", 1).unwrap();
    cache.set("second", 2).unwrap();
    assert_eq!(cache.get(&"first"), None);
    assert_eq!(cache.get(&"second"), Some(2));
}

#[test]
fn lru_read_protects_from_next_eviction() {
    let cache = LruCache::new(2, HOUR).unwrap();
    cache.set("a", 1).unwrap();
    cache.set("b", 2).unwrap();
    cache.get(&"a");

    cache.set("c", 3).unwrap();

    assert_eq!(cache.get(&"a"), Some(1));
    assert_eq!(cache.get(&"b"), None);
}

// ==============================================
// Shared contract
// ==============================================

#[test]
fn update_in_place_keeps_len() {
    for policy in CachePolicy::ALL {
        let cache = new_cache::<u32, u32>(policy.tag(), [with_capacity(4), with_ttl(HOUR)]).unwrap();
        cache.set(1, 1).unwrap();
        cache.set(1, 2).unwrap();
        assert_eq!(cache.len(), 1, "{policy}");
        assert_eq!(cache.get(&1), Some(2), "{policy}");
    }
}

#[test]
fn missing_key_is_none_not_error() {
    for policy in CachePolicy::ALL {
        let cache = new_cache::<u32, u32>(policy.tag(), [with_capacity(4), with_ttl(HOUR)]).unwrap();
        assert_eq!(cache.get(&42), None);
        assert_eq!(cache.remove(&42), None);
    }
}

#[test]
fn facade_errors_wrap_engine_errors() {
    let err = new_cache::<u32, u32>("lfu", [with_ttl(HOUR)]).unwrap_err();
    assert_eq!(
        err,
        CacheError::Build {
            policy: CachePolicy::Lfu,
            source: ConfigError::IllegalCapacity,
        }
    );
}

// ==============================================
// Metrics
// ==============================================

#[cfg(feature = "metrics")]
mod metrics_through_provider {
    use inmem_cache::metrics::snapshot::CacheMetricsSnapshot;
    use inmem_cache::metrics::traits::MetricsSnapshotProvider;

    use super::*;

    fn hits_and_misses<P>(provider: &P) -> (u64, u64)
    where
        P: MetricsSnapshotProvider<CacheMetricsSnapshot>,
    {
        let snapshot = provider.snapshot();
        (snapshot.get_hits, snapshot.get_misses)
    }

    #[test]
    fn every_engine_reports_through_the_provider_trait() {
        let lfu: LfuCache<u32, u32> = LfuCache::new(4).unwrap();
        let lru: LruCache<u32, u32> = LruCache::new(4, HOUR).unwrap();
        let ttl: TtlCache<u32, u32> = TtlCache::new(HOUR).unwrap();
        for cache in [&lfu as &dyn Cache<u32, u32>, &lru, &ttl] {
            cache.set(1, 1).unwrap();
            cache.get(&1);
            cache.get(&2);
        }

        assert_eq!(hits_and_misses(&lfu), (1, 1));
        assert_eq!(hits_and_misses(&lru), (1, 1));
        assert_eq!(hits_and_misses(&ttl), (1, 1));
    }

    #[test]
    fn facade_snapshot_matches_engine_snapshot() {
        let cache = new_cache::<u32, u32>("lru", [with_capacity(1), with_ttl(HOUR)]).unwrap();
        cache.set(1, 1).unwrap();
        cache.set(2, 2).unwrap();
        cache.get(&2);

        let via_trait = cache.snapshot();
        assert_eq!(via_trait, cache.metrics_snapshot());
        assert_eq!(via_trait.evicted_entries, 1);
        assert_eq!(hits_and_misses(&cache), (1, 0));
    }
}
