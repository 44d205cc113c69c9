//! Micro-operation benchmarks for the three engines.
//!
//! Run with: `cargo bench --bench ops`
//!
//! Measures per-operation latency for get hits, inserts that evict, and a
//! mixed random workload, all single-threaded under identical conditions.

use std::hint::black_box;
use std::time::{Duration, Instant};

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use inmem_cache::policy::lfu::LfuCache;
use inmem_cache::policy::lru::LruCache;
use inmem_cache::policy::ttl::TtlCache;
use inmem_cache::traits::Cache;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const CAPACITY: usize = 16_384;
const OPS: u64 = 100_000;
const TTL: Duration = Duration::from_secs(3600);

type Engine = Box<dyn Cache<u64, u64>>;

fn engines() -> [(&'static str, fn() -> Engine); 3] {
    [
        ("lfu", || -> Engine {
            Box::new(LfuCache::new(CAPACITY).expect("capacity > 0"))
        }),
        ("lru", || -> Engine {
            Box::new(LruCache::new(CAPACITY, TTL).expect("valid config"))
        }),
        ("ttl", || -> Engine {
            Box::new(TtlCache::with_capacity(TTL, CAPACITY).expect("ttl > 0"))
        }),
    ]
}

// ============================================================================
// Get Hit Latency
// ============================================================================

fn bench_get_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_hit_ns");
    group.throughput(Throughput::Elements(OPS));

    for (name, make) in engines() {
        group.bench_function(name, |b| {
            b.iter_custom(|iters| {
                let cache = make();
                for i in 0..CAPACITY as u64 {
                    cache.set(i, i).expect("set never fails");
                }
                let start = Instant::now();
                for _ in 0..iters {
                    for i in 0..OPS {
                        black_box(cache.get(&(i % CAPACITY as u64)));
                    }
                }
                start.elapsed()
            })
        });
    }
    group.finish();
}

// ============================================================================
// Insert Latency (steady state, bounded engines evict on every call)
// ============================================================================

fn bench_insert_evicting(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_evict_ns");
    group.throughput(Throughput::Elements(OPS));

    for (name, make) in engines() {
        group.bench_function(name, |b| {
            b.iter_custom(|iters| {
                let cache = make();
                for i in 0..CAPACITY as u64 {
                    cache.set(i, i).expect("set never fails");
                }
                let mut next = CAPACITY as u64;
                let start = Instant::now();
                for _ in 0..iters {
                    for _ in 0..OPS {
                        cache.set(black_box(next), next).expect("set never fails");
                        next += 1;
                    }
                }
                start.elapsed()
            })
        });
    }
    group.finish();
}

// ============================================================================
// Mixed Random Workload (80% get / 20% set over 2x capacity keyspace)
// ============================================================================

fn bench_mixed(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed_80_20_ns");
    group.throughput(Throughput::Elements(OPS));

    let keyspace = 2 * CAPACITY as u64;
    for (name, make) in engines() {
        group.bench_function(name, |b| {
            b.iter_custom(|iters| {
                let cache = make();
                let mut rng = StdRng::seed_from_u64(42);
                let start = Instant::now();
                for _ in 0..iters {
                    for _ in 0..OPS {
                        let key = rng.gen_range(0..keyspace);
                        if rng.gen_bool(0.8) {
                            black_box(cache.get(&key));
                        } else {
                            cache.set(key, key).expect("set never fails");
                        }
                    }
                }
                start.elapsed()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_get_hit, bench_insert_evicting, bench_mixed);
criterion_main!(benches);
