use crate::metrics::snapshot::CacheMetricsSnapshot;
use crate::metrics::traits::CoreMetricsRecorder;

/// Plain counters; always mutated under the owning engine's lock.
#[derive(Debug, Default, Clone)]
pub struct CacheMetrics {
    pub get_hits: u64,
    pub get_misses: u64,
    pub insert_new: u64,
    pub insert_updates: u64,
    pub evicted_entries: u64,
    pub expired_entries: u64,
    pub clears: u64,
}

impl CacheMetrics {
    pub fn snapshot(&self, cache_len: usize, capacity: Option<usize>) -> CacheMetricsSnapshot {
        CacheMetricsSnapshot {
            get_hits: self.get_hits,
            get_misses: self.get_misses,
            insert_new: self.insert_new,
            insert_updates: self.insert_updates,
            evicted_entries: self.evicted_entries,
            expired_entries: self.expired_entries,
            clears: self.clears,
            cache_len,
            capacity,
        }
    }
}

impl CoreMetricsRecorder for CacheMetrics {
    fn record_get_hit(&mut self) {
        self.get_hits += 1;
    }

    fn record_get_miss(&mut self) {
        self.get_misses += 1;
    }

    fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }

    fn record_insert_update(&mut self) {
        self.insert_updates += 1;
    }

    fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }

    fn record_expired_entry(&mut self) {
        self.expired_entries += 1;
    }

    fn record_clear(&mut self) {
        self.clears += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorder_feeds_snapshot() {
        let mut metrics = CacheMetrics::default();
        metrics.record_get_hit();
        metrics.record_get_miss();
        metrics.record_get_miss();
        metrics.record_insert_new();
        metrics.record_evicted_entry();
        metrics.record_expired_entry();

        let snapshot = metrics.snapshot(4, Some(8));
        assert_eq!(snapshot.get_hits, 1);
        assert_eq!(snapshot.get_misses, 2);
        assert_eq!(snapshot.insert_new, 1);
        assert_eq!(snapshot.evicted_entries, 1);
        assert_eq!(snapshot.expired_entries, 1);
        assert_eq!(snapshot.cache_len, 4);
        assert_eq!(snapshot.capacity, Some(8));
    }
}
