/// Counters plus the gauges captured when the snapshot was taken.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheMetricsSnapshot {
    pub get_hits: u64,
    pub get_misses: u64,

    pub insert_new: u64,
    pub insert_updates: u64,

    pub evicted_entries: u64,
    pub expired_entries: u64,
    pub clears: u64,

    // gauges
    pub cache_len: usize,
    /// `None` for unbounded (TTL) caches.
    pub capacity: Option<usize>,
}

impl CacheMetricsSnapshot {
    /// Fraction of `get` calls that hit, or 0.0 before any call.
    pub fn hit_rate(&self) -> f64 {
        let total = self.get_hits + self.get_misses;
        if total == 0 {
            0.0
        } else {
            self.get_hits as f64 / total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_rate_handles_no_calls() {
        assert_eq!(CacheMetricsSnapshot::default().hit_rate(), 0.0);
    }

    #[test]
    fn hit_rate_ratio() {
        let snapshot = CacheMetricsSnapshot {
            get_hits: 3,
            get_misses: 1,
            ..Default::default()
        };
        assert!((snapshot.hit_rate() - 0.75).abs() < f64::EPSILON);
    }
}
