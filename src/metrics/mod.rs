//! Operation counters for the cache engines (feature `metrics`).
//!
//! Each engine keeps a [`CacheMetrics`](metrics_impl::CacheMetrics) inside its
//! locked state, so recording is a plain field increment under the lock the
//! operation already holds. Callers read them through
//! [`MetricsSnapshotProvider`](traits::MetricsSnapshotProvider).

pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
