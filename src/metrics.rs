//! Activity counters for reader pools

use std::sync::atomic::{AtomicUsize, Ordering};

/// Point-in-time snapshot of pool activity
///
/// Snapshots are for observability only; callers should rely on
/// [`acquire`](crate::Pool::acquire) to block correctly rather than polling
/// these numbers to make control decisions.
#[derive(Debug, Clone, Copy)]
pub struct PoolMetrics {
    /// Total successful checkouts
    pub total_acquired: usize,

    /// Total checkins (including detached readers)
    pub total_released: usize,

    /// Times the factory was invoked on a cache miss
    pub factory_builds: usize,

    /// Times the factory failed
    pub construction_failures: usize,

    /// Readers currently checked out
    pub outstanding: usize,

    /// Readers idle in the reuse cache
    pub idle: usize,

    /// Admission-slot capacity
    pub capacity: usize,

    /// Outstanding / capacity (0.0 to 1.0)
    pub utilization: f64,
}

/// Internal counter set shared by all clones of a pool
pub(crate) struct MetricsTracker {
    pub total_acquired: AtomicUsize,
    pub total_released: AtomicUsize,
    pub factory_builds: AtomicUsize,
    pub construction_failures: AtomicUsize,
}

impl MetricsTracker {
    pub fn new() -> Self {
        Self {
            total_acquired: AtomicUsize::new(0),
            total_released: AtomicUsize::new(0),
            factory_builds: AtomicUsize::new(0),
            construction_failures: AtomicUsize::new(0),
        }
    }

    pub fn snapshot(&self, outstanding: usize, idle: usize, capacity: usize) -> PoolMetrics {
        let utilization = if capacity > 0 {
            outstanding as f64 / capacity as f64
        } else {
            0.0
        };

        PoolMetrics {
            total_acquired: self.total_acquired.load(Ordering::Relaxed),
            total_released: self.total_released.load(Ordering::Relaxed),
            factory_builds: self.factory_builds.load(Ordering::Relaxed),
            construction_failures: self.construction_failures.load(Ordering::Relaxed),
            outstanding,
            idle,
            capacity,
            utilization,
        }
    }
}

impl Default for MetricsTracker {
    fn default() -> Self {
        Self::new()
    }
}
