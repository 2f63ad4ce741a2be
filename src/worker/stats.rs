//! Per-render-thread stats slots. Each slot is written only by its owning
//! render thread and read by the supervisor with relaxed ordering; stale
//! values are acceptable, so there is no synchronization beyond the
//! atomics themselves.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

#[derive(Default)]
pub struct ThreadStats {
    total_samples: AtomicU64,
    last_pass_usec: AtomicU64,
}

impl ThreadStats {
    /// Records one completed sample pass over a tile. `elapsed` replaces
    /// the owning thread's last-known per-pass time; the supervisor
    /// averages the latest reading from every thread on each stats tick,
    /// rather than accumulating a running divide-by-tick-count average the
    /// way the original's `avgTimePerTilePass /= ctr++` does, which drifts.
    pub fn record_pass(&self, elapsed: Duration) {
        self.total_samples.fetch_add(1, Ordering::Relaxed);
        self.last_pass_usec
            .store(elapsed.as_micros().min(u64::MAX as u128) as u64, Ordering::Relaxed);
    }

    pub fn total_samples(&self) -> u64 {
        self.total_samples.load(Ordering::Relaxed)
    }

    pub fn last_pass_usec(&self) -> u64 {
        self.last_pass_usec.load(Ordering::Relaxed)
    }
}

/// Aggregates a snapshot of every thread's stats into the `stats`
/// message's `completed`/`avgPerPass` fields.
pub fn aggregate(slots: &[ThreadStats]) -> (u64, f64) {
    let completed = slots.iter().map(ThreadStats::total_samples).sum();
    let avg_per_pass = if slots.is_empty() {
        0.0
    } else {
        slots.iter().map(|s| s.last_pass_usec() as f64).sum::<f64>() / slots.len() as f64
    };
    (completed, avg_per_pass)
}
