//! Shared health state for the /health endpoint.
//! Updated by the API handlers.

use std::sync::atomic::{AtomicU64, Ordering};

/// Shared service counters. Updated by handlers, read by /health.
#[derive(Default)]
pub struct HealthState {
    /// Number of price estimates served since startup.
    pub estimates_served: AtomicU64,
    /// Nanosecond timestamp of the last estimate (0 = none).
    pub last_estimate_at_ns: AtomicU64,
    /// Number of gamification results served since startup.
    pub scores_served: AtomicU64,
    /// Estimates dropped because the recorder channel was full.
    pub records_dropped: AtomicU64,
}

impl HealthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_estimate(&self, at_ns: u64) {
        self.estimates_served.fetch_add(1, Ordering::Relaxed);
        self.last_estimate_at_ns.store(at_ns, Ordering::Relaxed);
    }

    pub fn inc_scores_served(&self) {
        self.scores_served.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_records_dropped(&self) {
        self.records_dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn estimates_served(&self) -> u64 {
        self.estimates_served.load(Ordering::Relaxed)
    }

    pub fn last_estimate_at_ns(&self) -> u64 {
        self.last_estimate_at_ns.load(Ordering::Relaxed)
    }

    pub fn scores_served(&self) -> u64 {
        self.scores_served.load(Ordering::Relaxed)
    }

    pub fn records_dropped(&self) -> u64 {
        self.records_dropped.load(Ordering::Relaxed)
    }
}
