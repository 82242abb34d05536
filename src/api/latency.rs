//! Wall-clock cost of `pricing::estimate`, one sample per request.
//!
//! An estimate is a few regex passes and a multiplier chain, so samples are
//! normally single-digit microseconds. The histogram tops out at ten seconds;
//! a slower run is clamped into the top bucket and still counted.

use std::sync::Mutex;
use std::time::Duration;

use hdrhistogram::Histogram;
use serde::Serialize;

/// Upper bound of the tracked range, in microseconds.
pub const SLOWEST_TRACKED_US: u64 = 10_000_000;

pub struct EstimateTimings {
    hist: Mutex<Histogram<u64>>,
}

/// Body of `GET /stats/latency`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimingSummary {
    pub samples: u64,
    pub p50_us: Option<u64>,
    pub p95_us: Option<u64>,
    pub p99_us: Option<u64>,
}

impl EstimateTimings {
    pub fn new() -> Self {
        let hist = Histogram::new_with_bounds(1, SLOWEST_TRACKED_US, 3)
            .expect("1us..10s at 3 significant figures is a valid range");
        Self {
            hist: Mutex::new(hist),
        }
    }

    /// Add one estimate's elapsed time. Runs under a microsecond land in
    /// the 1us bucket; runs past [`SLOWEST_TRACKED_US`] land in the top one.
    pub fn observe(&self, elapsed: Duration) {
        let us = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX).max(1);
        if let Ok(mut hist) = self.hist.lock() {
            hist.saturating_record(us);
        }
    }

    pub fn samples(&self) -> u64 {
        self.hist.lock().map(|h| h.len()).unwrap_or(0)
    }

    pub fn summary(&self) -> TimingSummary {
        let Ok(hist) = self.hist.lock() else {
            return TimingSummary::empty();
        };
        if hist.is_empty() {
            return TimingSummary::empty();
        }
        TimingSummary {
            samples: hist.len(),
            p50_us: Some(hist.value_at_quantile(0.50)),
            p95_us: Some(hist.value_at_quantile(0.95)),
            p99_us: Some(hist.value_at_quantile(0.99)),
        }
    }
}

impl Default for EstimateTimings {
    fn default() -> Self {
        Self::new()
    }
}

impl TimingSummary {
    fn empty() -> Self {
        Self {
            samples: 0,
            p50_us: None,
            p95_us: None,
            p99_us: None,
        }
    }
}
