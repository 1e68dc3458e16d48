//! Metrics hooks for layout computation
//!
//! Counts plans, probes and chosen levels. High probe rejection rates or
//! climbing average levels mean the deployed level bounds are too tight
//! for the number of suites in use.
//!
//! ## Usage
//!
//! ```ignore
//! use nego_header::metrics::LayoutMetrics;
//!
//! let metrics = Arc::new(LayoutMetrics::new());
//! let mut writer = HeaderWriter::new().with_observer(metrics.clone());
//! writer.init(&suites, 32, &entries)?;
//! println!("{:?}", metrics.snapshot());
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::domain::{ByteRange, Placement, PositionSet, ReservationNode};
use crate::ports::{LayoutObserver, LayoutStage};

/// Metrics collector for layout computations
///
/// Thread-safe counters; one collector may be shared by many writers.
#[derive(Default)]
pub struct LayoutMetrics {
    /// Plans that produced a layout
    pub plans_completed: AtomicU64,
    /// Plans aborted by placement exhaustion
    pub plans_failed: AtomicU64,
    /// Position sets derived
    pub suites_derived: AtomicU64,
    /// Reservations attempted
    pub attempts: AtomicU64,
    /// Reservations rejected for overlap
    pub attempts_rejected: AtomicU64,
    /// Suites that received a final placement
    pub suites_placed: AtomicU64,
    /// Sum of chosen levels across placed suites
    pub chosen_level_sum: AtomicU64,
    /// Header length of the most recent successful plan
    pub last_header_len: AtomicU64,
    /// Cumulative plan time in nanoseconds
    pub plan_time_ns: AtomicU64,
}

impl LayoutMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> LayoutMetricsSnapshot {
        LayoutMetricsSnapshot {
            plans_completed: self.plans_completed.load(Ordering::Relaxed),
            plans_failed: self.plans_failed.load(Ordering::Relaxed),
            suites_derived: self.suites_derived.load(Ordering::Relaxed),
            attempts: self.attempts.load(Ordering::Relaxed),
            attempts_rejected: self.attempts_rejected.load(Ordering::Relaxed),
            suites_placed: self.suites_placed.load(Ordering::Relaxed),
            last_header_len: self.last_header_len.load(Ordering::Relaxed),
            avg_plan_ns: self.avg_plan_time_ns(),
            avg_chosen_level: self.avg_chosen_level(),
        }
    }

    /// Average plan time in nanoseconds
    pub fn avg_plan_time_ns(&self) -> u64 {
        let total = self.plan_time_ns.load(Ordering::Relaxed);
        let count = self.plans_completed.load(Ordering::Relaxed);
        if count > 0 {
            total / count
        } else {
            0
        }
    }

    /// Average level chosen per placed suite
    pub fn avg_chosen_level(&self) -> f64 {
        let total = self.chosen_level_sum.load(Ordering::Relaxed);
        let count = self.suites_placed.load(Ordering::Relaxed);
        if count > 0 {
            total as f64 / count as f64
        } else {
            0.0
        }
    }

    /// Fraction of reservation attempts rejected for overlap
    pub fn rejection_rate(&self) -> f64 {
        let total = self.attempts.load(Ordering::Relaxed);
        let rejected = self.attempts_rejected.load(Ordering::Relaxed);
        if total > 0 {
            rejected as f64 / total as f64
        } else {
            0.0
        }
    }

    /// Reset all counters
    pub fn reset(&self) {
        self.plans_completed.store(0, Ordering::Relaxed);
        self.plans_failed.store(0, Ordering::Relaxed);
        self.suites_derived.store(0, Ordering::Relaxed);
        self.attempts.store(0, Ordering::Relaxed);
        self.attempts_rejected.store(0, Ordering::Relaxed);
        self.suites_placed.store(0, Ordering::Relaxed);
        self.chosen_level_sum.store(0, Ordering::Relaxed);
        self.last_header_len.store(0, Ordering::Relaxed);
        self.plan_time_ns.store(0, Ordering::Relaxed);
    }
}

/// Point-in-time metrics snapshot
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutMetricsSnapshot {
    pub plans_completed: u64,
    pub plans_failed: u64,
    pub suites_derived: u64,
    pub attempts: u64,
    pub attempts_rejected: u64,
    pub suites_placed: u64,
    pub last_header_len: u64,
    pub avg_plan_ns: u64,
    pub avg_chosen_level: f64,
}

impl LayoutObserver for LayoutMetrics {
    fn on_positions_derived(&self, _: &PositionSet) {
        self.suites_derived.fetch_add(1, Ordering::Relaxed);
    }

    fn on_attempt(&self, _: &str, _: usize, _: ByteRange, accepted: bool) {
        self.attempts.fetch_add(1, Ordering::Relaxed);
        if !accepted {
            self.attempts_rejected.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn on_suite_placed(&self, placement: &Placement) {
        self.suites_placed.fetch_add(1, Ordering::Relaxed);
        self.chosen_level_sum
            .fetch_add(placement.level as u64, Ordering::Relaxed);
    }

    fn on_snapshot(&self, _: LayoutStage, _: &[ReservationNode]) {}

    fn wants_snapshots(&self) -> bool {
        false
    }

    fn on_plan_complete(&self, header_len: usize, _: usize, elapsed: Duration) {
        self.plans_completed.fetch_add(1, Ordering::Relaxed);
        self.last_header_len
            .store(header_len as u64, Ordering::Relaxed);
        self.plan_time_ns
            .fetch_add(elapsed.as_nanos() as u64, Ordering::Relaxed);
    }

    fn on_plan_failed(&self, _: &str, _: usize) {
        self.plans_failed.fetch_add(1, Ordering::Relaxed);
    }
}

/// No-op observer for when diagnostics are disabled
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpObserver;

impl LayoutObserver for NoOpObserver {
    fn on_positions_derived(&self, _: &PositionSet) {}
    fn on_attempt(&self, _: &str, _: usize, _: ByteRange, _: bool) {}
    fn on_suite_placed(&self, _: &Placement) {}
    fn on_snapshot(&self, _: LayoutStage, _: &[ReservationNode]) {}
    fn wants_snapshots(&self) -> bool {
        false
    }
    fn on_plan_complete(&self, _: usize, _: usize, _: Duration) {}
    fn on_plan_failed(&self, _: &str, _: usize) {}
}
