//! Outbound Ports (Driven Ports)
//!
//! Observability hooks for layout computation. Observers see every
//! derivation, probe and placement but never influence control flow.

use std::time::Duration;

use crate::domain::{ByteRange, Placement, PositionSet, ReservationNode};

/// Point in a plan at which the reservation index is reported
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutStage {
    /// Every suite placed, probe reservations above chosen levels still held
    Intermediate,
    /// Only the chosen reservation of each suite remains
    Final,
}

impl LayoutStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutStage::Intermediate => "intermediate",
            LayoutStage::Final => "final",
        }
    }
}

/// Observer of layout computations (Driven Port)
///
/// Implement this trait to integrate with logging or metrics backends.
pub trait LayoutObserver: Send + Sync {
    /// Candidate positions derived for a suite
    fn on_positions_derived(&self, positions: &PositionSet);

    /// A reservation was attempted for `suite` at `level`
    fn on_attempt(&self, suite: &str, level: usize, range: ByteRange, accepted: bool);

    /// A suite's lowest free level was chosen
    fn on_suite_placed(&self, placement: &Placement);

    /// Reservation index contents at `stage`
    fn on_snapshot(&self, stage: LayoutStage, nodes: &[ReservationNode]);

    /// Whether `on_snapshot` does anything with the nodes it is given.
    /// The planner skips copying the index when this is false.
    fn wants_snapshots(&self) -> bool {
        true
    }

    /// A plan finished successfully
    fn on_plan_complete(&self, header_len: usize, suites: usize, elapsed: Duration);

    /// A plan failed because `suite` could not reserve its last-resort `level`
    fn on_plan_failed(&self, suite: &str, level: usize);
}
