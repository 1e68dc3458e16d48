//! Tracing Adapter
//!
//! Reports layout computation through `tracing` events. Probes, placements
//! and snapshots go out at `debug`, plan outcomes at `info` and `warn`.
//! Individual snapshot nodes are listed at `trace`.

use std::time::Duration;

use tracing::{debug, info, trace, warn};

use crate::domain::{ByteRange, Placement, PositionSet, ReservationNode};
use crate::ports::{LayoutObserver, LayoutStage};

/// Layout observer backed by `tracing`
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl TracingObserver {
    pub fn new() -> Self {
        Self
    }
}

impl LayoutObserver for TracingObserver {
    fn on_positions_derived(&self, positions: &PositionSet) {
        debug!(
            suite = positions.suite_name(),
            levels = positions.level_count(),
            point_len = positions.point_len(),
            max = positions.max(),
            "[nego-header] Positions derived"
        );
    }

    fn on_attempt(&self, suite: &str, level: usize, range: ByteRange, accepted: bool) {
        debug!(
            suite = suite,
            level = level,
            range = %range,
            accepted = accepted,
            "[nego-header] Reservation attempt"
        );
    }

    fn on_suite_placed(&self, placement: &Placement) {
        debug!(
            suite = %placement.suite,
            level = placement.level,
            offset = placement.offset,
            end = placement.end(),
            "[nego-header] Suite placed"
        );
    }

    fn on_snapshot(&self, stage: LayoutStage, nodes: &[ReservationNode]) {
        debug!(
            stage = stage.as_str(),
            nodes = nodes.len(),
            "[nego-header] Reservation snapshot"
        );
        for node in nodes {
            trace!(stage = stage.as_str(), "  {node}");
        }
    }

    fn on_plan_complete(&self, header_len: usize, suites: usize, elapsed: Duration) {
        info!(
            header_len = header_len,
            suites = suites,
            elapsed_us = elapsed.as_micros() as u64,
            "[nego-header] Layout complete"
        );
    }

    fn on_plan_failed(&self, suite: &str, level: usize) {
        warn!(
            suite = suite,
            level = level,
            "[nego-header] Placement exhausted, layout rolled back"
        );
    }
}
