//! Placement Planner
//!
//! Greedy placement of one point per ciphersuite:
//!
//! 1. Derive each suite's candidate positions.
//! 2. Order suites by ascending worst-case footprint (`max`), so the most
//!    constrained suite gets first pick of the low offsets.
//! 3. Per suite, reserve the highest level first (last resort; failure here
//!    aborts the plan), then walk down one level at a time until a
//!    reservation fails. The last success is the chosen level.
//! 4. Release every reservation above each chosen level.
//!
//! Probe reservations stay in the index until every suite is placed: a
//! later suite must not take a slot that shadows an earlier suite's higher
//! levels. All reservations made by a plan are tracked in a rollback list,
//! so a failed plan leaves the index exactly as it found it.

use std::cmp::Ordering;
use std::time::Instant;

use crate::domain::{
    Layout, LevelPosition, NodeId, Placement, PositionSet, ReservationIndex, ReservationNode,
    SuiteLevels,
};
use crate::error::NegoError;
use crate::ports::{LayoutObserver, LayoutStage};

/// A reservation made during the current plan.
#[derive(Clone, Copy, Debug)]
struct Probe {
    /// Index into the sorted position sets
    suite: usize,
    level: usize,
    node: NodeId,
}

/// Runs one layout computation against a reservation index.
///
/// Reservations already in the index when a plan starts are treated as
/// fixed obstacles and are never released.
pub struct PlacementPlanner<'a> {
    index: &'a mut ReservationIndex,
    observer: &'a dyn LayoutObserver,
    snapshot_layouts: bool,
}

impl<'a> PlacementPlanner<'a> {
    pub fn new(index: &'a mut ReservationIndex, observer: &'a dyn LayoutObserver) -> Self {
        Self {
            index,
            observer,
            snapshot_layouts: true,
        }
    }

    /// Enable or disable index snapshots sent to the observer
    pub fn with_snapshots(mut self, enabled: bool) -> Self {
        self.snapshot_layouts = enabled;
        self
    }

    /// Derive positions for every suite in `suites` and place them
    pub fn plan(&mut self, suites: &SuiteLevels) -> Result<Layout, NegoError> {
        let sets = suites
            .iter()
            .map(|s| PositionSet::derive(s.suite.clone(), s.bound))
            .collect();
        self.plan_positions(sets)
    }

    /// Place suites whose positions are already derived
    pub fn plan_positions(&mut self, mut sets: Vec<PositionSet>) -> Result<Layout, NegoError> {
        if sets.is_empty() {
            return Err(NegoError::EmptySuiteSet);
        }

        let started = Instant::now();
        for set in &sets {
            self.observer.on_positions_derived(set);
        }

        // Stable, with name as tie-break, so equal footprints order reproducibly.
        sets.sort_by(|a, b| match a.max().cmp(&b.max()) {
            Ordering::Equal => a.suite_name().cmp(b.suite_name()),
            other => other,
        });

        let mut probes: Vec<Probe> = Vec::new();
        let mut placements: Vec<Placement> = Vec::with_capacity(sets.len());
        let mut header_len = 0;

        for (suite, set) in sets.iter().enumerate() {
            let top = set.top_level();
            let Some(mut chosen) = self.try_reserve(suite, set, top, &mut probes) else {
                self.rollback(&mut probes);
                self.observer.on_plan_failed(set.suite_name(), top);

                let (lo, hi) = set
                    .range(top)
                    .map(|r| (r.lo(), r.hi()))
                    .unwrap_or((0, 0));
                return Err(NegoError::PlacementExhausted {
                    suite: set.suite_name().to_string(),
                    level: top,
                    lo,
                    hi,
                });
            };

            // Find the lowest level that isn't shadowed by an earlier suite.
            while chosen.level > 0 {
                match self.try_reserve(suite, set, chosen.level - 1, &mut probes) {
                    Some(lower) => chosen = lower,
                    None => break,
                }
            }

            let placement = Placement {
                suite: set.suite_name().to_string(),
                level: chosen.level,
                offset: chosen.offset,
                point_len: set.point_len(),
                tag: chosen.tag,
            };
            header_len = header_len.max(placement.end());
            self.observer.on_suite_placed(&placement);
            placements.push(placement);
        }

        self.snapshot(LayoutStage::Intermediate);

        // Keep only the chosen level of each suite.
        for probe in probes.drain(..) {
            if probe.level > placements[probe.suite].level {
                let released = self.index.remove(probe.node);
                debug_assert!(released.is_some(), "probe reservation already released");
            }
        }

        self.snapshot(LayoutStage::Final);
        self.observer
            .on_plan_complete(header_len, placements.len(), started.elapsed());

        Ok(Layout::new(header_len, placements))
    }

    fn try_reserve(
        &mut self,
        suite: usize,
        set: &PositionSet,
        level: usize,
        probes: &mut Vec<Probe>,
    ) -> Option<LevelPosition> {
        let position = *set.position(level)?;
        let range = set.range(level)?;

        let node = ReservationNode::new(set.suite_name(), level, range, position.tag);
        let reserved = self.index.insert(node).map(|node| {
            probes.push(Probe { suite, level, node });
            position
        });
        self.observer
            .on_attempt(set.suite_name(), level, range, reserved.is_some());
        reserved
    }

    fn rollback(&mut self, probes: &mut Vec<Probe>) {
        for probe in probes.drain(..).rev() {
            let released = self.index.remove(probe.node);
            debug_assert!(released.is_some(), "probe reservation already released");
        }
    }

    fn snapshot(&self, stage: LayoutStage) {
        if self.snapshot_layouts && self.observer.wants_snapshots() {
            self.observer.on_snapshot(stage, &self.index.dump());
        }
    }
}
