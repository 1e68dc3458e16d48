//! Reservation index over the header's byte space
//!
//! INVARIANTS:
//! - INVARIANT-1: No two live nodes' ranges intersect
//! - INVARIANT-2: A rejected insert leaves the index unchanged
//!
//! Nodes live in an arena addressed by [`NodeId`]; removal tombstones the
//! slot. Live nodes are also keyed by start offset in a `BTreeMap`. Because
//! live ranges never overlap, ordering by start also orders by end, so an
//! overlap query only has to look at the last node starting before the
//! candidate's end.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::NegoError;

/// Non-empty half-open byte range `[lo, hi)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ByteRange {
    lo: usize,
    hi: usize,
}

impl ByteRange {
    pub fn new(lo: usize, hi: usize) -> Result<Self, NegoError> {
        if hi <= lo {
            return Err(NegoError::EmptyRange { lo, hi });
        }
        Ok(Self { lo, hi })
    }

    /// Range of `len` bytes starting at `offset`.
    pub fn at(offset: usize, len: usize) -> Result<Self, NegoError> {
        let hi = offset.checked_add(len).ok_or(NegoError::EmptyRange {
            lo: offset,
            hi: offset,
        })?;
        Self::new(offset, hi)
    }

    pub fn lo(&self) -> usize {
        self.lo
    }

    pub fn hi(&self) -> usize {
        self.hi
    }

    pub fn len(&self) -> usize {
        self.hi - self.lo
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn overlaps(&self, other: &ByteRange) -> bool {
        self.lo < other.hi && other.lo < self.hi
    }
}

impl fmt::Display for ByteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.lo, self.hi)
    }
}

/// Handle to a node inside a [`ReservationIndex`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

/// A claimed (tentative or final) position of one suite level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationNode {
    pub suite: String,
    pub level: usize,
    pub range: ByteRange,
    pub tag: u32,
}

impl ReservationNode {
    pub fn new(suite: impl Into<String>, level: usize, range: ByteRange, tag: u32) -> Self {
        Self {
            suite: suite.into(),
            level,
            range,
            tag,
        }
    }
}

impl fmt::Display for ReservationNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} at {} (tag {:08x})", self.suite, self.level, self.range, self.tag)
    }
}

/// Set of pairwise-disjoint reservations.
///
/// Not synchronized; confine an index to one layout computation at a time.
#[derive(Debug, Default)]
pub struct ReservationIndex {
    arena: Vec<Option<ReservationNode>>,
    by_start: BTreeMap<usize, NodeId>,
}

impl ReservationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `node` iff its range overlaps no live node.
    ///
    /// Returns the new node's handle, or `None` (and no change) on overlap.
    pub fn insert(&mut self, node: ReservationNode) -> Option<NodeId> {
        if self.conflict(&node.range).is_some() {
            return None;
        }

        let id = NodeId(self.arena.len());
        self.by_start.insert(node.range.lo(), id);
        self.arena.push(Some(node));
        Some(id)
    }

    /// The live node overlapping `range`, if any.
    pub fn conflict(&self, range: &ByteRange) -> Option<&ReservationNode> {
        let (_, id) = self.by_start.range(..range.hi()).next_back()?;
        let node = self.get(*id)?;
        (node.range.hi() > range.lo()).then_some(node)
    }

    pub fn is_free(&self, range: &ByteRange) -> bool {
        self.conflict(range).is_none()
    }

    /// Remove a node. Returns `None` if `id` is not live, which callers
    /// should treat as a bookkeeping bug.
    pub fn remove(&mut self, id: NodeId) -> Option<ReservationNode> {
        let node = self.arena.get_mut(id.0)?.take()?;
        self.by_start.remove(&node.range.lo());
        Some(node)
    }

    pub fn get(&self, id: NodeId) -> Option<&ReservationNode> {
        self.arena.get(id.0).and_then(Option::as_ref)
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.by_start.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_start.is_empty()
    }

    /// End of the highest live range, 0 when empty.
    pub fn extent(&self) -> usize {
        self.iter().next_back().map(|n| n.range.hi()).unwrap_or(0)
    }

    /// Drop every node. Handles issued before the call become stale.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.by_start.clear();
    }

    /// Live nodes in offset order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &ReservationNode> + '_ {
        self.by_start.values().filter_map(|id| self.get(*id))
    }

    /// Copy of the live nodes, for diagnostics.
    pub fn dump(&self) -> Vec<ReservationNode> {
        self.iter().cloned().collect()
    }
}
