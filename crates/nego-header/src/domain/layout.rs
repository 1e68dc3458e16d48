//! Finalized header layout
//!
//! The only state that outlives a layout computation: the header length
//! and where each suite's point went.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Final position of one suite's point.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub suite: String,
    /// Chosen level
    pub level: usize,
    /// Byte offset of the point
    pub offset: usize,
    /// Length of the point encoding
    pub point_len: usize,
    /// Tag of the chosen level
    pub tag: u32,
}

impl Placement {
    /// First byte past the point.
    pub fn end(&self) -> usize {
        self.offset + self.point_len
    }
}

/// Collision-free per-suite assignment of byte offsets.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    header_len: usize,
    /// Placements in the order suites were processed
    placements: Vec<Placement>,
}

impl Layout {
    pub(crate) fn new(header_len: usize, placements: Vec<Placement>) -> Self {
        Self {
            header_len,
            placements,
        }
    }

    /// Total header length in bytes.
    pub fn header_len(&self) -> usize {
        self.header_len
    }

    /// Placements in processing order (ascending worst-case footprint).
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn placement(&self, suite: &str) -> Option<&Placement> {
        self.placements.iter().find(|p| p.suite == suite)
    }

    pub fn level_of(&self, suite: &str) -> Option<usize> {
        self.placement(suite).map(|p| p.level)
    }

    /// Suite name to chosen level.
    pub fn chosen_levels(&self) -> BTreeMap<String, usize> {
        self.placements
            .iter()
            .map(|p| (p.suite.clone(), p.level))
            .collect()
    }

    /// Suite names in the order they were laid out.
    pub fn processing_order(&self) -> Vec<&str> {
        self.placements.iter().map(|p| p.suite.as_str()).collect()
    }

    pub fn suite_count(&self) -> usize {
        self.placements.len()
    }
}
