//! Candidate point positions per ciphersuite
//!
//! Every suite owns an exponentially growing table of alternative slots.
//! Level `i` holds `2^i` slots of `point_len` bytes, laid out after the
//! slots of all lower levels, so level `i` starts at `(2^i - 1) * point_len`.
//! One 32-bit tag per level, drawn from a stream keyed only by the suite's
//! public name, picks the slot: `tag mod 2^i`. Level 0 has a single slot
//! and therefore always sits at offset 0.
//!
//! Nothing here is secret. A recipient recomputes the same table to find
//! where its suite's point may be; what stays hidden is which level the
//! writer actually used.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shared_suites::Ciphersuite;

use super::levels::LevelBound;
use super::reservation::ByteRange;

/// Prefix of the public seed for a suite's position stream.
pub const POSITION_SEED_PREFIX: &str = "NegoCipherSuite:";

/// Public seed for `suite_name`'s position stream.
pub fn position_seed(suite_name: &str) -> Vec<u8> {
    format!("{POSITION_SEED_PREFIX}{suite_name}").into_bytes()
}

/// Byte offset at which `level`'s slot table starts.
pub fn level_base(level: usize, point_len: usize) -> usize {
    ((1usize << level) - 1) * point_len
}

/// The single candidate position of one level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelPosition {
    pub level: usize,
    /// Pseudorandom tag drawn for this level
    pub tag: u32,
    /// Slot index within the level, `tag mod 2^level`
    pub slot: usize,
    /// Absolute byte offset of the slot
    pub offset: usize,
}

/// All candidate positions of one ciphersuite.
#[derive(Clone, Debug)]
pub struct PositionSet {
    suite: Arc<dyn Ciphersuite>,
    point_len: usize,
    positions: Vec<LevelPosition>,
    max: usize,
}

impl PositionSet {
    /// Derive the candidate positions for `suite` over `bound` levels.
    ///
    /// Deterministic: the same suite and bound yield the same tags and
    /// offsets in every process.
    pub fn derive(suite: Arc<dyn Ciphersuite>, bound: LevelBound) -> Self {
        let point_len = suite.point_len();
        let mut stream = suite.position_stream(&position_seed(suite.name()));

        let positions: Vec<LevelPosition> = (0..bound.get())
            .map(|level| {
                let tag = stream.next_u32_be();
                let slot = (tag as usize) & ((1usize << level) - 1);
                LevelPosition {
                    level,
                    tag,
                    slot,
                    offset: level_base(level, point_len) + slot * point_len,
                }
            })
            .collect();

        // LevelBound guarantees at least one level.
        let max = positions
            .last()
            .map(|p| p.offset + point_len)
            .unwrap_or(point_len);

        Self {
            suite,
            point_len,
            positions,
            max,
        }
    }

    pub fn suite(&self) -> &Arc<dyn Ciphersuite> {
        &self.suite
    }

    pub fn suite_name(&self) -> &str {
        self.suite.name()
    }

    /// Length of the suite's uniform point encoding.
    pub fn point_len(&self) -> usize {
        self.point_len
    }

    /// Number of levels.
    pub fn level_count(&self) -> usize {
        self.positions.len()
    }

    /// Highest level, reserved first as the last resort.
    pub fn top_level(&self) -> usize {
        self.positions.len().saturating_sub(1)
    }

    /// End of the highest level's slot, the suite's worst-case footprint.
    pub fn max(&self) -> usize {
        self.max
    }

    pub fn positions(&self) -> &[LevelPosition] {
        &self.positions
    }

    pub fn position(&self, level: usize) -> Option<&LevelPosition> {
        self.positions.get(level)
    }

    /// Byte range the suite's point occupies if placed at `level`.
    pub fn range(&self, level: usize) -> Option<ByteRange> {
        let position = self.positions.get(level)?;
        ByteRange::at(position.offset, self.point_len).ok()
    }

    /// Every place a recipient must look for this suite's point, lowest level first.
    pub fn candidates(&self) -> impl Iterator<Item = (usize, ByteRange)> + '_ {
        (0..self.positions.len()).filter_map(move |level| self.range(level).map(|r| (level, r)))
    }
}
