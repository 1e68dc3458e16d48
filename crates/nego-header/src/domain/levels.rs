//! Level bounds and the per-header suite registry
//!
//! A suite's level bound is standardized when the suite is defined,
//! typically `ceil(log2(expected concurrent suites))`. Higher bounds give
//! more alternative positions at the cost of a longer worst-case header.

use std::collections::BTreeMap;
use std::sync::Arc;

use shared_suites::Ciphersuite;

use crate::error::NegoError;

/// Hard ceiling on level bounds: one tag bit selects a slot per level.
pub const MAX_LEVEL_BOUND: usize = 32;

/// Number of levels a ciphersuite may use, validated to `1..=MAX_LEVEL_BOUND`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LevelBound(usize);

impl LevelBound {
    /// Validate a level bound.
    pub fn new(levels: usize) -> Result<Self, NegoError> {
        if levels == 0 || levels > MAX_LEVEL_BOUND {
            return Err(NegoError::InvalidLevelBound {
                bound: levels,
                max: MAX_LEVEL_BOUND,
            });
        }
        Ok(Self(levels))
    }

    /// Standard bound for a suite expected to coexist with `suites` others:
    /// `ceil(log2(suites))`, at least 1.
    pub fn for_suite_count(suites: usize) -> Self {
        let levels = if suites <= 1 {
            1
        } else {
            (usize::BITS - (suites - 1).leading_zeros()) as usize
        };
        Self(levels.clamp(1, MAX_LEVEL_BOUND))
    }

    /// Number of levels.
    pub fn get(&self) -> usize {
        self.0
    }

    /// Highest level index, the last-resort position.
    pub fn top(&self) -> usize {
        self.0 - 1
    }
}

/// A ciphersuite together with its level bound.
#[derive(Clone, Debug)]
pub struct SuiteLevel {
    pub suite: Arc<dyn Ciphersuite>,
    pub bound: LevelBound,
}

/// Ciphersuites in use for one header, keyed by suite name.
#[derive(Clone, Debug, Default)]
pub struct SuiteLevels {
    suites: BTreeMap<String, SuiteLevel>,
}

impl SuiteLevels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a suite.
    ///
    /// Rejects a second suite with the same name, zero-length point
    /// encodings, and bounds whose worst-case extent would overflow `usize`.
    pub fn insert(&mut self, suite: Arc<dyn Ciphersuite>, bound: LevelBound) -> Result<(), NegoError> {
        let name = suite.name().to_string();
        if self.suites.contains_key(&name) {
            return Err(NegoError::DuplicateSuite(name));
        }

        let point_len = suite.point_len();
        if point_len == 0 {
            return Err(NegoError::ZeroPointLength(name));
        }

        // Levels 0..n span (2^n - 1) slots of point_len bytes. Built from
        // 2^(n-1) so a 32-level bound still fits a 32-bit usize.
        let extent = ((1usize << bound.top()) - 1)
            .checked_mul(2)
            .and_then(|slots| slots.checked_add(1))
            .and_then(|slots| slots.checked_mul(point_len));
        if extent.is_none() {
            return Err(NegoError::ExtentOverflow {
                suite: name,
                levels: bound.get(),
                point_len,
            });
        }

        self.suites.insert(name, SuiteLevel { suite, bound });
        Ok(())
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, suite: Arc<dyn Ciphersuite>, bound: LevelBound) -> Result<Self, NegoError> {
        self.insert(suite, bound)?;
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&SuiteLevel> {
        self.suites.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.suites.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.suites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suites.is_empty()
    }

    /// Suites in name order.
    pub fn iter(&self) -> impl Iterator<Item = &SuiteLevel> {
        self.suites.values()
    }
}
