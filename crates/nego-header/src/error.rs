//! Error types for negotiation header layout

use thiserror::Error;

/// Broad failure class of a [`NegoError`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller passed inputs that break the layout contract
    ContractViolation,
    /// Some ciphersuite could not reserve even its last-resort position
    PlacementExhausted,
}

/// Errors that can occur while laying out a negotiation header
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NegoError {
    #[error("Invalid level bound: {bound} (must be between 1 and {max})")]
    InvalidLevelBound { bound: usize, max: usize },

    #[error("No ciphersuites supplied")]
    EmptySuiteSet,

    #[error("Duplicate ciphersuite: {0}")]
    DuplicateSuite(String),

    #[error("Ciphersuite {0} has a zero-length point encoding")]
    ZeroPointLength(String),

    #[error("Ciphersuite {suite} cannot fit {levels} levels of {point_len}-byte points in the address space")]
    ExtentOverflow {
        suite: String,
        levels: usize,
        point_len: usize,
    },

    #[error("Too many ciphersuites: {count} > {max}")]
    TooManySuites { count: usize, max: usize },

    #[error("Entry length cannot be 0")]
    ZeroEntryLength,

    #[error("Entry length too large: {len} > {max}")]
    EntryTooLong { len: usize, max: usize },

    #[error("Entry {index} carries {actual} payload bytes, expected {expected}")]
    EntryLengthMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Entry {index} uses ciphersuite {suite} which has no level bound")]
    UnknownEntrySuite { index: usize, suite: String },

    #[error("Empty byte range: [{lo}, {hi})")]
    EmptyRange { lo: usize, hi: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to find viable position for ciphersuite {suite} (level {level} at {lo}-{hi})")]
    PlacementExhausted {
        suite: String,
        level: usize,
        lo: usize,
        hi: usize,
    },
}

impl NegoError {
    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            NegoError::PlacementExhausted { .. } => ErrorKind::PlacementExhausted,
            _ => ErrorKind::ContractViolation,
        }
    }

    /// The ciphersuite that could not be placed, if this is a placement failure
    pub fn exhausted_suite(&self) -> Option<&str> {
        match self {
            NegoError::PlacementExhausted { suite, .. } => Some(suite),
            _ => None,
        }
    }
}
