//! Domain Layer - Pure layout logic
//!
//! This layer contains:
//! - Level bounds and the per-header suite registry
//! - Candidate position derivation
//! - The reservation index
//! - Entries, configuration and the finalized layout
//!
//! RULES:
//! - No I/O operations
//! - No async code
//! - Pure functions where possible

pub mod config;
pub mod entry;
pub mod layout;
pub mod levels;
pub mod positions;
pub mod reservation;

pub use config::{NegoConfig, NegoConfigBuilder};
pub use entry::{check_entries, Entry};
pub use layout::{Layout, Placement};
pub use levels::{LevelBound, SuiteLevel, SuiteLevels, MAX_LEVEL_BOUND};
pub use positions::{
    level_base, position_seed, LevelPosition, PositionSet, POSITION_SEED_PREFIX,
};
pub use reservation::{ByteRange, NodeId, ReservationIndex, ReservationNode};
