//! # Negotiation Header Layout
//!
//! Computes the byte layout of a steganographic negotiation header: one
//! header that carries a public key for each of several ciphersuites at
//! positions every recipient can locate, while the whole header stays
//! indistinguishable from random bytes.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure layout logic, no I/O
//!   - `PositionSet`: Candidate offsets of one suite, one per level
//!   - `ReservationIndex`: Set of pairwise-disjoint byte ranges
//!   - `SuiteLevels`, `LevelBound`: Per-header suite registry
//!   - `Layout`, `Placement`: Finalized result
//!   - `NegoConfig`, `NegoConfigBuilder`: Limits with validation
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `HeaderLayoutApi`: Driving port (inbound API)
//!   - `LayoutObserver`: Driven port (diagnostics)
//!
//! - **Service Layer** (`service/`): Orchestration
//!   - `PlacementPlanner`: Places suites level by level with rollback
//!   - `HeaderWriter`: Implements `HeaderLayoutApi`
//!
//! - **Adapters Layer** (`adapters/`): Observer backends
//!   - `TracingObserver`: Structured `tracing` events
//!
//! ## Invariants
//!
//! - **INVARIANT-1**: Final placements of distinct suites never overlap
//! - **INVARIANT-2**: Each suite sits at the lowest level free once the
//!   suites placed before it hold their reservations
//! - **INVARIANT-3**: Header length equals the largest placement end
//! - **INVARIANT-4**: On failure no reservation of the attempt survives
//!
//! ## Usage Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use nego_header::{HeaderLayoutApi, HeaderWriter, LevelBound, SuiteLevels};
//! use shared_suites::NamedSuite;
//!
//! let mut suites = SuiteLevels::new();
//! suites.insert(Arc::new(NamedSuite::ed25519()), LevelBound::new(4)?)?;
//! suites.insert(Arc::new(NamedSuite::curve448()), LevelBound::new(4)?)?;
//!
//! let mut writer = HeaderWriter::new();
//! let header_len = writer.init(&suites, 48, &entries)?;
//!
//! // A recipient scans its suite's candidates, highest level last
//! let layout = writer.layout().unwrap();
//! println!("Ed25519 at level {:?}", layout.level_of("Ed25519"));
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use adapters::TracingObserver;
pub use domain::{
    ByteRange, Entry, Layout, LevelBound, NegoConfig, NegoConfigBuilder, Placement, PositionSet,
    ReservationIndex, ReservationNode, SuiteLevels,
};
pub use error::{ErrorKind, NegoError};
pub use metrics::{LayoutMetrics, LayoutMetricsSnapshot, NoOpObserver};
pub use ports::{HeaderLayoutApi, LayoutObserver, LayoutStage};
pub use service::{HeaderWriter, PlacementPlanner};
