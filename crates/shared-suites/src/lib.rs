//! # Shared Suites - Ciphersuite Descriptors
//!
//! Every party to a negotiation header must agree on how a ciphersuite is
//! named, how long its uniform point encoding is, and which hash drives its
//! public position stream. This crate holds exactly that and nothing secret.
//!
//! ## Components
//!
//! | Module | Contents | Use Case |
//! |--------|----------|----------|
//! | `suite` | `Ciphersuite`, `NamedSuite` | Suite identity and point length |
//! | `stream` | `HashAlgorithm`, `HashStream`, `FixedStream` | Public pseudorandom streams |
//!
//! ## Security Properties
//!
//! - Streams are keyed only by public data; anyone can recompute them.
//! - Point encodings are assumed uniform (Elligator-style), so a point at a
//!   chosen offset is indistinguishable from the random filler around it.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod stream;
pub mod suite;

// Re-exports
pub use stream::{FixedStream, HashAlgorithm, HashStream, KeyStream};
pub use suite::{Ciphersuite, NamedSuite};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
