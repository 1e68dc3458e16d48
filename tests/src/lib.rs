//! # Negotiation Header Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── benchmarks/       # Criterion benchmarks for layout computation
//! │   └── layout.rs
//! │
//! └── integration/      # Cross-crate flows (shared-suites + nego-header)
//!     └── flows.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p nego-tests
//!
//! # Integration flows only
//! cargo test -p nego-tests integration::
//!
//! # Benchmarks
//! cargo bench -p nego-tests
//! ```

pub mod benchmarks;
pub mod integration;
