//! # Integration Tests
//!
//! Flows that exercise `shared-suites` ciphersuites through the
//! `nego-header` writer, the way a sender and its recipients would.

pub mod flows;
