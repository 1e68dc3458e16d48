//! # Negotiation Header Benchmarks
//!
//! Layout computation under growing suite sets.
