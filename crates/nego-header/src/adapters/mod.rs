//! Adapters Layer
//!
//! Connects layout observability to external backends.

pub mod tracing_observer;

pub use tracing_observer::TracingObserver;
