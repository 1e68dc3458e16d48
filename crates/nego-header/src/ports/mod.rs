//! Ports Layer
//!
//! Defines the interfaces (traits) for:
//! - Driving Ports (inbound) - API for callers that need a header layout
//! - Driven Ports (outbound) - Observability collaborators

pub mod inbound;
pub mod outbound;

pub use inbound::HeaderLayoutApi;
pub use outbound::{LayoutObserver, LayoutStage};
