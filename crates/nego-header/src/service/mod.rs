//! Service Layer
//!
//! Orchestrates domain logic: the placement planner runs one layout
//! computation, the header writer owns its index and result.

pub mod planner;
pub mod writer;

pub use planner::PlacementPlanner;
pub use writer::HeaderWriter;
