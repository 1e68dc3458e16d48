//! Inbound Ports (Driving Ports)
//!
//! The API an emission stage uses to size and populate a header.

use crate::domain::{Entry, Layout, SuiteLevels};
use crate::error::NegoError;

/// Primary layout API (Driving Port)
pub trait HeaderLayoutApi {
    /// Lay out a negotiation header
    ///
    /// # Arguments
    /// * `suites` - Every ciphersuite in use with its standardized level bound
    /// * `entry_len` - Payload length shared by all entries
    /// * `entries` - Entrypoints to hide; only their suite set affects layout
    ///
    /// # Returns
    /// The header length in bytes
    fn init(
        &mut self,
        suites: &SuiteLevels,
        entry_len: usize,
        entries: &[Entry],
    ) -> Result<usize, NegoError>;

    /// Header length of the current layout, 0 before a successful `init`
    fn header_len(&self) -> usize;

    /// The current layout, if `init` has succeeded
    fn layout(&self) -> Option<&Layout>;
}
