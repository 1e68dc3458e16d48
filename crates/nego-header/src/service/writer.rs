//! Header Writer
//!
//! Owns the reservation index of one header, validates caller input,
//! runs the planner, and keeps the finalized layout for emission.
//!
//! A writer is not synchronized. Confine it to one computation at a time.

use std::sync::Arc;

use crate::domain::{
    check_entries, Entry, Layout, NegoConfig, ReservationIndex, ReservationNode, SuiteLevels,
};
use crate::error::NegoError;
use crate::metrics::NoOpObserver;
use crate::ports::{HeaderLayoutApi, LayoutObserver};
use crate::service::planner::PlacementPlanner;

/// Produces negotiation header layouts
///
/// Implements the `HeaderLayoutApi` port. After a successful `init` the
/// layout can be reused to emit many headers with different entry data.
pub struct HeaderWriter {
    config: NegoConfig,
    observer: Arc<dyn LayoutObserver>,
    index: ReservationIndex,
    layout: Option<Layout>,
    entry_len: usize,
}

impl HeaderWriter {
    /// Create a writer with default limits and no observer
    pub fn new() -> Self {
        Self::with_config(NegoConfig::default())
    }

    /// Create a writer with custom limits
    pub fn with_config(config: NegoConfig) -> Self {
        Self {
            config,
            observer: Arc::new(NoOpObserver),
            index: ReservationIndex::new(),
            layout: None,
            entry_len: 0,
        }
    }

    /// Attach an observer for diagnostics or metrics
    pub fn with_observer(mut self, observer: Arc<dyn LayoutObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(&self) -> &NegoConfig {
        &self.config
    }

    /// Payload length of the current layout's entries
    pub fn entry_len(&self) -> usize {
        self.entry_len
    }

    /// Live reservations of the current layout, one per suite
    pub fn reservations(&self) -> impl Iterator<Item = &ReservationNode> + '_ {
        self.index.iter()
    }

    fn validate(
        &self,
        suites: &SuiteLevels,
        entry_len: usize,
        entries: &[Entry],
    ) -> Result<(), NegoError> {
        self.config.validate()?;

        if suites.is_empty() {
            return Err(NegoError::EmptySuiteSet);
        }
        if suites.len() > self.config.max_suites {
            return Err(NegoError::TooManySuites {
                count: suites.len(),
                max: self.config.max_suites,
            });
        }
        if let Some(level) = suites
            .iter()
            .find(|s| s.bound.get() > self.config.max_level_bound)
        {
            return Err(NegoError::InvalidLevelBound {
                bound: level.bound.get(),
                max: self.config.max_level_bound,
            });
        }

        if entry_len == 0 {
            return Err(NegoError::ZeroEntryLength);
        }
        if entry_len > self.config.max_entry_len {
            return Err(NegoError::EntryTooLong {
                len: entry_len,
                max: self.config.max_entry_len,
            });
        }

        check_entries(entries, entry_len, suites)?;
        Ok(())
    }
}

impl Default for HeaderWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderLayoutApi for HeaderWriter {
    fn init(
        &mut self,
        suites: &SuiteLevels,
        entry_len: usize,
        entries: &[Entry],
    ) -> Result<usize, NegoError> {
        // A new layout replaces the previous one entirely, even if this call fails.
        self.index.clear();
        self.layout = None;
        self.entry_len = 0;

        self.validate(suites, entry_len, entries)?;

        let result = PlacementPlanner::new(&mut self.index, self.observer.as_ref())
            .with_snapshots(self.config.snapshot_layouts)
            .plan(suites);

        match result {
            Ok(layout) => {
                let header_len = layout.header_len();
                self.layout = Some(layout);
                self.entry_len = entry_len;
                Ok(header_len)
            }
            Err(e) => {
                self.index.clear();
                Err(e)
            }
        }
    }

    fn header_len(&self) -> usize {
        self.layout.as_ref().map(Layout::header_len).unwrap_or(0)
    }

    fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }
}
