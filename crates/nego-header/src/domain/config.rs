//! Layout configuration and validation
//!
//! # Example
//!
//! ```ignore
//! use nego_header::domain::NegoConfigBuilder;
//!
//! let config = NegoConfigBuilder::new()
//!     .max_level_bound(12)
//!     .max_suites(16)
//!     .build()
//!     .expect("Valid config");
//! ```

use serde::{Deserialize, Serialize};

use super::levels::MAX_LEVEL_BOUND;
use crate::error::NegoError;

/// Limits a writer enforces on its callers
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NegoConfig {
    /// Largest level bound accepted for any suite (1 to 32)
    pub max_level_bound: usize,
    /// Most distinct ciphersuites per header
    pub max_suites: usize,
    /// Largest entry payload in bytes
    pub max_entry_len: usize,
    /// Report intermediate and final index contents to the observer
    pub snapshot_layouts: bool,
}

impl Default for NegoConfig {
    fn default() -> Self {
        Self {
            max_level_bound: 16, // worst case 65535 slots per suite
            max_suites: 64,
            max_entry_len: 4096,
            snapshot_layouts: true,
        }
    }
}

impl NegoConfig {
    /// Validate configuration bounds
    pub fn validate(&self) -> Result<(), NegoError> {
        if self.max_level_bound == 0 || self.max_level_bound > MAX_LEVEL_BOUND {
            return Err(NegoError::InvalidConfig(format!(
                "max_level_bound must be between 1 and {MAX_LEVEL_BOUND}, got {}",
                self.max_level_bound
            )));
        }

        if self.max_suites == 0 {
            return Err(NegoError::InvalidConfig(
                "max_suites cannot be 0".to_string(),
            ));
        }

        if self.max_entry_len == 0 {
            return Err(NegoError::InvalidConfig(
                "max_entry_len cannot be 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Builder-style method to set the level bound ceiling
    pub fn with_max_level_bound(mut self, levels: usize) -> Self {
        self.max_level_bound = levels;
        self
    }

    /// Builder-style method to set the suite ceiling
    pub fn with_max_suites(mut self, suites: usize) -> Self {
        self.max_suites = suites;
        self
    }
}

/// Fluent builder for [`NegoConfig`]
#[derive(Default)]
pub struct NegoConfigBuilder {
    max_level_bound: Option<usize>,
    max_suites: Option<usize>,
    max_entry_len: Option<usize>,
    snapshot_layouts: Option<bool>,
}

impl NegoConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_level_bound(mut self, levels: usize) -> Self {
        self.max_level_bound = Some(levels);
        self
    }

    pub fn max_suites(mut self, suites: usize) -> Self {
        self.max_suites = Some(suites);
        self
    }

    pub fn max_entry_len(mut self, len: usize) -> Self {
        self.max_entry_len = Some(len);
        self
    }

    pub fn snapshot_layouts(mut self, enabled: bool) -> Self {
        self.snapshot_layouts = Some(enabled);
        self
    }

    /// Build the config, validating all parameters
    pub fn build(self) -> Result<NegoConfig, NegoError> {
        let config = self.build_unchecked();
        config.validate()?;
        Ok(config)
    }

    /// Build without validation (for internal use only)
    pub fn build_unchecked(self) -> NegoConfig {
        let defaults = NegoConfig::default();

        NegoConfig {
            max_level_bound: self.max_level_bound.unwrap_or(defaults.max_level_bound),
            max_suites: self.max_suites.unwrap_or(defaults.max_suites),
            max_entry_len: self.max_entry_len.unwrap_or(defaults.max_entry_len),
            snapshot_layouts: self.snapshot_layouts.unwrap_or(defaults.snapshot_layouts),
        }
    }
}
