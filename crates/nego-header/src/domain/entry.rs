//! Entrypoints hidden in a negotiation header
//!
//! An entry pairs a recipient's public key with a short fixed-length
//! payload the recipient will decrypt. Layout only needs the set of suites
//! the entries use; the payload is carried for the emission stage.

use std::collections::BTreeSet;
use std::sync::Arc;

use shared_suites::Ciphersuite;

use super::levels::SuiteLevels;
use crate::error::NegoError;

/// One recipient's entrypoint.
#[derive(Clone, Debug)]
pub struct Entry {
    /// Suite the public key is drawn from
    pub suite: Arc<dyn Ciphersuite>,
    /// Encoded public key of the entrypoint's owner
    pub public_key: Vec<u8>,
    /// Payload decryptable by the owner
    pub data: Vec<u8>,
}

impl Entry {
    pub fn new(suite: Arc<dyn Ciphersuite>, public_key: Vec<u8>, data: Vec<u8>) -> Self {
        Self {
            suite,
            public_key,
            data,
        }
    }

    pub fn suite_name(&self) -> &str {
        self.suite.name()
    }
}

/// Check entries against the header's suites and payload length.
///
/// Every payload must be exactly `entry_len` bytes so header size leaks
/// nothing about suites, and every entry's suite must have a level bound.
/// Returns the distinct suite names in use.
pub fn check_entries(
    entries: &[Entry],
    entry_len: usize,
    suites: &SuiteLevels,
) -> Result<BTreeSet<String>, NegoError> {
    let mut used = BTreeSet::new();
    for (index, entry) in entries.iter().enumerate() {
        if entry.data.len() != entry_len {
            return Err(NegoError::EntryLengthMismatch {
                index,
                expected: entry_len,
                actual: entry.data.len(),
            });
        }
        if !suites.contains(entry.suite_name()) {
            return Err(NegoError::UnknownEntrySuite {
                index,
                suite: entry.suite_name().to_string(),
            });
        }
        used.insert(entry.suite_name().to_string());
    }
    Ok(used)
}
