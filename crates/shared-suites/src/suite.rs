//! # Ciphersuite Descriptors
//!
//! A ciphersuite is a self-contained set of primitives (group, hash,
//! point encoding). Suites need no coordination with each other; the only
//! thing a negotiation header needs from one is its public identity, its
//! uniform point length, and a public stream derived from its hash.

use std::fmt;

use crate::stream::{HashAlgorithm, HashStream, KeyStream};

/// Public view of a ciphersuite used by negotiation headers.
pub trait Ciphersuite: fmt::Debug + Send + Sync {
    /// Public, globally unique suite identifier.
    fn name(&self) -> &str;

    /// Length in bytes of the suite's uniform point encoding.
    fn point_len(&self) -> usize;

    /// Hash backing the suite's public streams.
    fn hash_algorithm(&self) -> HashAlgorithm;

    /// Public pseudorandom stream keyed by `seed`.
    fn position_stream(&self, seed: &[u8]) -> Box<dyn KeyStream> {
        HashStream::new(self.hash_algorithm(), seed).boxed()
    }
}

/// Plain ciphersuite descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NamedSuite {
    name: String,
    point_len: usize,
    hash: HashAlgorithm,
}

impl NamedSuite {
    /// Describe a suite by name, uniform point length and hash.
    pub fn new(name: impl Into<String>, point_len: usize, hash: HashAlgorithm) -> Self {
        Self {
            name: name.into(),
            point_len,
            hash,
        }
    }

    /// Ed25519 group, Elligator 2 encoding, SHA-512.
    pub fn ed25519() -> Self {
        Self::new("Ed25519", 32, HashAlgorithm::Sha512)
    }

    /// Curve448 group, Elligator 2 encoding, SHAKE256.
    pub fn curve448() -> Self {
        Self::new("Curve448", 56, HashAlgorithm::Shake256)
    }

    /// NIST P-256 group, Elligator Squared encoding, SHA-256.
    pub fn p256() -> Self {
        Self::new("P256", 64, HashAlgorithm::Sha256)
    }
}

impl Ciphersuite for NamedSuite {
    fn name(&self) -> &str {
        &self.name
    }

    fn point_len(&self) -> usize {
        self.point_len
    }

    fn hash_algorithm(&self) -> HashAlgorithm {
        self.hash
    }
}

impl fmt::Display for NamedSuite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
