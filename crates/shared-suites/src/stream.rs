//! # Public Hash Streams
//!
//! Deterministic byte streams seeded from public data only.
//!
//! Fixed-output hashes run in counter mode: block `i` is
//! `H(seed || i as big-endian u64)`. Extendable-output functions
//! (SHAKE256, BLAKE3) read their native XOF directly.

use sha2::{Digest, Sha256, Sha512};
use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{Sha3_256, Shake256, Shake256Reader};

/// Hash function backing a ciphersuite's public stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    /// SHA-256 in counter mode
    Sha256,
    /// SHA-512 in counter mode
    Sha512,
    /// SHA3-256 in counter mode
    Sha3_256,
    /// SHAKE256 extendable output
    Shake256,
    /// BLAKE3 extendable output
    Blake3,
}

impl HashAlgorithm {
    /// Short lowercase identifier, stable across releases.
    pub fn as_str(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha512 => "sha512",
            HashAlgorithm::Sha3_256 => "sha3-256",
            HashAlgorithm::Shake256 => "shake256",
            HashAlgorithm::Blake3 => "blake3",
        }
    }
}

/// A source of pseudorandom bytes.
pub trait KeyStream: Send {
    /// Fill `out` with the next `out.len()` stream bytes.
    fn fill(&mut self, out: &mut [u8]);

    /// Read the next four bytes as a big-endian `u32`.
    fn next_u32_be(&mut self) -> u32 {
        let mut buf = [0u8; 4];
        self.fill(&mut buf);
        u32::from_be_bytes(buf)
    }
}

enum Source {
    Counter {
        algorithm: HashAlgorithm,
        seed: Vec<u8>,
        counter: u64,
    },
    Shake(Box<Shake256Reader>),
    Blake3(Box<blake3::OutputReader>),
}

/// Hash-based stream keyed by a public seed.
pub struct HashStream {
    source: Source,
    block: Vec<u8>,
    cursor: usize,
}

impl HashStream {
    /// Create a stream for `algorithm` keyed by `seed`.
    pub fn new(algorithm: HashAlgorithm, seed: &[u8]) -> Self {
        let source = match algorithm {
            HashAlgorithm::Shake256 => {
                let mut hasher = Shake256::default();
                hasher.update(seed);
                Source::Shake(Box::new(hasher.finalize_xof()))
            }
            HashAlgorithm::Blake3 => {
                let mut hasher = blake3::Hasher::new();
                hasher.update(seed);
                Source::Blake3(Box::new(hasher.finalize_xof()))
            }
            _ => Source::Counter {
                algorithm,
                seed: seed.to_vec(),
                counter: 0,
            },
        };

        Self {
            source,
            block: Vec::new(),
            cursor: 0,
        }
    }

    /// Box the stream for use behind `dyn KeyStream`.
    pub fn boxed(self) -> Box<dyn KeyStream> {
        Box::new(self)
    }

    fn counter_block<D: Digest>(seed: &[u8], counter: u64) -> Vec<u8> {
        let mut hasher = D::new();
        Digest::update(&mut hasher, seed);
        Digest::update(&mut hasher, counter.to_be_bytes());
        hasher.finalize().to_vec()
    }

    fn refill(&mut self) {
        if let Source::Counter {
            algorithm,
            seed,
            counter,
        } = &mut self.source
        {
            self.block = match algorithm {
                HashAlgorithm::Sha512 => Self::counter_block::<Sha512>(seed, *counter),
                HashAlgorithm::Sha3_256 => Self::counter_block::<Sha3_256>(seed, *counter),
                _ => Self::counter_block::<Sha256>(seed, *counter),
            };
            *counter = counter.wrapping_add(1);
            self.cursor = 0;
        }
    }
}

impl KeyStream for HashStream {
    fn fill(&mut self, out: &mut [u8]) {
        match &mut self.source {
            Source::Shake(reader) => return reader.read(out),
            Source::Blake3(reader) => return reader.fill(out),
            Source::Counter { .. } => {}
        }

        let mut written = 0;
        while written < out.len() {
            if self.cursor == self.block.len() {
                self.refill();
            }
            let take = (self.block.len() - self.cursor).min(out.len() - written);
            out[written..written + take]
                .copy_from_slice(&self.block[self.cursor..self.cursor + take]);
            self.cursor += take;
            written += take;
        }
    }
}

impl std::fmt::Debug for HashStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match &self.source {
            Source::Counter { algorithm, .. } => algorithm.as_str(),
            Source::Shake(_) => HashAlgorithm::Shake256.as_str(),
            Source::Blake3(_) => HashAlgorithm::Blake3.as_str(),
        };
        f.debug_struct("HashStream").field("algorithm", &kind).finish()
    }
}

/// Replays a fixed byte script, cycling when exhausted.
///
/// Used for known-answer vectors and for suites whose positions must be
/// pinned in tests.
#[derive(Clone, Debug)]
pub struct FixedStream {
    script: Vec<u8>,
    cursor: usize,
}

impl FixedStream {
    /// Stream that replays `script`. An empty script yields zeros.
    pub fn new(script: Vec<u8>) -> Self {
        Self { script, cursor: 0 }
    }

    /// Stream whose successive `next_u32_be` calls return `tags` in order.
    pub fn from_tags(tags: &[u32]) -> Self {
        Self::new(tags.iter().flat_map(|t| t.to_be_bytes()).collect())
    }
}

impl KeyStream for FixedStream {
    fn fill(&mut self, out: &mut [u8]) {
        if self.script.is_empty() {
            out.fill(0);
            return;
        }
        for byte in out.iter_mut() {
            *byte = self.script[self.cursor];
            self.cursor = (self.cursor + 1) % self.script.len();
        }
    }
}
