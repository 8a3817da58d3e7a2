//! SHA-256 / RIPEMD-160 digest pipeline.
//!
//! Two compositions are used throughout the crate:
//! - [`hash256`]: `SHA256(SHA256(data))`, the Base58Check checksum source
//! - [`hash160`]: `RIPEMD160(SHA256(data))`, the script hash of a verification script

use crate::types::script_hash::{SCRIPT_HASH_LEN, ScriptHash};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// SHA-256 digest length in bytes.
pub const SHA256_LEN: usize = 32;

/// Computes a single SHA-256 digest.
pub fn sha256(data: &[u8]) -> [u8; SHA256_LEN] {
    Sha256::digest(data).into()
}

/// Computes `SHA256(SHA256(data))`.
pub fn hash256(data: &[u8]) -> [u8; SHA256_LEN] {
    HashBuilder::new().chain(data).finalize_hash256()
}

/// Computes `RIPEMD160(SHA256(data))` and wraps it as a [`ScriptHash`].
pub fn hash160(data: &[u8]) -> ScriptHash {
    HashBuilder::new().chain(data).finalize_hash160()
}

/// Incremental SHA-256 front end for the two-stage digests.
///
/// Lets callers feed a payload in pieces (e.g. a version byte followed by a
/// script hash) without concatenating into a temporary buffer first.
#[derive(Clone, Default)]
pub struct HashBuilder {
    hasher: Sha256,
}

impl HashBuilder {
    /// Creates a new hash builder with empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds data into the first-stage SHA-256.
    pub fn update(&mut self, data: &[u8]) {
        self.hasher.update(data);
    }

    /// Feeds data and returns the builder for chaining.
    pub fn chain(mut self, data: &[u8]) -> Self {
        self.update(data);
        self
    }

    /// Finishes with a second SHA-256 round.
    pub fn finalize_hash256(self) -> [u8; SHA256_LEN] {
        let first = self.hasher.finalize();
        Sha256::digest(first).into()
    }

    /// Finishes with a RIPEMD-160 round.
    pub fn finalize_hash160(self) -> ScriptHash {
        let first = self.hasher.finalize();
        let digest: [u8; SCRIPT_HASH_LEN] = Ripemd160::digest(first).into();
        ScriptHash(digest)
    }
}
