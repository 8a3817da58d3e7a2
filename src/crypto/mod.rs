//! Account identity cryptography.
//!
//! - [`hash`]: SHA-256 / RIPEMD-160 digest pipeline
//! - [`base58`]: Base58Check codec built on the double-SHA256 checksum
//! - [`key_pair`]: deterministic derivation of the full account identity
//! - [`key_file`]: raw private key persistence
//! - [`errors`]: codec and key derivation errors

pub mod base58;
pub mod errors;
pub mod hash;
pub mod key_file;
pub mod key_pair;
