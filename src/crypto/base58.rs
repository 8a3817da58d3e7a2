//! Base58Check codec.
//!
//! A payload is encoded as `base58(payload ‖ checksum)` where the checksum is
//! the first [`CHECKSUM_LEN`] bytes of `SHA256(SHA256(payload))`.

use crate::crypto::errors::Base58Error;
use crate::crypto::hash::hash256;
use zeroize::Zeroizing;

/// Number of checksum bytes appended to every payload.
pub const CHECKSUM_LEN: usize = 4;

fn checksum(payload: &[u8]) -> [u8; CHECKSUM_LEN] {
    let digest = hash256(payload);
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&digest[..CHECKSUM_LEN]);
    out
}

/// Encodes `payload` with an appended double-SHA256 checksum.
///
/// The scratch buffer is wiped on return since payloads may carry key material.
pub fn encode_check(payload: &[u8]) -> String {
    let mut data = Zeroizing::new(Vec::with_capacity(payload.len() + CHECKSUM_LEN));
    data.extend_from_slice(payload);
    data.extend_from_slice(&checksum(payload));
    bs58::encode(data.as_slice()).into_string()
}

/// Decodes Base58Check text and verifies its checksum.
///
/// Returns the payload without the trailing checksum bytes.
///
/// # Errors
/// - [`Base58Error::InvalidEncoding`] if `text` contains characters outside the
///   base-58 alphabet or decodes to fewer than [`CHECKSUM_LEN`] bytes
/// - [`Base58Error::ChecksumMismatch`] if the trailing bytes do not match the
///   recomputed checksum
pub fn decode_check(text: &str) -> Result<Vec<u8>, Base58Error> {
    let mut data = bs58::decode(text)
        .into_vec()
        .map_err(|e| Base58Error::InvalidEncoding(e.to_string()))?;

    if data.len() < CHECKSUM_LEN {
        return Err(Base58Error::InvalidEncoding(format!(
            "decoded {} bytes, need at least {CHECKSUM_LEN}",
            data.len()
        )));
    }

    let split = data.len() - CHECKSUM_LEN;
    let expected = checksum(&data[..split]);
    if data[split..] != expected {
        return Err(Base58Error::ChecksumMismatch {
            expected: hex::encode(expected),
            actual: hex::encode(&data[split..]),
        });
    }

    data.truncate(split);
    Ok(data)
}
