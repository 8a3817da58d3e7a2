//! 20-byte script hashes identifying accounts.

use crate::crypto::base58;
use crate::crypto::errors::AddressError;
use std::fmt;

/// Script hash length in bytes.
pub const SCRIPT_HASH_LEN: usize = 20;

/// Address version byte used by the main network.
pub const DEFAULT_ADDRESS_VERSION: u8 = 0x17;

/// Fixed-size `RIPEMD160(SHA256(script))` fingerprint of a verification script.
///
/// Also used for the hash of a bare public key. `Copy` because it is compared
/// and passed around far more often than it is created.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct ScriptHash(pub [u8; SCRIPT_HASH_LEN]);

impl ScriptHash {
    /// Wraps a slice, returning `None` unless it is exactly 20 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        <[u8; SCRIPT_HASH_LEN]>::try_from(bytes).ok().map(Self)
    }

    /// Returns the hash as a byte slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Encodes `version ‖ hash` as a Base58Check address.
    pub fn to_address(&self, version: u8) -> String {
        let mut payload = [0u8; 1 + SCRIPT_HASH_LEN];
        payload[0] = version;
        payload[1..].copy_from_slice(&self.0);
        base58::encode_check(&payload)
    }

    /// Parses a Base58Check address, checking its version byte.
    pub fn from_address(address: &str, version: u8) -> Result<Self, AddressError> {
        let payload = base58::decode_check(address)?;
        if payload.len() != 1 + SCRIPT_HASH_LEN {
            return Err(AddressError::InvalidLength(payload.len()));
        }
        if payload[0] != version {
            return Err(AddressError::VersionMismatch {
                expected: version,
                actual: payload[0],
            });
        }
        Self::from_slice(&payload[1..]).ok_or(AddressError::InvalidLength(payload.len()))
    }
}

impl fmt::Display for ScriptHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::errors::Base58Error;

    fn sample() -> ScriptHash {
        ScriptHash::from_slice(
            &hex::decode("ad5cac596a1ef6c18ac1746dfd304f93964354b5").unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn to_address_known_vector() {
        assert_eq!(
            sample().to_address(DEFAULT_ADDRESS_VERSION),
            "AXaXZjZGA3qhQRTCsyG5uFKr9HeShgVhTF"
        );
    }

    #[test]
    fn from_address_recovers_hash() {
        let parsed =
            ScriptHash::from_address("AXaXZjZGA3qhQRTCsyG5uFKr9HeShgVhTF", DEFAULT_ADDRESS_VERSION)
                .unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn from_address_rejects_other_version() {
        let address = sample().to_address(0x35);
        let err = ScriptHash::from_address(&address, DEFAULT_ADDRESS_VERSION).unwrap_err();
        assert_eq!(
            err,
            AddressError::VersionMismatch {
                expected: 0x17,
                actual: 0x35
            }
        );
    }

    #[test]
    fn from_address_rejects_wrong_payload_length() {
        let text = base58::encode_check(&[0x17; 10]);
        assert_eq!(
            ScriptHash::from_address(&text, DEFAULT_ADDRESS_VERSION),
            Err(AddressError::InvalidLength(10))
        );
    }

    #[test]
    fn from_address_propagates_codec_errors() {
        let err = ScriptHash::from_address("AXaXZjZGA3qhQRTCsyG5uFKr9HeShgVhTG", 0x17).unwrap_err();
        assert!(matches!(
            err,
            AddressError::Encoding(Base58Error::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn from_slice_requires_exact_length() {
        assert!(ScriptHash::from_slice(&[0u8; 19]).is_none());
        assert!(ScriptHash::from_slice(&[0u8; 21]).is_none());
        assert!(ScriptHash::from_slice(&[0u8; 20]).is_some());
    }

    #[test]
    fn display_is_hex() {
        assert_eq!(
            sample().to_string(),
            "ad5cac596a1ef6c18ac1746dfd304f93964354b5"
        );
    }
}
