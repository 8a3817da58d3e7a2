//! Account key pairs on NIST P-256.
//!
//! A [`KeyPair`] is derived once from raw secret bytes and carries every form
//! of the account identity the emulator needs:
//!
//! | field                   | derivation                                        |
//! |-------------------------|---------------------------------------------------|
//! | `compressed_public_key` | SEC1 compressed point (parity byte ‖ x)           |
//! | `public_key`            | raw `x ‖ y`                                       |
//! | `signature_script`      | `PUSHBYTES33 ‖ compressed_public_key ‖ CHECKSIG`  |
//! | `script_hash`           | `RIPEMD160(SHA256(signature_script))`             |
//! | `address`               | `Base58Check(version ‖ script_hash)`              |
//! | `wif`                   | `Base58Check(0x80 ‖ private_key ‖ 0x01)`          |

use crate::crypto::base58;
use crate::crypto::errors::KeyError;
use crate::crypto::hash::hash160;
use crate::types::script_hash::{DEFAULT_ADDRESS_VERSION, ScriptHash};
use p256::elliptic_curve::ops::Reduce;
use p256::elliptic_curve::sec1::ToEncodedPoint;
use p256::{FieldBytes, NonZeroScalar, PublicKey, Scalar, SecretKey, U256};
use rand_core::OsRng;
use std::fmt;
use zeroize::Zeroizing;

/// Raw private scalar length.
pub const PRIVATE_KEY_LEN: usize = 32;

/// SEC1 compressed public key length.
pub const COMPRESSED_PUBLIC_KEY_LEN: usize = 33;

/// Raw `x ‖ y` public key length.
pub const PUBLIC_KEY_LEN: usize = 64;

/// Extended secret form: `x ‖ y ‖ private_key`.
pub const EXTENDED_KEY_LEN: usize = PUBLIC_KEY_LEN + PRIVATE_KEY_LEN;

/// Extended secret form preceded by an 8-byte header.
pub const EXTENDED_KEY_WITH_HEADER_LEN: usize = 8 + EXTENDED_KEY_LEN;

/// Opcode pushing the next 33 bytes onto the evaluation stack.
pub const PUSHBYTES33: u8 = 0x21;

/// Opcode verifying a signature against the public key on the stack.
pub const CHECKSIG: u8 = 0xAC;

const SEC1_UNCOMPRESSED_TAG: u8 = 0x04;
const WIF_PREFIX: u8 = 0x80;
const WIF_COMPRESSED_FLAG: u8 = 0x01;

/// Length of the WIF payload before its checksum.
pub const WIF_PAYLOAD_LEN: usize = 1 + PRIVATE_KEY_LEN + 1;

/// Immutable account identity derived from a private key.
///
/// Construction is all-or-nothing: every derived field is computed before the
/// value exists, and nothing can change afterwards. The private scalar and the
/// WIF text are wiped when the key pair is dropped.
#[derive(Clone)]
pub struct KeyPair {
    private_key: Zeroizing<[u8; PRIVATE_KEY_LEN]>,
    public_key_point: PublicKey,
    compressed_public_key: [u8; COMPRESSED_PUBLIC_KEY_LEN],
    public_key: [u8; PUBLIC_KEY_LEN],
    public_key_hash: ScriptHash,
    signature_script: Vec<u8>,
    script_hash: ScriptHash,
    address_version: u8,
    address: String,
    wif: Zeroizing<String>,
}

impl KeyPair {
    /// Derives a key pair using the default address version.
    ///
    /// `secret` must be 32, 96 or 104 bytes long; see [`KeyPair::with_address_version`].
    pub fn new(secret: &[u8]) -> Result<Self, KeyError> {
        Self::with_address_version(secret, DEFAULT_ADDRESS_VERSION)
    }

    /// Derives a key pair whose address uses `address_version`.
    ///
    /// The private key is always the last 32 bytes of `secret`:
    /// - 32 bytes: the public point is `private_key * G`, with the scalar taken
    ///   modulo the curve order (the stored private key keeps the raw bytes)
    /// - 96 bytes: `x ‖ y ‖ private_key`, the point is taken from `x ‖ y`
    /// - 104 bytes: an 8-byte header followed by the 96-byte form
    ///
    /// The extended forms are trusted to embed the matching point.
    ///
    /// # Errors
    /// - [`KeyError::InvalidKeyLength`] for any other input length
    /// - [`KeyError::InvalidPrivateKey`] if a 32-byte scalar is a multiple of the curve order
    /// - [`KeyError::InvalidPublicKey`] if an extended form embeds an invalid point
    pub fn with_address_version(secret: &[u8], address_version: u8) -> Result<Self, KeyError> {
        let point = match secret.len() {
            PRIVATE_KEY_LEN => {
                let bytes = Zeroizing::new(FieldBytes::clone_from_slice(secret));
                let scalar = <Scalar as Reduce<U256>>::reduce_bytes(&*bytes);
                let scalar = Option::<NonZeroScalar>::from(NonZeroScalar::new(scalar))
                    .ok_or(KeyError::InvalidPrivateKey)?;
                PublicKey::from_secret_scalar(&scalar)
            }
            EXTENDED_KEY_LEN | EXTENDED_KEY_WITH_HEADER_LEN => {
                let offset = secret.len() - EXTENDED_KEY_LEN;
                let mut sec1 = [0u8; 1 + PUBLIC_KEY_LEN];
                sec1[0] = SEC1_UNCOMPRESSED_TAG;
                sec1[1..].copy_from_slice(&secret[offset..offset + PUBLIC_KEY_LEN]);
                PublicKey::from_sec1_bytes(&sec1).map_err(|_| KeyError::InvalidPublicKey)?
            }
            other => return Err(KeyError::InvalidKeyLength(other)),
        };

        let mut private_key = Zeroizing::new([0u8; PRIVATE_KEY_LEN]);
        private_key.copy_from_slice(&secret[secret.len() - PRIVATE_KEY_LEN..]);

        Ok(Self::from_parts(private_key, point, address_version))
    }

    /// Generates a new key pair from OS-provided entropy.
    pub fn random() -> Self {
        let secret = SecretKey::random(&mut OsRng);
        let mut private_key = Zeroizing::new([0u8; PRIVATE_KEY_LEN]);
        private_key.copy_from_slice(&Zeroizing::new(secret.to_bytes()));
        Self::from_parts(private_key, secret.public_key(), DEFAULT_ADDRESS_VERSION)
    }

    /// Imports a key pair from Wallet Import Format text.
    ///
    /// The decoded payload must be `0x80 ‖ private_key ‖ 0x01`.
    pub fn from_wif(wif: &str, address_version: u8) -> Result<Self, KeyError> {
        let payload = Zeroizing::new(base58::decode_check(wif)?);
        if payload.len() != WIF_PAYLOAD_LEN {
            return Err(KeyError::InvalidWif(format!(
                "payload is {} bytes, expected {WIF_PAYLOAD_LEN}",
                payload.len()
            )));
        }
        if payload[0] != WIF_PREFIX {
            return Err(KeyError::InvalidWif(format!(
                "prefix {:#04x}, expected {WIF_PREFIX:#04x}",
                payload[0]
            )));
        }
        if payload[WIF_PAYLOAD_LEN - 1] != WIF_COMPRESSED_FLAG {
            return Err(KeyError::InvalidWif(
                "missing compressed public key flag".to_string(),
            ));
        }
        Self::with_address_version(&payload[1..1 + PRIVATE_KEY_LEN], address_version)
    }

    /// Parses a hex-encoded 32-byte private key, with or without a `0x` prefix.
    pub fn from_hex(text: &str, address_version: u8) -> Result<Self, KeyError> {
        let text = text.trim();
        let digits = text
            .strip_prefix("0x")
            .or_else(|| text.strip_prefix("0X"))
            .unwrap_or(text);
        let secret =
            Zeroizing::new(hex::decode(digits).map_err(|e| KeyError::InvalidHex(e.to_string()))?);
        if secret.len() != PRIVATE_KEY_LEN {
            return Err(KeyError::InvalidKeyLength(secret.len()));
        }
        Self::with_address_version(&secret, address_version)
    }

    fn from_parts(
        private_key: Zeroizing<[u8; PRIVATE_KEY_LEN]>,
        point: PublicKey,
        address_version: u8,
    ) -> Self {
        let mut compressed_public_key = [0u8; COMPRESSED_PUBLIC_KEY_LEN];
        compressed_public_key.copy_from_slice(point.to_encoded_point(true).as_bytes());

        let mut public_key = [0u8; PUBLIC_KEY_LEN];
        public_key.copy_from_slice(&point.to_encoded_point(false).as_bytes()[1..]);

        let signature_script = create_signature_script(&compressed_public_key);
        let script_hash = hash160(&signature_script);

        Self {
            public_key_hash: hash160(&compressed_public_key),
            address: script_hash.to_address(address_version),
            wif: encode_wif(&private_key),
            private_key,
            public_key_point: point,
            compressed_public_key,
            public_key,
            signature_script,
            script_hash,
            address_version,
        }
    }

    /// Returns the raw 32-byte private scalar.
    ///
    /// **Security**: never log or transmit these bytes.
    pub fn private_key(&self) -> &[u8; PRIVATE_KEY_LEN] {
        &self.private_key
    }

    pub fn public_key_point(&self) -> &PublicKey {
        &self.public_key_point
    }

    /// SEC1 compressed public key: `0x02`/`0x03` parity prefix followed by `x`.
    pub fn compressed_public_key(&self) -> &[u8; COMPRESSED_PUBLIC_KEY_LEN] {
        &self.compressed_public_key
    }

    /// Uncompressed public key without the leading SEC1 tag byte.
    pub fn public_key(&self) -> &[u8; PUBLIC_KEY_LEN] {
        &self.public_key
    }

    /// Hash160 of the compressed public key itself.
    pub fn public_key_hash(&self) -> ScriptHash {
        self.public_key_hash
    }

    /// Single-signature verification script for this key.
    pub fn signature_script(&self) -> &[u8] {
        &self.signature_script
    }

    /// Hash160 of [`KeyPair::signature_script`], the account fingerprint.
    pub fn script_hash(&self) -> ScriptHash {
        self.script_hash
    }

    /// Alias of [`KeyPair::script_hash`].
    pub fn signature_hash(&self) -> ScriptHash {
        self.script_hash
    }

    pub fn address_version(&self) -> u8 {
        self.address_version
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Wallet Import Format text of the private key.
    pub fn wif(&self) -> &str {
        &self.wif
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("address", &self.address)
            .field("script_hash", &self.script_hash)
            .field(
                "compressed_public_key",
                &hex::encode(self.compressed_public_key),
            )
            .finish_non_exhaustive()
    }
}

/// Builds the minimal single-signature verification script for a public key.
pub fn create_signature_script(compressed_public_key: &[u8; COMPRESSED_PUBLIC_KEY_LEN]) -> Vec<u8> {
    let mut script = Vec::with_capacity(COMPRESSED_PUBLIC_KEY_LEN + 2);
    script.push(PUSHBYTES33);
    script.extend_from_slice(compressed_public_key);
    script.push(CHECKSIG);
    script
}

/// Encodes the private key as WIF, wiping the intermediate payload.
fn encode_wif(private_key: &[u8; PRIVATE_KEY_LEN]) -> Zeroizing<String> {
    let mut payload = Zeroizing::new([0u8; WIF_PAYLOAD_LEN]);
    payload[0] = WIF_PREFIX;
    payload[1..1 + PRIVATE_KEY_LEN].copy_from_slice(private_key);
    payload[WIF_PAYLOAD_LEN - 1] = WIF_COMPRESSED_FLAG;
    Zeroizing::new(base58::encode_check(&payload[..]))
}
