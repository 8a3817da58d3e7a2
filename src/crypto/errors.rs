use neo_emulator_derive::Error;

/// Errors produced by the Base58Check codec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Base58Error {
    /// Text contains characters outside the alphabet or is too short to hold a checksum.
    #[error("invalid base58 encoding: {0}")]
    InvalidEncoding(String),
    /// Trailing checksum does not match the recomputed one.
    #[error("checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },
}

/// Errors that can occur while constructing a [`KeyPair`](super::key_pair::KeyPair).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    /// Secret input is not 32, 96 or 104 bytes long.
    #[error("invalid key length {0}: expected 32, 96 or 104 bytes")]
    InvalidKeyLength(usize),
    /// Scalar reduces to zero modulo the curve order.
    #[error("private key is not a valid P-256 scalar")]
    InvalidPrivateKey,
    /// Extended input does not embed a point on the curve.
    #[error("embedded public key is not a valid P-256 point")]
    InvalidPublicKey,
    /// Decoded WIF payload has the wrong shape.
    #[error("invalid WIF: {0}")]
    InvalidWif(String),
    /// Key text is not valid hex.
    #[error("invalid hex key: {0}")]
    InvalidHex(String),
    /// Base58Check failure while decoding WIF or an address.
    #[error("{0}")]
    Encoding(#[from] Base58Error),
}

/// Errors produced when parsing an address back into a script hash.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// Payload is not one version byte followed by a 20-byte script hash.
    #[error("invalid address payload length {0}, expected 21")]
    InvalidLength(usize),
    /// Version byte does not match the expected network.
    #[error("address version {actual:#04x} does not match expected {expected:#04x}")]
    VersionMismatch { expected: u8, actual: u8 },
    #[error("{0}")]
    Encoding(#[from] Base58Error),
}
