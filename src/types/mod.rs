//! Shared value types.
//!
//! - `Bytes`: cheaply clonable immutable byte buffer
//! - `ScriptHash`: 20-byte account fingerprint with address conversion

pub mod bytes;
pub mod script_hash;
