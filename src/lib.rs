//! NEO contract emulator core.
//!
//! Derives account identities from raw private keys and exposes them to a
//! contract interpreter through the `Neo.Runtime.*` syscalls.

pub mod config;
pub mod crypto;
pub mod types;
pub mod utils;
pub mod virtual_machine;
