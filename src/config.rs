//! Runtime configuration resolved from environment variables.
//!
//! | variable                       | meaning                     | default    |
//! |--------------------------------|-----------------------------|------------|
//! | `NEO_EMULATOR_LOG`             | log level                   | `info`     |
//! | `NEO_EMULATOR_KEY_FILE`        | invoker key file path       | `last.key` |
//! | `NEO_EMULATOR_ADDRESS_VERSION` | address version byte        | `0x17`     |
//!
//! Invalid values are reported and replaced by the default.

use crate::crypto::key_file::DEFAULT_KEY_FILE;
use crate::types::script_hash::DEFAULT_ADDRESS_VERSION;
use crate::utils::log::Level;
use crate::warn;
use std::env;
use std::path::PathBuf;

pub const LOG_ENV: &str = "NEO_EMULATOR_LOG";
pub const KEY_FILE_ENV: &str = "NEO_EMULATOR_KEY_FILE";
pub const ADDRESS_VERSION_ENV: &str = "NEO_EMULATOR_ADDRESS_VERSION";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub log_level: Level,
    /// File the invoker's raw private key is loaded from and saved to.
    pub key_file: PathBuf,
    /// Version byte prefixed to script hashes when forming addresses.
    pub address_version: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Level::Info,
            key_file: PathBuf::from(DEFAULT_KEY_FILE),
            address_version: DEFAULT_ADDRESS_VERSION,
        }
    }
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(value) = lookup(LOG_ENV) {
            match value.parse() {
                Ok(level) => config.log_level = level,
                Err(e) => warn!("{LOG_ENV}: {e}, using {}", config.log_level),
            }
        }

        if let Some(value) = lookup(KEY_FILE_ENV).filter(|v| !v.trim().is_empty()) {
            config.key_file = PathBuf::from(value);
        }

        if let Some(value) = lookup(ADDRESS_VERSION_ENV) {
            match parse_address_version(&value) {
                Ok(version) => config.address_version = version,
                Err(e) => warn!(
                    "{ADDRESS_VERSION_ENV}: {e}, using {:#04x}",
                    config.address_version
                ),
            }
        }

        config
    }
}

/// Parses an address version given in decimal or `0x`-prefixed hex.
pub fn parse_address_version(text: &str) -> Result<u8, String> {
    let text = text.trim();
    let parsed = match text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
    {
        Some(digits) => u8::from_str_radix(digits, 16),
        None => text.parse::<u8>(),
    };
    parsed.map_err(|e| format!("invalid address version '{text}': {e}"))
}
