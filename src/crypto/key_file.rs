//! Raw private key persistence.
//!
//! The key file holds exactly the 32 secret bytes and nothing else. It is
//! written when a key is entered and read back on the next start so the same
//! invoker identity is active across sessions.

use crate::crypto::key_pair::{KeyPair, PRIVATE_KEY_LEN};
use crate::{info, warn};
use std::fs;
use std::io;
use std::path::Path;
use zeroize::Zeroizing;

/// Default key file name, resolved against the working directory.
pub const DEFAULT_KEY_FILE: &str = "last.key";

/// Loads the key pair stored at `path`.
///
/// Returns `Ok(None)` if the file does not exist, or if it does not hold
/// exactly 32 bytes (a warning is logged and the file is left untouched).
///
/// # Errors
/// Returns an error if the file cannot be read or the bytes are not a valid
/// private key.
pub fn load_key_file(path: &Path, address_version: u8) -> io::Result<Option<KeyPair>> {
    let data = match fs::read(path) {
        Ok(data) => Zeroizing::new(data),
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };

    if data.len() != PRIVATE_KEY_LEN {
        warn!(
            "Ignoring key file {}: expected {PRIVATE_KEY_LEN} bytes, found {}",
            path.display(),
            data.len()
        );
        return Ok(None);
    }

    let key = KeyPair::with_address_version(&data, address_version)
        .map_err(|e| io::Error::other(format!("key file {}: {e}", path.display())))?;
    info!("Loaded invoker key {} from {}", key.address(), path.display());
    Ok(Some(key))
}

/// Writes the raw private key of `key` to `path`, creating parent directories.
pub fn save_key_file(path: &Path, key: &KeyPair) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, key.private_key())?;
    info!("Saved invoker key {} to {}", key.address(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::script_hash::DEFAULT_ADDRESS_VERSION;
    use tempfile::tempdir;

    #[test]
    fn missing_file_is_not_an_error() {
        let dir = tempdir().unwrap();
        let loaded = load_key_file(&dir.path().join("none.key"), DEFAULT_ADDRESS_VERSION).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_KEY_FILE);
        let key = KeyPair::random();

        save_key_file(&path, &key).unwrap();
        let loaded = load_key_file(&path, DEFAULT_ADDRESS_VERSION)
            .unwrap()
            .unwrap();

        assert_eq!(loaded.private_key(), key.private_key());
        assert_eq!(loaded.address(), key.address());
    }

    #[test]
    fn file_holds_only_raw_secret() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_KEY_FILE);
        let key = KeyPair::new(&[0x01; PRIVATE_KEY_LEN]).unwrap();

        save_key_file(&path, &key).unwrap();
        assert_eq!(fs::read(&path).unwrap(), vec![0x01; PRIVATE_KEY_LEN]);
    }

    #[test]
    fn wrong_length_file_is_ignored() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_KEY_FILE);
        fs::write(&path, [0x01; 33]).unwrap();

        assert!(load_key_file(&path, DEFAULT_ADDRESS_VERSION).unwrap().is_none());
        assert_eq!(fs::read(&path).unwrap().len(), 33);
    }

    #[test]
    fn invalid_scalar_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_KEY_FILE);
        fs::write(&path, [0u8; PRIVATE_KEY_LEN]).unwrap();

        let err = load_key_file(&path, DEFAULT_ADDRESS_VERSION).unwrap_err();
        assert!(err.to_string().contains("not a valid P-256 scalar"));
    }

    #[test]
    fn load_applies_address_version() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_KEY_FILE);
        let key = KeyPair::new(&[0x01; PRIVATE_KEY_LEN]).unwrap();
        save_key_file(&path, &key).unwrap();

        let loaded = load_key_file(&path, 0x35).unwrap().unwrap();
        assert_eq!(loaded.address_version(), 0x35);
        assert_eq!(loaded.script_hash(), key.script_hash());
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("dirs").join(DEFAULT_KEY_FILE);

        save_key_file(&path, &KeyPair::random()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn save_overwrites_existing_key() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_KEY_FILE);
        let first = KeyPair::random();
        let second = KeyPair::random();

        save_key_file(&path, &first).unwrap();
        save_key_file(&path, &second).unwrap();

        let loaded = load_key_file(&path, DEFAULT_ADDRESS_VERSION)
            .unwrap()
            .unwrap();
        assert_eq!(loaded.address(), second.address());
    }
}
