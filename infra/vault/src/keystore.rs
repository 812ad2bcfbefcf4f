//! The installation key file.
//!
//! Exactly one key exists per installation. It is generated on the first run, written once,
//! and read back unchanged on every later run. It is never rotated.

use crate::error::{VaultError, VaultErrorExt};
use crate::file::create_exclusive;
use getrandom::fill;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use zeroize::Zeroizing;

/// Length in bytes of the installation key.
pub const KEY_LEN: usize = 32;

/// Raw installation key, wiped from memory on drop.
pub type KeyBytes = Zeroizing<[u8; KEY_LEN]>;

/// Owns the location of the installation key file.
#[derive(Debug, Clone)]
pub struct KeyStore {
    path: PathBuf,
}

impl KeyStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the installation key, creating it on first use.
    ///
    /// When no key file exists, 32 bytes are drawn from the system CSPRNG and written with
    /// owner-only permissions; the parent directory is created as needed. An existing file is
    /// read and returned unchanged.
    ///
    /// # Errors
    /// * [`VaultError::Io`] If the key file cannot be created, written or read.
    /// * [`VaultError::InvalidKey`] If an existing key file is not exactly [`KEY_LEN`] bytes.
    /// * [`VaultError::Internal`] If the system RNG is unavailable.
    pub fn ensure_key(&self) -> Result<KeyBytes, VaultError> {
        match fs::symlink_metadata(&self.path) {
            Ok(_) => self.load(),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let key = generate_key()?;
                self.persist(&key)?;
                info!(path = %self.path.display(), "Generated installation key");
                Ok(key)
            },
            Err(e) => Err(VaultError::Io {
                source: e,
                context: Some(format!("Inspecting {}", self.path.display()).into()),
            }),
        }
    }

    fn load(&self) -> Result<KeyBytes, VaultError> {
        let bytes = Zeroizing::new(
            fs::read(&self.path).context(format!("Reading {}", self.path.display()))?,
        );

        let mut key: KeyBytes = Zeroizing::new([0u8; KEY_LEN]);
        if bytes.len() != KEY_LEN {
            return Err(VaultError::InvalidKey {
                message: format!("expected {KEY_LEN} bytes, found {}", bytes.len()).into(),
                context: Some(self.path.display().to_string().into()),
            });
        }
        key.copy_from_slice(&bytes);

        debug!(path = %self.path.display(), "Loaded installation key");
        Ok(key)
    }

    fn persist(&self, key: &KeyBytes) -> Result<(), VaultError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).context(format!("Creating {}", parent.display()))?;
        }

        create_exclusive(&self.path, 0o600, |file| file.write_all(&key[..]))
            .context(format!("Writing key material to {}", self.path.display()))
    }
}

fn generate_key() -> Result<KeyBytes, VaultError> {
    let mut key: KeyBytes = Zeroizing::new([0u8; KEY_LEN]);
    fill(&mut key[..]).map_err(|e| VaultError::Internal {
        message: e.to_string().into(),
        context: Some("Failed to generate installation key".into()),
    })?;
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_key_is_created_once_and_reloaded() {
        let tmp = tempdir().unwrap();
        let store = KeyStore::new(tmp.path().join("etc").join("keyfile"));

        let first = store.ensure_key().unwrap();
        assert!(store.path().exists());

        let second = store.ensure_key().unwrap();
        assert_eq!(first[..], second[..]);
    }

    #[test]
    fn test_fresh_keys_differ_between_installations() {
        let (tmp_a, tmp_b) = (tempdir().unwrap(), tempdir().unwrap());
        let a = KeyStore::new(tmp_a.path().join("keyfile"));
        let b = KeyStore::new(tmp_b.path().join("keyfile"));

        assert_ne!(a.ensure_key().unwrap()[..], b.ensure_key().unwrap()[..]);
    }

    #[test]
    fn test_truncated_key_is_rejected() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("keyfile");
        fs::write(&path, b"short").unwrap();

        let result = KeyStore::new(&path).ensure_key();
        assert!(matches!(result, Err(VaultError::InvalidKey { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_key_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempdir().unwrap();
        let store = KeyStore::new(tmp.path().join("keyfile"));
        store.ensure_key().unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
