//! The sealed credential record on disk.

use crate::error::{AuthError, AuthErrorExt};
use crate::record::CredentialRecord;
use mln_kernel::console::Console;
use mln_vault::algorithms::{Aes, VaultCipher};
use mln_vault::{KeyBytes, Vault, create_exclusive};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use zeroize::Zeroizing;

/// Associated data binding the envelope to the credential record.
pub const CREDENTIALS_CONTEXT: &[u8] = b"mln.credentials.v1";
/// HKDF purpose of the credential cipher key.
pub const CREDENTIALS_KEY_PURPOSE: &[u8] = b"v1_credentials";
const CREDENTIALS_KEY_SALT: &[u8] = b"mln-os";

pub(crate) const SETUP_NOTICE: &str =
    "No saved credentials found. Please set up a username and password.";
pub(crate) const EMPTY_USERNAME: &str = "Username cannot be empty. Try again.";
pub(crate) const PASSWORD_MISMATCH: &str = "Passwords do not match. Please try again.";
pub(crate) const SETUP_DONE: &str = "Username and password successfully created!";

/// Owns the credential envelope path and the vault that seals it.
pub struct CredentialVault<C: VaultCipher = Aes> {
    vault: Vault<C>,
    path: PathBuf,
}

impl<C: VaultCipher> std::fmt::Debug for CredentialVault<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialVault")
            .field("vault", &self.vault)
            .field("path", &self.path)
            .finish()
    }
}

impl<C: VaultCipher> CredentialVault<C> {
    /// Derives the credential cipher key from the installation key.
    ///
    /// # Errors
    /// Returns [`AuthError::Vault`] if the key cannot be derived.
    pub fn open(key: &KeyBytes, path: impl Into<PathBuf>) -> Result<Self, AuthError> {
        let vault = Vault::<C>::builder()
            .derived_key(&key[..], CREDENTIALS_KEY_SALT, CREDENTIALS_KEY_PURPOSE)?
            .build()
            .context("Building credential vault")?;
        Ok(Self::new(vault, path))
    }

    #[must_use]
    pub fn new(vault: Vault<C>, path: impl Into<PathBuf>) -> Self {
        Self { vault, path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the stored record, running first-time setup when none exists.
    ///
    /// An existing envelope that cannot be read, opened or parsed is an error. It is never
    /// replaced by new credentials.
    ///
    /// # Errors
    /// * [`AuthError::Io`] If the file cannot be read.
    /// * [`AuthError::Vault`] If the envelope does not open under this key.
    /// * [`AuthError::CorruptRecord`] If the plaintext is not a record.
    /// * Anything [`CredentialVault::create`] returns.
    pub fn load(&self, console: &mut dyn Console) -> Result<CredentialRecord, AuthError> {
        let sealed = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return self.create(console),
            Err(e) => {
                return Err(e).context(format!("Reading {}", self.path.display()));
            },
        };

        let plain = self.vault.unseal(&sealed, CREDENTIALS_CONTEXT).context("Opening credentials")?;
        let text = std::str::from_utf8(&plain).map_err(|_| AuthError::CorruptRecord {
            message: "record is not UTF-8".into(),
            context: None,
        })?;
        let record = CredentialRecord::parse(text)?;

        info!(path = %self.path.display(), "Loaded credentials");
        Ok(record)
    }

    /// Interactive first-time setup.
    ///
    /// Loops until the username is non-empty and the password matches its confirmation, then
    /// seals the record, writes it owner-read-only and returns it.
    ///
    /// # Errors
    /// * [`AuthError::InputClosed`] If input ends before setup completes.
    /// * [`AuthError::Io`] If the console or the file write fails.
    /// * [`AuthError::Vault`] If sealing fails.
    pub fn create(&self, console: &mut dyn Console) -> Result<CredentialRecord, AuthError> {
        console.write_line(SETUP_NOTICE)?;

        let record = loop {
            let entered =
                Zeroizing::new(required(console.read_line("New Username: ")?, "New Username")?);
            let password =
                Zeroizing::new(required(console.read_secret("New Password: ")?, "New Password")?);
            let confirm = Zeroizing::new(required(
                console.read_secret("Confirm Password: ")?,
                "Confirm Password",
            )?);

            let username = entered.trim();
            if username.is_empty() {
                console.write_line(EMPTY_USERNAME)?;
                continue;
            }

            if *password != *confirm {
                console.write_line(PASSWORD_MISMATCH)?;
                continue;
            }

            break CredentialRecord::from_plaintext(username, &password);
        };

        let sealed = self.vault.seal(record.to_text().as_bytes(), CREDENTIALS_CONTEXT)?;
        self.persist(&sealed)?;

        info!(path = %self.path.display(), "Created credentials");
        console.write_line(SETUP_DONE)?;
        Ok(record)
    }

    fn persist(&self, sealed: &[u8]) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).context(format!("Creating {}", parent.display()))?;
        }

        create_exclusive(&self.path, 0o400, |file| file.write_all(sealed))
            .context(format!("Writing {}", self.path.display()))?;

        #[cfg(not(unix))]
        {
            let mut permissions = fs::metadata(&self.path)
                .context(format!("Inspecting {}", self.path.display()))?
                .permissions();
            permissions.set_readonly(true);
            fs::set_permissions(&self.path, permissions)
                .context(format!("Protecting {}", self.path.display()))?;
        }

        Ok(())
    }
}

/// Unwraps one console read, treating end of input as fatal.
pub(crate) fn required(value: Option<String>, field: &'static str) -> Result<String, AuthError> {
    value.ok_or(AuthError::InputClosed {
        message: "end of input".into(),
        context: Some(field.into()),
    })
}
