//! Key management and authenticated envelope encryption for secrets kept at rest.
//!
//! The crate has two halves:
//!
//! * [`KeyStore`] owns the installation key file: it is created once with fresh CSPRNG output
//!   and loaded unchanged afterwards.
//! * [`Vault`] seals and unseals byte payloads with an AEAD cipher whose key is derived from
//!   the installation key through HKDF-SHA256.
//!
//! ## Envelope Format
//!
//! ```text
//! [V(1)][FLAGS(1)][NONCE(12)][CIPHERTEXT(N)][TAG(16)]
//! ```
//!
//! `V` is the format version (currently `1`); `FLAGS` is reserved and must be zero. The
//! caller-supplied context bytes are bound as associated data, so an envelope only opens
//! under the same key *and* the same context. Every failure to open an envelope is an error;
//! there is no fallback value.
//!
//! ## Nonce Policy
//!
//! Every seal draws a random 96-bit nonce. This vault seals a handful of records per
//! installation lifetime, far below the birthday bound for random nonces.
//!
//! ## Example
//!
//! ```rust
//! use mln_vault::prelude::*;
//!
//! # fn main() -> Result<(), VaultError> {
//! let tmp = tempfile::tempdir().unwrap();
//! let store = KeyStore::new(tmp.path().join("etc/keyfile"));
//! let key = store.ensure_key()?;
//!
//! let vault = Vault::<Aes>::builder().derived_key(&key[..], b"salt", b"purpose")?.build()?;
//!
//! let sealed = vault.seal(b"secret", b"ctx")?;
//! let opened = vault.unseal(&sealed, b"ctx")?;
//! assert_eq!(opened.as_slice(), b"secret");
//! assert!(vault.unseal(&sealed, b"other").is_err());
//! # Ok(())
//! # }
//! ```

mod builder;
mod engine;
mod error;
mod file;
mod keystore;
mod types;

pub use builder::VaultBuilder;
pub use engine::Vault;
pub use error::{VaultError, VaultErrorExt};
pub use file::create_exclusive;
pub use keystore::{KEY_LEN, KeyBytes, KeyStore};
pub use types::{Envelope, VaultCipher};

pub mod prelude {
    pub use crate::engine::Vault;
    pub use crate::error::{VaultError, VaultErrorExt};
    pub use crate::keystore::{KeyBytes, KeyStore};
    pub use crate::types::{Aes, ChaCha, Envelope};
}

pub mod algorithms {
    pub use crate::types::{Aes, ChaCha, VaultCipher};
}
