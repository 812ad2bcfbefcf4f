use mln_vault::prelude::*;
use std::path::Path;

pub const CONTEXT: &[u8] = b"mln.test.v1";

/// Builds a vault keyed from the installation key stored under `root`.
/// # Panics
/// * If the key cannot be created or the vault cannot be built.
#[must_use]
pub fn vault_at(root: &Path) -> Vault {
    let key = KeyStore::new(root.join("etc").join("keyfile")).ensure_key().expect("key store");
    Vault::builder()
        .derived_key(&key[..], b"mln-test", b"credentials")
        .expect("key derivation")
        .build()
        .expect("Vault setup failed")
}
