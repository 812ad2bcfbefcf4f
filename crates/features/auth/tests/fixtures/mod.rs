#![allow(dead_code)]

use mln_auth::CredentialVault;
use mln_vault::KeyStore;
use std::path::Path;

/// Credential vault keyed from the installation key under `root`, as the boot sequence does.
pub fn credential_vault(root: &Path) -> CredentialVault {
    let key = KeyStore::new(root.join("etc").join("keyfile")).ensure_key().unwrap();
    CredentialVault::open(&key, root.join("etc").join("credentials")).unwrap()
}
