pub mod fixtures;

use fixtures::{CONTEXT, vault_at};
use mln_vault::VaultError;
use mln_vault::prelude::*;
use tempfile::tempdir;

#[test]
fn test_tampered_ciphertext_is_rejected() {
    let tmp = tempdir().unwrap();
    let vault = vault_at(tmp.path());
    let mut bytes = vault.seal(b"alice:secret", CONTEXT).unwrap().into_bytes();

    let middle = bytes.len() / 2;
    bytes[middle] ^= 0xff;

    let result = vault.unseal(&bytes, CONTEXT);
    assert!(
        matches!(result, Err(VaultError::Decryption { .. })),
        "Must fail closed when the envelope is modified"
    );
}

#[test]
fn test_unknown_version_is_rejected() {
    let tmp = tempdir().unwrap();
    let vault = vault_at(tmp.path());
    let mut bytes = vault.seal(b"data", CONTEXT).unwrap().into_bytes();
    bytes[0] = 9;

    assert!(matches!(vault.unseal(&bytes, CONTEXT), Err(VaultError::InvalidPayload { .. })));
}

#[test]
fn test_algorithm_agility_cha_cha() {
    let vault =
        Vault::<ChaCha>::builder().derived_key("key", "salt", "id").unwrap().build().unwrap();

    let data = vec![1, 2, 3, 4, 5];
    let sealed = vault.seal(&data, b"test").unwrap();
    let unsealed = vault.unseal(&sealed, b"test").unwrap();

    assert_eq!(data, *unsealed);
}

#[test]
fn test_ciphers_do_not_open_each_other() {
    let aes = Vault::<Aes>::builder().derived_key("key", "salt", "id").unwrap().build().unwrap();
    let chacha =
        Vault::<ChaCha>::builder().derived_key("key", "salt", "id").unwrap().build().unwrap();

    let sealed = aes.seal(b"data", b"ctx").unwrap();
    assert!(chacha.unseal(sealed.as_slice(), b"ctx").is_err());
}

#[test]
fn test_purpose_separates_keys() {
    let a = Vault::<Aes>::builder().derived_key("ikm", "salt", "credentials").unwrap().build();
    let b = Vault::<Aes>::builder().derived_key("ikm", "salt", "other").unwrap().build();
    let (a, b) = (a.unwrap(), b.unwrap());

    let sealed = a.seal(b"data", b"ctx").unwrap();
    assert!(b.unseal(&sealed, b"ctx").is_err());
}
