use mln_vault::prelude::*;
use proptest::prelude::*;

fn vault(ikm: &[u8]) -> Vault<ChaCha> {
    Vault::builder().derived_key(ikm, "salt", "property").unwrap().build().unwrap()
}

proptest! {
    #[test]
    fn roundtrip_arbitrary_bytes(data in proptest::collection::vec(any::<u8>(), 0..2048)) {
        let vault = vault(b"ikm");

        let sealed = vault.seal(&data, b"ctx").unwrap();
        let unsealed = vault.unseal(&sealed, b"ctx").unwrap();
        prop_assert_eq!(&data, &*unsealed);
    }

    #[test]
    fn wrong_key_never_opens(
        data in proptest::collection::vec(any::<u8>(), 0..256),
        key_a in proptest::collection::vec(any::<u8>(), 1..64),
        key_b in proptest::collection::vec(any::<u8>(), 1..64),
    ) {
        prop_assume!(key_a != key_b);

        let sealed = vault(&key_a).seal(&data, b"ctx").unwrap();
        prop_assert!(vault(&key_b).unseal(&sealed, b"ctx").is_err());
    }
}
