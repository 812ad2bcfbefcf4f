mod fixtures;

use fixtures::credential_vault;
use mln_auth::{AuthGate, digest};
use mln_kernel::console::ScriptedConsole;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn created_credentials_reload_unchanged(
        username in "[A-Za-z0-9._@-]{1,24}",
        password in "[ -~]{1,32}",
    ) {
        let tmp = tempfile::tempdir().unwrap();

        let mut setup = ScriptedConsole::new([&username, &password, &password]);
        let created = credential_vault(tmp.path()).load(&mut setup).unwrap();

        let mut boot = ScriptedConsole::new(Vec::<String>::new());
        let loaded = credential_vault(tmp.path()).load(&mut boot).unwrap();

        prop_assert_eq!(&loaded, &created);
        prop_assert_eq!(loaded.username_digest(), digest(&username));
        prop_assert_eq!(loaded.password_digest(), digest(&password));
        prop_assert!(boot.prompts().is_empty());

        let mut login = ScriptedConsole::new([&username, &password]);
        prop_assert!(AuthGate::new(loaded).authenticate(&mut login).is_ok());
    }
}
