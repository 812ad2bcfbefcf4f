mod fixtures;

use fixtures::{LOGIN, SETUP, config, root, system};
use mln::auth::{AuthError, LOGIN_BANNER};
use mln::domain::config::CipherKind;
use mln::kernel::console::ScriptedConsole;
use mln::{BANNER, BootError, System};
use mln::session::SessionState;

const SETUP_NOTICE: &str = "No saved credentials found. Please set up a username and password.";

#[test]
fn first_boot_sets_up_credentials_then_logs_in() {
    let tmp = tempfile::tempdir().unwrap();
    let root = root(&tmp);
    let mut system = system(&root, &[&SETUP[..], &LOGIN[..], &["ls", "die"][..]].concat());

    system.run().unwrap();

    let console = system.console();
    assert!(console.printed(SETUP_NOTICE));
    assert!(console.printed(LOGIN_BANNER));
    assert!(console.printed("Login successful!"));
    assert!(console.printed(BANNER[1]));
    assert!(console.printed("etc"));
    assert!(console.printed("Shutting Down..."));
    assert!(root.join("etc").join("keyfile").is_file());
    assert!(root.join("etc").join("credentials").is_file());
}

#[test]
fn later_boots_reuse_key_and_credentials() {
    let tmp = tempfile::tempdir().unwrap();
    let root = root(&tmp);
    system(&root, &[&SETUP[..], &LOGIN[..], &["die"][..]].concat()).run().unwrap();
    let key = std::fs::read(root.join("etc").join("keyfile")).unwrap();

    let mut second = system(&root, &["alice", "wrong", "alice", "pw123!", "die"][..]);
    second.run().unwrap();

    let console = second.console();
    assert!(!console.printed(SETUP_NOTICE));
    assert!(console.printed("Password is incorrect."));
    assert!(console.printed("Login successful!"));
    assert_eq!(std::fs::read(root.join("etc").join("keyfile")).unwrap(), key);
}

#[test]
fn relive_reboots_into_a_fresh_login() {
    let tmp = tempfile::tempdir().unwrap();
    let root = root(&tmp);
    let script = [
        &SETUP[..],
        &LOGIN[..],
        &["mkdir notes", "cd notes", "touch a.txt", "relive"][..],
        &LOGIN[..],
        &["ls", "cat notes/a.txt", "die"][..],
    ]
    .concat();
    let mut system = system(&root, &script);

    system.run().unwrap();

    let console = system.console();
    assert_eq!(console.count(SETUP_NOTICE), 1);
    assert_eq!(console.count(LOGIN_BANNER), 2);
    assert_eq!(console.count(BANNER[1]), 2);
    assert!(console.printed("Rebooting..."));
    assert!(console.printed("etc notes"), "persisted files survive, cwd is reset");
    assert_eq!(console.prompts().last().map(String::as_str), Some("/ >>> "));
    assert_eq!(console.remaining(), 0);
}

#[test]
fn reinitialize_starts_at_the_root() {
    let tmp = tempfile::tempdir().unwrap();
    let root = root(&tmp);
    let mut system = system(&root, &[&SETUP[..], &LOGIN[..]].concat());

    let session = system.reinitialize().unwrap();

    assert!(session.current().is_root());
    assert_eq!(session.state(), SessionState::Running);
    assert_eq!(session.prompt(), "/ >>> ");
}

#[test]
fn banner_can_be_disabled() {
    let tmp = tempfile::tempdir().unwrap();
    let root = root(&tmp);
    let mut config = config(&root, CipherKind::Aes);
    config.shell.banner = false;

    let mut system = System::builder()
        .config(config)
        .console(ScriptedConsole::new([&SETUP[..], &LOGIN[..], &["die"][..]].concat()))
        .build();
    system.run().unwrap();

    assert!(!system.console().printed(BANNER[1]));
}

#[test]
fn end_of_input_during_login_is_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    let root = root(&tmp);
    let mut system = system(&root, &[&SETUP[..], &["alice"][..]].concat());

    let err = system.run().unwrap_err();
    assert!(matches!(err, BootError::Auth { source: AuthError::InputClosed { .. }, .. }));
}

#[test]
fn end_of_input_at_the_prompt_shuts_down() {
    let tmp = tempfile::tempdir().unwrap();
    let root = root(&tmp);
    let mut system = system(&root, &[&SETUP[..], &LOGIN[..]].concat());

    system.run().unwrap();
    assert!(system.console().printed("Shutting Down..."));
}

#[test]
fn switching_cipher_after_setup_fails_closed() {
    let tmp = tempfile::tempdir().unwrap();
    let root = root(&tmp);
    system(&root, &[&SETUP[..], &LOGIN[..], &["die"][..]].concat()).run().unwrap();

    let mut system = System::builder()
        .config(config(&root, CipherKind::Chacha))
        .console(ScriptedConsole::new(LOGIN))
        .build();

    let err = system.run().unwrap_err();
    assert!(matches!(err, BootError::Auth { source: AuthError::Vault { .. }, .. }));
    assert!(system.console().prompts().is_empty(), "no login after a failed load");
}

#[test]
fn chacha_installations_boot() {
    let tmp = tempfile::tempdir().unwrap();
    let root = root(&tmp);

    for script in [[&SETUP[..], &LOGIN[..], &["die"][..]].concat(), [&LOGIN[..], &["die"][..]].concat()] {
        let mut system = System::builder()
            .config(config(&root, CipherKind::Chacha))
            .console(ScriptedConsole::new(script))
            .build();
        system.run().unwrap();
        assert!(system.console().printed("Login successful!"));
    }
}

#[test]
fn credentials_survive_an_edit_attempt_from_the_shell() {
    let tmp = tempfile::tempdir().unwrap();
    let root = root(&tmp);
    let credentials = root.join("etc").join("credentials");
    let script = [
        &SETUP[..],
        &LOGIN[..],
        &["nate etc/credentials", "x", ":wq", "relive"][..],
        &LOGIN[..],
        &["die"][..],
    ]
    .concat();
    let mut system = system(&root, &script);
    system.run().unwrap();

    let console = system.console();
    assert!(!console.printed("File 'etc/credentials' saved."));
    assert!(
        console.printed("Cannot edit 'etc/credentials'.")
            || console.printed("Cannot save 'etc/credentials'.")
    );
    assert_eq!(console.count("Login successful!"), 2);
    assert!(std::fs::metadata(&credentials).unwrap().permissions().readonly());
}
