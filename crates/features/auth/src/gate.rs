use crate::error::AuthError;
use crate::record::CredentialRecord;
use crate::vault::required;
use mln_kernel::console::Console;
use tracing::{info, warn};
use zeroize::Zeroizing;

pub const LOGIN_BANNER: &str = "---[MLN OS Login Screen]---";

const USERNAME_INCORRECT: &str = "Username is incorrect.";
const PASSWORD_INCORRECT: &str = "Password is incorrect.";
const LOGIN_SUCCESSFUL: &str = "Login successful!";

/// The login loop in front of the shell.
#[derive(Debug)]
pub struct AuthGate {
    record: CredentialRecord,
}

impl AuthGate {
    #[must_use]
    pub const fn new(record: CredentialRecord) -> Self {
        Self { record }
    }

    /// Prompts until both username and password match the stored record.
    ///
    /// The username is checked first; the password is only asked for after a username match.
    /// There is no attempt limit.
    ///
    /// # Errors
    /// * [`AuthError::InputClosed`] If input ends before a successful login.
    /// * [`AuthError::Io`] If the console fails.
    pub fn authenticate(&self, console: &mut dyn Console) -> Result<(), AuthError> {
        console.write_line(LOGIN_BANNER)?;
        console.write_line("")?;

        let mut attempts: u64 = 0;
        loop {
            attempts += 1;

            let username = Zeroizing::new(required(console.read_line("Username: ")?, "Username")?);
            if !self.record.matches_username(username.trim()) {
                warn!(attempt = attempts, field = "username", "Login failed");
                console.write_line(USERNAME_INCORRECT)?;
                continue;
            }

            let password = Zeroizing::new(required(console.read_secret("Password: ")?, "Password")?);
            if !self.record.matches_password(&password) {
                warn!(attempt = attempts, field = "password", "Login failed");
                console.write_line(PASSWORD_INCORRECT)?;
                continue;
            }

            info!(attempts, "Login successful");
            console.write_line(LOGIN_SUCCESSFUL)?;
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mln_kernel::console::ScriptedConsole;

    fn gate() -> AuthGate {
        AuthGate::new(CredentialRecord::from_plaintext("alice", "pw123!"))
    }

    #[test]
    fn test_password_is_not_asked_after_wrong_username() {
        let mut console = ScriptedConsole::new(["bob", "alice", "pw123!"]);
        gate().authenticate(&mut console).unwrap();

        assert_eq!(console.prompts(), ["Username: ", "Username: ", "Password: "]);
        assert!(console.printed(USERNAME_INCORRECT));
    }

    #[test]
    fn test_banner_is_printed_once() {
        let mut console = ScriptedConsole::new(["alice", "x", "alice", "y", "alice", "pw123!"]);
        gate().authenticate(&mut console).unwrap();

        assert_eq!(console.count(LOGIN_BANNER), 1);
        assert_eq!(console.count(PASSWORD_INCORRECT), 2);
        assert_eq!(console.count(LOGIN_SUCCESSFUL), 1);
    }

    #[test]
    fn test_end_of_input_is_fatal() {
        let mut console = ScriptedConsole::new(["alice"]);
        let result = gate().authenticate(&mut console);
        assert!(matches!(result, Err(AuthError::InputClosed { .. })));
    }
}
