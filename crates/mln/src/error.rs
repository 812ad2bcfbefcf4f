use std::borrow::Cow;

/// A specialized [`BootError`] enum of this crate.
///
/// Anything that stops the system from booting, or a booted shell from running.
#[mln_derive::mln_error]
pub enum BootError {
    /// The installation key could not be created or loaded.
    #[error("Key store error{}: {source}", format_context(.context))]
    Vault { source: mln_vault::VaultError, context: Option<Cow<'static, str>> },

    /// Credential setup, credential loading or login failed.
    #[error("Authentication error{}: {source}", format_context(.context))]
    Auth { source: mln_auth::AuthError, context: Option<Cow<'static, str>> },

    /// The shell session could not start or its console failed.
    #[error("Session error{}: {source}", format_context(.context))]
    Session { source: mln_session::SessionError, context: Option<Cow<'static, str>> },

    /// The installation layout could not be prepared.
    #[error("Boot I/O error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },
}
