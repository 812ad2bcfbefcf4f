use std::borrow::Cow;

/// A specialized [`SessionError`] enum of this crate.
///
/// Failing file operations inside the shell are reported to the user, not returned. These
/// errors end the session.
#[mln_derive::mln_error]
pub enum SessionError {
    /// The sandbox could not be opened.
    #[error("Session storage error{}: {source}", format_context(.context))]
    Storage { source: mln_storage::StorageError, context: Option<Cow<'static, str>> },

    /// The console failed.
    #[error("Console I/O error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Internal session error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
