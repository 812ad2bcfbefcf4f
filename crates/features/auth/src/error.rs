use std::borrow::Cow;

/// A specialized [`AuthError`] enum of this crate.
///
/// Every variant is fatal to the boot that raised it. Wrong usernames or passwords are not
/// errors; the gate reports them and keeps asking.
#[mln_derive::mln_error]
pub enum AuthError {
    /// The credential envelope could not be sealed or opened.
    #[error("Credential vault error{}: {source}", format_context(.context))]
    Vault { source: mln_vault::VaultError, context: Option<Cow<'static, str>> },

    /// The credential file or the console failed.
    #[error("Credential I/O error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    /// The envelope opened but does not hold a well-formed record.
    #[error("Corrupt credential record{}: {message}", format_context(.context))]
    CorruptRecord { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Input ended before setup or login finished.
    #[error("Input closed{}: {message}", format_context(.context))]
    InputClosed { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal auth error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
