//! # Vault Errors
//!
//! [`VaultError`] covers key file I/O, key validation and every way an envelope can fail to
//! seal or open. All of them are fatal to the caller: without the key or the sealed record
//! nothing downstream can work.

use std::borrow::Cow;

/// A specialized [`VaultError`] enum for vault-related failures.
#[mln_derive::mln_error]
pub enum VaultError {
    /// Key file could not be created, written or read.
    #[error("Key store I/O error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    /// Key material on disk has the wrong shape.
    #[error("Invalid key{}: {message}", format_context(.context))]
    InvalidKey { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Failure during the encryption process.
    #[error("Encryption error{}: {message}", format_context(.context))]
    Encryption { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Failure during the decryption process.
    ///
    /// This usually indicates an incorrect key, a mismatched context (AAD), or tampered data.
    #[error("Decryption error{}: {message}", format_context(.context))]
    Decryption { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The envelope is malformed, too short, or of an unknown version.
    #[error("Invalid envelope{}: {message}", format_context(.context))]
    InvalidPayload { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The vault or builder is incorrectly configured.
    #[error("Invalid configuration{}: {message}", format_context(.context))]
    InvalidConfiguration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues such as an unavailable system RNG.
    #[error("Internal vault error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
