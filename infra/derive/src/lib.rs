#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the MLN OS crates.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! mln-derive.workspace = true
//! thiserror.workspace = true
//! ```
//!
//! Examples are `ignore`d here because a proc-macro crate cannot use its own macros.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Turns a plain enum into the error type of a crate.
///
/// # Injected Behaviors
///
/// * **Derives**: `Debug` and `thiserror::Error` unless already derived.
/// * **Context**: a companion `<Name>Ext` trait adding `.context(..)` to `Result<T, Name>` and to
///   `Result<T, Source>` for every wrapped source type.
/// * **Conversions**: `From<Source>` for each variant holding a `source` field (or a field marked
///   `#[source]` / `#[from]`), so `?` works on upstream errors.
/// * **Internal fallback**: `From<&'static str>` and `From<String>` when an `Internal` variant
///   exists.
/// * **Formatting helper**: a private `format_context` function for the `#[error(..)]` strings.
///
/// # Requirements
///
/// 1. Applied to an **enum** with **named-field** variants only.
/// 2. A `context` field, when present, is `Option<Cow<'static, str>>`.
/// 3. Every variant with a source also has a `context` field.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[mln_derive::mln_error]
/// pub enum KeyError {
///     #[error("Key file I/O error{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal key error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn read_key(path: &std::path::Path) -> Result<Vec<u8>, KeyError> {
///     std::fs::read(path).context("Reading key file")
/// }
/// ```
#[proc_macro_attribute]
pub fn mln_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand(input).into()
}
