//! A confined filesystem for the MLN OS shell.
//!
//! # Core Features
//!
//! - **Lexical resolution**: [`PathResolver`] turns user input into a [`VirtualPath`] relative
//!   to the sandbox root without touching the disk. Escapes are errors, never clamped.
//! - **Physical confinement**: [`Sandbox`] canonicalizes the existing part of every path before
//!   use, so symlinks inside the root cannot lead outside it.
//! - **Atomic writes**: unique temp file + `fsync` + `rename`.
//! - **Self-healing**: temp files orphaned by a crash are purged when the sandbox opens.
//!
//! # Examples
//!
//! ```rust
//! use mln_storage::{PathResolver, Resolution, VirtualPath};
//!
//! let root = VirtualPath::root();
//! assert_eq!(PathResolver::resolve(&root, "..").unwrap(), Resolution::AtRoot);
//! assert!(PathResolver::resolve(&root, "../etc").is_err());
//! ```

mod builder;
mod engine;
mod error;
mod maintenance;
mod security;

pub use builder::SandboxBuilder;
pub use engine::Sandbox;
pub use error::{StorageError, StorageErrorExt};
pub use security::{PathResolver, Resolution, VirtualPath};
