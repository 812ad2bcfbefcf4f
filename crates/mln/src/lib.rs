//! Facade crate for MLN OS.
//!
//! Composes the vault, auth and session slices into the boot sequence and keeps application
//! crates down to configuration and logging. Business logic belongs in the slices.
//!
//! ## Usage
//! - Load a [`SystemConfig`](domain::config::SystemConfig) and pick a console.
//! - Build a [`System`] and call [`System::run`]; it returns when the user shuts down.

mod error;
mod system;

pub use crate::error::{BootError, BootErrorExt};
pub use crate::system::{BANNER, System, SystemBuilder};

pub use mln_auth as auth;
pub use mln_kernel as kernel;
pub use mln_kernel::domain;
pub use mln_session as session;
