//! Authentication feature slice.
//!
//! * [`CredentialVault`] creates the single credential record on first boot and loads it on
//!   every later one. The record only ever reaches the disk sealed by the installation key.
//! * [`AuthGate`] runs the login loop against a loaded [`CredentialRecord`].
//!
//! Plaintext usernames and passwords live only as long as one loop iteration; what is kept,
//! compared and persisted are their SHA-256 digests.

mod digest;
mod error;
mod gate;
mod record;
mod vault;

pub use crate::digest::digest;
pub use crate::error::{AuthError, AuthErrorExt};
pub use crate::gate::{AuthGate, LOGIN_BANNER};
pub use crate::record::CredentialRecord;
pub use crate::vault::{CREDENTIALS_CONTEXT, CREDENTIALS_KEY_PURPOSE, CredentialVault};
