//! # Domain Models
//!
//! Pure types with a single dependency (`serde`). Keep it lean: no I/O or heavy logic, just
//! configuration models and the on-disk layout of an installation.

pub mod config;
pub mod layout;
