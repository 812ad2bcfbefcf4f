//! Kernel utilities shared across slices.
//!
//! Keep this crate lightweight: it owns the configuration loader and the [`console::Console`]
//! boundary every interactive component talks through.
//!
//! ## Config loading
//! ```rust
//! use mln_kernel::config::load_config;
//! use mln_kernel::domain::config::SystemConfig;
//!
//! let cfg: SystemConfig = load_config("does-not-exist.toml").unwrap();
//! assert_eq!(cfg.shell.pause_ms, 1000);
//! ```

pub mod config;
pub mod console;

pub use mln_domain as domain;
