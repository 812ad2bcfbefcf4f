use crate::layout::DEFAULT_ROOT;
use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level configuration, read from the optional `mln.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SystemConfigInner {
    /// Installation root; doubles as the sandbox root of the shell.
    pub root: PathBuf,
    pub shell: ShellConfig,
    pub security: SecurityConfig,
    pub logging: LoggingConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct SystemConfig {
    #[serde(flatten, default)]
    inner: Arc<SystemConfigInner>,
}

impl Deref for SystemConfig {
    type Target = SystemConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for SystemConfig {
    fn deref_mut(&mut self) -> &mut SystemConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Pause in milliseconds before `die` / `relive` take effect.
    pub pause_ms: u64,
    /// Print the boot banner after a successful login.
    pub banner: bool,
}

#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub cipher: CipherKind,
}

/// AEAD used for the credential envelope.
///
/// Envelopes sealed with one cipher cannot be opened with the other.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CipherKind {
    /// AES-256-GCM.
    #[default]
    Aes,
    /// ChaCha20-Poly1305.
    Chacha,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub console: bool,
    pub json: bool,
    pub max_files: usize,
    /// Log directory; `<root>/var/log` when unset.
    pub directory: Option<PathBuf>,
}

// --- Default ---

impl Default for SystemConfigInner {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            shell: ShellConfig::default(),
            security: SecurityConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self { pause_ms: 1000, banner: true }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            console: false,
            json: false,
            max_files: 7,
            directory: None,
        }
    }
}
