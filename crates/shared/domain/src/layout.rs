//! Where things live inside an installation root.

use std::path::{Path, PathBuf};

/// Optional configuration file, looked up in the working directory.
pub const CONFIG_FILE: &str = "mln.toml";
/// Default installation root when `root` is not configured.
pub const DEFAULT_ROOT: &str = "mln-sda";

pub const ETC_DIR: &str = "etc";
pub const KEY_FILE: &str = "keyfile";
pub const CREDENTIALS_FILE: &str = "credentials";
pub const LOG_DIR: &str = "var/log";

/// Physical paths derived from an installation root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn etc_dir(&self) -> PathBuf {
        self.root.join(ETC_DIR)
    }

    #[must_use]
    pub fn key_file(&self) -> PathBuf {
        self.etc_dir().join(KEY_FILE)
    }

    #[must_use]
    pub fn credentials_file(&self) -> PathBuf {
        self.etc_dir().join(CREDENTIALS_FILE)
    }

    #[must_use]
    pub fn log_dir(&self) -> PathBuf {
        self.root.join(LOG_DIR)
    }
}
