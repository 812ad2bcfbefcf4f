use config::{Config, File, FileFormat};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::Path;
use tracing::debug;

/// Custom error type for config loading.
#[mln_derive::mln_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads a configuration structure from an optional TOML file.
///
/// A missing file is not an error: `T` is then built purely from its serde defaults, so every
/// field of `T` must carry `#[serde(default)]` (directly or through its container). Keys that
/// are present override the defaults one by one. Environment variables are never consulted.
///
/// # Errors
/// Returns [`ConfigError::Config`] if the file exists but is not valid TOML, or if its contents
/// do not match the structure of `T`.
///
/// # Example
/// ```rust
/// use mln_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// #[serde(default)]
/// struct AppConfig {
///     pause_ms: u64,
/// }
///
/// let cfg: AppConfig = load_config("missing.toml").unwrap();
/// assert_eq!(cfg.pause_ms, 0);
/// ```
pub fn load_config<T>(path: impl AsRef<Path>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let path = path.as_ref();

    debug!(path = %path.display(), exists = path.is_file(), "Loading config");

    let config = Config::builder()
        .add_source(File::from(path).format(FileFormat::Toml).required(false))
        .build()
        .context(format!("Failed to read {}", path.display()))?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
