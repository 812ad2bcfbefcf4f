//! The confined filesystem handle.
//!
//! Every operation takes a [`VirtualPath`] produced by the [`PathResolver`], maps it under the
//! canonical root and re-validates the physical result before touching the disk.
//!
//! [`PathResolver`]: crate::PathResolver

use crate::builder::SandboxBuilder;
use crate::error::{StorageError, StorageErrorExt};
use crate::maintenance;
use crate::security::{self, VirtualPath};
use std::fs::{self, OpenOptions, Permissions};
use std::io::{self, ErrorKind, Write};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

pub(crate) const TMP_MARKER: &str = ".mlntmp.";

/// The internal shared state of a [`Sandbox`].
#[derive(Debug)]
pub struct SandboxInner {
    /// Canonical physical root; every resolved path must stay below it.
    pub(crate) root: PathBuf,
    pub(crate) tmp_counter: AtomicU64,
}

/// A handle to the sandbox root on disk.
///
/// Cheap to clone; all clones share the same root.
///
/// ```rust
/// use mln_storage::{PathResolver, Sandbox, StorageError, VirtualPath};
///
/// # fn main() -> Result<(), StorageError> {
/// # let tmp = tempfile::tempdir().unwrap();
/// let sandbox = Sandbox::builder().root(tmp.path().join("sda")).create(true).open()?;
///
/// let notes = PathResolver::resolve_target(&VirtualPath::root(), "notes")?;
/// sandbox.create_dir(&notes)?;
///
/// let file = PathResolver::resolve_target(&notes, "a.txt")?;
/// sandbox.write(&file, "hello")?;
/// assert_eq!(sandbox.read_to_string(&file)?, "hello");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Sandbox {
    pub(crate) inner: Arc<SandboxInner>,
}

impl Deref for Sandbox {
    type Target = SandboxInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Sandbox {
    #[must_use = "The sandbox is not opened until you call .open()"]
    pub fn builder() -> SandboxBuilder {
        SandboxBuilder::new()
    }

    /// Canonical physical root of the sandbox.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a virtual path to its physical location.
    ///
    /// # Errors
    /// * [`StorageError::PathTraversalAttempt`] If the existing part of the path leads outside
    ///   the root, e.g. through a symlink.
    /// * [`StorageError::Io`] If the path cannot be inspected.
    pub fn locate(&self, path: &VirtualPath) -> Result<PathBuf, StorageError> {
        security::validate_physical(&self.root, path)
    }

    /// `true` if `path` names an existing directory.
    ///
    /// # Errors
    /// Same as [`Sandbox::locate`].
    pub fn is_dir(&self, path: &VirtualPath) -> Result<bool, StorageError> {
        Ok(self.locate(path)?.is_dir())
    }

    /// `true` if `path` names an existing regular file.
    ///
    /// # Errors
    /// Same as [`Sandbox::locate`].
    pub fn is_file(&self, path: &VirtualPath) -> Result<bool, StorageError> {
        Ok(self.locate(path)?.is_file())
    }

    /// Names of the entries directly inside `dir`, sorted.
    ///
    /// # Errors
    /// * [`StorageError::DirectoryNotFound`] If `dir` is not a directory.
    /// * [`StorageError::Io`] If the directory cannot be read.
    pub fn list(&self, dir: &VirtualPath) -> Result<Vec<String>, StorageError> {
        let resolved = self.locate(dir)?;
        if !resolved.is_dir() {
            return Err(StorageError::DirectoryNotFound {
                message: dir.to_string().into(),
                context: None,
            });
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&resolved).context(format!("Listing {dir}"))? {
            let entry = entry.context(format!("Listing {dir}"))?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort_unstable();
        Ok(names)
    }

    /// Reads a regular file as text. Invalid UTF-8 is replaced, never rejected.
    ///
    /// # Errors
    /// * [`StorageError::FileNotFound`] If `path` is not a regular file.
    /// * [`StorageError::Io`] If the file cannot be read.
    pub fn read_to_string(&self, path: &VirtualPath) -> Result<String, StorageError> {
        let resolved = self.locate(path)?;
        if !resolved.is_file() {
            return Err(StorageError::FileNotFound {
                message: path.to_string().into(),
                context: None,
            });
        }

        let bytes = fs::read(&resolved).context(format!("Read failed: {path}"))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Creates an empty file, truncating an existing one.
    ///
    /// # Errors
    /// [`StorageError::Io`] If the parent is missing or the file cannot be created.
    pub fn touch(&self, path: &VirtualPath) -> Result<(), StorageError> {
        let resolved = self.locate(path)?;
        fs::File::create(&resolved).context(format!("Failed to create {path}"))?;
        debug!(path = %path, "File created");
        Ok(())
    }

    /// Creates a directory and any missing parents. Existing directories are left alone.
    ///
    /// # Errors
    /// [`StorageError::Io`] If a component exists as a file or cannot be created.
    pub fn create_dir(&self, path: &VirtualPath) -> Result<(), StorageError> {
        let resolved = self.locate(path)?;
        fs::create_dir_all(&resolved).context(format!("Failed to create directory {path}"))?;
        debug!(path = %path, "Directory created");
        Ok(())
    }

    /// Deletes a regular file (or a symlink, never its target).
    ///
    /// # Errors
    /// * [`StorageError::FileNotFound`] If `path` is missing or a directory.
    /// * [`StorageError::Io`] If deletion fails.
    pub fn remove_file(&self, path: &VirtualPath) -> Result<(), StorageError> {
        let resolved = self.locate(path)?;
        match fs::symlink_metadata(&resolved) {
            Ok(meta) if !meta.is_dir() => {},
            Ok(_) => {
                return Err(StorageError::FileNotFound {
                    message: path.to_string().into(),
                    context: Some("Target is a directory".into()),
                });
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StorageError::FileNotFound {
                    message: path.to_string().into(),
                    context: None,
                });
            },
            Err(e) => return Err(e).context(format!("Failed to inspect {path}")),
        }

        fs::remove_file(&resolved).context(format!("Failed to delete {path}"))?;
        debug!(path = %path, "File deleted");
        Ok(())
    }

    /// Deletes a directory and everything below it. The root itself cannot be removed.
    ///
    /// # Errors
    /// * [`StorageError::DirectoryNotFound`] If `path` is the root, missing or not a directory.
    /// * [`StorageError::Io`] If deletion fails.
    pub fn remove_dir_all(&self, path: &VirtualPath) -> Result<(), StorageError> {
        if path.is_root() {
            return Err(StorageError::DirectoryNotFound {
                message: path.to_string().into(),
                context: Some("The sandbox root cannot be removed".into()),
            });
        }

        let resolved = self.locate(path)?;
        let is_real_dir = fs::symlink_metadata(&resolved).is_ok_and(|meta| meta.is_dir());
        if !is_real_dir {
            return Err(StorageError::DirectoryNotFound {
                message: path.to_string().into(),
                context: None,
            });
        }

        fs::remove_dir_all(&resolved).context(format!("Failed to delete directory {path}"))?;
        debug!(path = %path, "Directory deleted");
        Ok(())
    }

    /// Replaces the contents of a file atomically.
    ///
    /// The data goes to a unique `.mlntmp.<n>` sibling first, is synced, then renamed over the
    /// target, so a crash never leaves a half-written file behind. An existing target keeps its
    /// permissions; a read-only one is refused.
    ///
    /// # Errors
    /// [`StorageError::Io`] If the target is read-only or any step fails. The existing file is
    /// untouched in that case.
    pub fn write(&self, path: &VirtualPath, data: impl AsRef<[u8]>) -> Result<(), StorageError> {
        let resolved = self.locate(path)?;
        let permissions = match fs::metadata(&resolved) {
            Ok(meta) if meta.permissions().readonly() => {
                return Err(io::Error::new(ErrorKind::PermissionDenied, "target is read-only"))
                    .context(format!("Refusing to overwrite {path}"));
            },
            Ok(meta) => Some(meta.permissions()),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => return Err(e).context(format!("Failed to inspect {path}")),
        };
        let temp = unique_tmp_path(&resolved, &self.tmp_counter);

        if let Err(err) = swap_in(&temp, &resolved, data.as_ref(), permissions) {
            let _ = fs::remove_file(&temp);
            return Err(err);
        }

        if let Some(parent) = resolved.parent() {
            sync_dir(parent);
        }

        debug!(path = %path, "File saved atomically");
        Ok(())
    }

    /// Removes temp files orphaned by an interrupted [`Sandbox::write`].
    pub fn purge_tmp(&self) {
        maintenance::purge_tmp(&self.root);
    }
}

fn swap_in(
    temp: &Path,
    target: &Path,
    data: &[u8],
    permissions: Option<Permissions>,
) -> Result<(), StorageError> {
    let mut file = OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(temp)
        .context(format!("Temp creation failed: {}", temp.display()))?;
    file.write_all(data).context("Write failed")?;
    file.sync_all().context("Hardware sync failed")?;
    drop(file);

    if let Some(permissions) = permissions {
        fs::set_permissions(temp, permissions).context("Copying permissions failed")?;
    }

    fs::rename(temp, target)
        .context(format!("Atomic swap failed: {} -> {}", temp.display(), target.display()))
}

fn sync_dir(path: &Path) {
    match fs::File::open(path) {
        Ok(dir) => {
            if let Err(err) = dir.sync_all() {
                warn!(path = %path.display(), error = %err, "Directory sync failed");
            }
        },
        Err(err) => {
            warn!(path = %path.display(), error = %err, "Directory open failed");
        },
    }
}

fn unique_tmp_path(target: &Path, counter: &AtomicU64) -> PathBuf {
    let counter = counter.fetch_add(1, Ordering::Relaxed);
    let file_name = target.file_name().and_then(|s| s.to_str()).unwrap_or("file");
    target.with_file_name(format!("{file_name}{TMP_MARKER}{counter}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PathResolver;
    use tempfile::TempDir;

    fn sandbox() -> (TempDir, Sandbox) {
        let tmp = TempDir::new().unwrap();
        let sandbox = Sandbox::builder().root(tmp.path()).open().unwrap();
        (tmp, sandbox)
    }

    fn at(raw: &str) -> VirtualPath {
        PathResolver::resolve_target(&VirtualPath::root(), raw).unwrap()
    }

    #[test]
    fn test_tmp_names_are_unique() {
        let counter = AtomicU64::new(1);
        let a = unique_tmp_path(Path::new("/x/a.txt"), &counter);
        let b = unique_tmp_path(Path::new("/x/a.txt"), &counter);
        assert_ne!(a, b);
        assert!(a.to_string_lossy().contains(TMP_MARKER));
    }

    #[test]
    fn test_write_leaves_no_temp_files() {
        let (_tmp, sandbox) = sandbox();
        sandbox.write(&at("a.txt"), "one").unwrap();
        sandbox.write(&at("a.txt"), "two").unwrap();

        assert_eq!(sandbox.list(&VirtualPath::root()).unwrap(), vec!["a.txt"]);
        assert_eq!(sandbox.read_to_string(&at("a.txt")).unwrap(), "two");
    }

    #[test]
    fn test_root_cannot_be_removed() {
        let (_tmp, sandbox) = sandbox();
        let err = sandbox.remove_dir_all(&VirtualPath::root()).unwrap_err();
        assert!(err.is_not_found());
        assert!(sandbox.root().exists());
    }

    #[test]
    fn test_remove_file_refuses_directories() {
        let (_tmp, sandbox) = sandbox();
        sandbox.create_dir(&at("notes")).unwrap();

        let err = sandbox.remove_file(&at("notes")).unwrap_err();
        assert!(matches!(err, StorageError::FileNotFound { .. }));
        assert!(sandbox.is_dir(&at("notes")).unwrap());
    }
}
