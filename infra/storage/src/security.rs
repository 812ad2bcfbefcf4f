//! Path confinement.
//!
//! Two layers keep every path inside the sandbox:
//!
//! 1. [`PathResolver`] works on [`VirtualPath`]s only. It is pure and lexical: it joins a raw
//!    argument onto the current directory, collapses `.` / `..`, and rejects anything that
//!    would climb above the root or that is absolute.
//! 2. [`validate_physical`] runs when a virtual path is mapped onto the disk. It canonicalizes
//!    whatever part of the path exists so that a symlink inside the sandbox cannot lead out.

use crate::engine::TMP_MARKER;
use crate::error::StorageError;
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// A directory or file location relative to the sandbox root.
///
/// Always normalized: no `.`, no `..`, no root or prefix components. The empty path is the
/// root itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct VirtualPath(PathBuf);

impl VirtualPath {
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.as_os_str().is_empty()
    }

    /// The enclosing directory, or `None` at the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        Some(Self(self.0.parent().map(Path::to_path_buf).unwrap_or_default()))
    }

    /// `true` when `self` is `other` or lies below it.
    #[must_use]
    pub fn starts_with(&self, other: &Self) -> bool {
        self.0.starts_with(&other.0)
    }

    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Final component, or `None` at the root.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.0.file_name().and_then(|n| n.to_str())
    }
}

impl fmt::Display for VirtualPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("/")?;
        let mut first = true;
        for part in self.0.components() {
            if !first {
                f.write_str("/")?;
            }
            write!(f, "{}", part.as_os_str().to_string_lossy())?;
            first = false;
        }
        Ok(())
    }
}

/// Outcome of resolving a raw path argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The argument names this location inside the sandbox.
    Path(VirtualPath),
    /// `..` was requested while already at the root; nothing changes.
    AtRoot,
}

/// Lexical, side-effect-free path resolution inside the sandbox.
#[derive(Debug)]
pub struct PathResolver;

impl PathResolver {
    /// Resolves `raw` against `current`.
    ///
    /// * `".."` at the root yields [`Resolution::AtRoot`]; elsewhere the parent of `current`.
    /// * Anything else is joined onto `current` and normalized.
    ///
    /// Existence is not checked here; the sandbox operations decide whether a missing target
    /// is an error.
    ///
    /// # Errors
    /// Returns [`StorageError::PathTraversalAttempt`] if `raw` is empty, absolute, climbs
    /// above the root, or names a `.mlntmp.` temp file. Escapes are rejected, never clamped.
    pub fn resolve(current: &VirtualPath, raw: &str) -> Result<Resolution, StorageError> {
        if raw == ".." {
            return Ok(current.parent().map_or(Resolution::AtRoot, Resolution::Path));
        }

        if raw.is_empty() {
            return Err(StorageError::PathTraversalAttempt {
                message: "empty path".into(),
                context: None,
            });
        }

        let joined = current.0.join(raw);
        normalize_relative(&joined, raw).map(|p| Resolution::Path(VirtualPath(p)))
    }

    /// Like [`PathResolver::resolve`], but maps [`Resolution::AtRoot`] to the root itself.
    ///
    /// Used by commands that name a target rather than move the session.
    ///
    /// # Errors
    /// Same as [`PathResolver::resolve`].
    pub fn resolve_target(current: &VirtualPath, raw: &str) -> Result<VirtualPath, StorageError> {
        match Self::resolve(current, raw)? {
            Resolution::Path(path) => Ok(path),
            Resolution::AtRoot => Ok(VirtualPath::root()),
        }
    }
}

/// Collapse `.` / `..` lexically while ensuring the path never escapes the sandbox root.
fn normalize_relative(path: &Path, raw: &str) -> Result<PathBuf, StorageError> {
    let mut out = PathBuf::new();

    for c in path.components() {
        match c {
            Component::CurDir => {},
            Component::Normal(seg) => {
                if seg.to_string_lossy().contains(TMP_MARKER) {
                    return Err(StorageError::PathTraversalAttempt {
                        message: raw.to_owned().into(),
                        context: Some("Name is reserved for temporary files".into()),
                    });
                }
                out.push(seg);
            },
            Component::ParentDir => {
                if !out.pop() {
                    return Err(StorageError::PathTraversalAttempt {
                        message: raw.to_owned().into(),
                        context: Some("Path attempted to escape sandbox via '..'".into()),
                    });
                }
            },
            Component::RootDir | Component::Prefix(_) => {
                return Err(StorageError::PathTraversalAttempt {
                    message: raw.to_owned().into(),
                    context: Some("Absolute paths are not allowed in sandbox".into()),
                });
            },
        }
    }

    Ok(out)
}

/// Maps `virtual_path` under the canonical `root` and checks the physical result.
///
/// Returns the joined (not canonicalized) path, so operations act on a symlink itself rather
/// than on its target.
pub(crate) fn validate_physical(
    root: &Path,
    virtual_path: &VirtualPath,
) -> Result<PathBuf, StorageError> {
    let joined = root.join(virtual_path.as_path());

    match joined.canonicalize() {
        Ok(canonical) if canonical.starts_with(root) => Ok(joined),
        Ok(canonical) => Err(StorageError::PathTraversalAttempt {
            message: virtual_path.to_string().into(),
            context: Some(format!("Resolves outside sandbox to {}", canonical.display()).into()),
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => validate_ancestors(root, joined),
        Err(e) => Err(StorageError::Io {
            source: e,
            context: Some(format!("Failed to verify {virtual_path}").into()),
        }),
    }
}

/// Validates a path that doesn't exist yet through its nearest existing ancestor.
fn validate_ancestors(root: &Path, joined: PathBuf) -> Result<PathBuf, StorageError> {
    let mut current = joined.parent();

    while let Some(path) = current {
        if path == root {
            return Ok(joined);
        }

        if path.exists() {
            return match path.canonicalize() {
                Ok(canonical) if canonical.starts_with(root) => Ok(joined),
                Ok(canonical) => Err(StorageError::PathTraversalAttempt {
                    message: canonical.display().to_string().into(),
                    context: Some("Existing parent directory is a symlink outside sandbox".into()),
                }),
                Err(e) => Err(StorageError::Io {
                    source: e,
                    context: Some("Failed to verify parent directory".into()),
                }),
            };
        }

        current = path.parent();
    }

    Err(StorageError::PathTraversalAttempt {
        message: joined.display().to_string().into(),
        context: Some("No valid parent directory found within sandbox".into()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(path: &str) -> VirtualPath {
        PathResolver::resolve_target(&VirtualPath::root(), path).unwrap()
    }

    #[test]
    fn test_parent_at_root_is_a_no_op() {
        assert_eq!(PathResolver::resolve(&VirtualPath::root(), "..").unwrap(), Resolution::AtRoot);
    }

    #[test]
    fn test_parent_below_root() {
        let res = PathResolver::resolve(&at("notes/drafts"), "..").unwrap();
        assert_eq!(res, Resolution::Path(at("notes")));

        let res = PathResolver::resolve(&at("notes"), "..").unwrap();
        assert_eq!(res, Resolution::Path(VirtualPath::root()));
    }

    #[test]
    fn test_join_and_normalize() {
        assert_eq!(at("a/./b/../c"), at("a/c"));
        assert_eq!(at("a").to_string(), "/a");
        assert_eq!(VirtualPath::root().to_string(), "/");
        assert_eq!(at("a/b").to_string(), "/a/b");
    }

    #[test]
    fn test_escapes_are_rejected() {
        let current = at("a");
        for raw in ["../..", "../../etc", "b/../../..", "/etc/passwd", ""] {
            assert!(
                PathResolver::resolve(&current, raw).is_err(),
                "'{raw}' must not resolve from /a"
            );
        }
    }

    #[test]
    fn test_temp_file_names_are_reserved() {
        let current = at("notes");
        for raw in ["a.txt.mlntmp.0", "report.mlntmp.txt", "x.mlntmp.1/..", "../b.mlntmp.7"] {
            let err = PathResolver::resolve(&current, raw).unwrap_err();
            assert!(matches!(err, StorageError::PathTraversalAttempt { .. }), "'{raw}'");
        }
        assert!(PathResolver::resolve(&current, "report.mlntmp").is_ok());
    }

    #[test]
    fn test_starts_with() {
        assert!(at("a/b").starts_with(&at("a")));
        assert!(at("a").starts_with(&VirtualPath::root()));
        assert!(!at("ab").starts_with(&at("a")));
    }
}
