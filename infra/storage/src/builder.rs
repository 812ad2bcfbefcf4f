use crate::engine::{Sandbox, SandboxInner};
use crate::error::{StorageError, StorageErrorExt};
use private::Sealed;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use tracing::info;

#[derive(Debug, Default)]
pub struct NoRoot;
#[derive(Debug)]
pub struct WithRoot(PathBuf);

mod private {
    pub(super) trait Sealed {}
}
impl Sealed for NoRoot {}
impl Sealed for WithRoot {}

#[allow(private_bounds)]
#[derive(Debug, Default)]
pub struct SandboxBuilder<S: Sealed = NoRoot> {
    state: S,
    create: bool,
}

#[allow(private_bounds)]
impl<S: Sealed> SandboxBuilder<S> {
    #[must_use = "Sets whether the sandbox root should be created if it does not exist"]
    pub const fn create(mut self, enable: bool) -> Self {
        self.create = enable;
        self
    }

    fn transition<N: Sealed>(self, state: N) -> SandboxBuilder<N> {
        SandboxBuilder { state, create: self.create }
    }
}

impl SandboxBuilder<NoRoot> {
    #[must_use = "Creates a new sandbox builder"]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "Sets the physical directory that acts as the sandbox root"]
    pub fn root(self, path: impl Into<PathBuf>) -> SandboxBuilder<WithRoot> {
        self.transition(WithRoot(path.into()))
    }
}

impl SandboxBuilder<WithRoot> {
    /// Opens the sandbox.
    ///
    /// 1. Creates the root directory if `create(true)` was set.
    /// 2. Canonicalizes the root so later containment checks compare physical paths.
    /// 3. Purges temp files left behind by an interrupted write. Failures there are logged,
    ///    not returned.
    ///
    /// # Errors
    /// Returns [`StorageError::Io`] if the root does not exist (and `create` is false) or
    /// cannot be created or resolved.
    pub fn open(self) -> Result<Sandbox, StorageError> {
        let root = &self.state.0;

        if self.create && !root.is_dir() {
            fs::create_dir_all(root)
                .context(format!("Failed to bootstrap sandbox root: {}", root.display()))?;
            info!(path = %root.display(), "Bootstrapped sandbox root directory");
        }

        let canonical = fs::canonicalize(root)
            .context(format!("Failed to resolve sandbox root: {}", root.display()))?;

        let sandbox = Sandbox {
            inner: Arc::new(SandboxInner { root: canonical, tmp_counter: AtomicU64::new(1) }),
        };

        sandbox.purge_tmp();

        Ok(sandbox)
    }
}
