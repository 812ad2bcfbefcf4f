use crate::error::SessionError;
use mln_storage::{Sandbox, VirtualPath};
use std::path::Path;

/// Where a session is heading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Running,
    Rebooting,
    ShuttingDown,
}

/// One logged-in shell: a fixed sandbox and a current directory inside it.
#[derive(Debug, Clone)]
pub struct ShellSession {
    sandbox: Sandbox,
    current: VirtualPath,
    state: SessionState,
}

impl ShellSession {
    /// Starts a session at the sandbox root.
    #[must_use]
    pub fn new(sandbox: Sandbox) -> Self {
        Self { sandbox, current: VirtualPath::root(), state: SessionState::Running }
    }

    /// Opens the sandbox at `root` (which must exist) and starts a session there.
    ///
    /// # Errors
    /// Returns [`SessionError::Storage`] if the root cannot be opened.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, SessionError> {
        let sandbox = Sandbox::builder().root(root.as_ref()).open()?;
        Ok(Self::new(sandbox))
    }

    #[must_use]
    pub const fn sandbox(&self) -> &Sandbox {
        &self.sandbox
    }

    #[must_use]
    pub const fn current(&self) -> &VirtualPath {
        &self.current
    }

    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// `/{current} >>> `, with the root shown as `/`.
    #[must_use]
    pub fn prompt(&self) -> String {
        format!("{} >>> ", self.current)
    }

    pub(crate) fn enter(&mut self, path: VirtualPath) {
        self.current = path;
    }

    pub(crate) const fn transition(&mut self, state: SessionState) {
        self.state = state;
    }
}
