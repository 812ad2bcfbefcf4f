use crate::error::{BootError, BootErrorExt};
use mln_auth::{AuthGate, CredentialRecord, CredentialVault};
use mln_domain::config::{CipherKind, SystemConfig};
use mln_domain::layout::Layout;
use mln_kernel::console::{Console, StdConsole};
use mln_session::{CommandDispatcher, SessionState, ShellSession};
use mln_vault::algorithms::{Aes, ChaCha, VaultCipher};
use mln_vault::{KeyBytes, KeyStore};
use std::fs;
use std::time::Duration;
use tracing::info;

/// Printed after a successful login when `shell.banner` is enabled.
pub const BANNER: &[&str] =
    &["", "MLN OS 🄯 2025 GPLV3 Copyleft", "OS: MLN OS 1.0v alpha", "Kernel: Nerkel 1.0v alpha", ""];

/// A fluent builder for the [`System`].
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug, Default)]
pub struct SystemBuilder<C: Console = StdConsole> {
    config: SystemConfig,
    console: C,
}

impl<C: Console> SystemBuilder<C> {
    pub fn config(mut self, config: SystemConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the console the system talks through.
    pub fn console<T: Console>(self, console: T) -> SystemBuilder<T> {
        SystemBuilder { config: self.config, console }
    }

    pub fn build(self) -> System<C> {
        let pause = Duration::from_millis(self.config.shell.pause_ms);
        System {
            layout: Layout::new(self.config.root.clone()),
            dispatcher: CommandDispatcher::default().with_pause(pause),
            config: self.config,
            console: self.console,
        }
    }
}

/// One MLN OS installation, booted through a console.
///
/// ```rust,no_run
/// use mln::System;
///
/// # fn main() -> Result<(), mln::BootError> {
/// System::builder().build().run()
/// # }
/// ```
#[derive(Debug)]
pub struct System<C: Console = StdConsole> {
    config: SystemConfig,
    layout: Layout,
    console: C,
    dispatcher: CommandDispatcher,
}

impl System {
    pub fn builder() -> SystemBuilder {
        SystemBuilder::default()
    }
}

impl<C: Console> System<C> {
    #[must_use]
    pub const fn layout(&self) -> &Layout {
        &self.layout
    }

    #[must_use]
    pub const fn config(&self) -> &SystemConfig {
        &self.config
    }

    #[must_use]
    pub const fn console(&self) -> &C {
        &self.console
    }

    pub const fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    /// Boots until the user shuts the shell down.
    ///
    /// Every `relive` runs [`System::reinitialize`] again; `die` or end of input returns.
    ///
    /// # Errors
    /// Any [`BootError`] from booting or from the shell console.
    pub fn run(&mut self) -> Result<(), BootError> {
        loop {
            let mut session = self.reinitialize()?;
            match self.dispatcher.run(&mut session, &mut self.console)? {
                SessionState::Rebooting => info!("Reboot requested"),
                SessionState::ShuttingDown | SessionState::Running => {
                    info!("System shut down");
                    return Ok(());
                },
            }
        }
    }

    /// Runs the boot sequence and returns a fresh session at the sandbox root.
    ///
    /// Creates `etc/` if missing, loads (or creates) the installation key, loads (or sets up)
    /// the credentials, runs the login gate and prints the banner.
    ///
    /// # Errors
    /// * [`BootError::Io`] If `etc/` cannot be created.
    /// * [`BootError::Vault`] If the key file cannot be read or written.
    /// * [`BootError::Auth`] If the credentials cannot be loaded or input ends during login.
    /// * [`BootError::Session`] If the sandbox root cannot be opened.
    pub fn reinitialize(&mut self) -> Result<ShellSession, BootError> {
        let etc = self.layout.etc_dir();
        fs::create_dir_all(&etc).context(format!("Failed to create {}", etc.display()))?;

        let key = KeyStore::new(self.layout.key_file()).ensure_key()?;
        let record = match self.config.security.cipher {
            CipherKind::Aes => self.credentials::<Aes>(&key)?,
            CipherKind::Chacha => self.credentials::<ChaCha>(&key)?,
        };
        drop(key);

        AuthGate::new(record).authenticate(&mut self.console)?;
        info!(root = %self.layout.root().display(), "Boot complete");

        if self.config.shell.banner {
            for line in BANNER {
                self.console.write_line(line).context("Failed to print the banner")?;
            }
        }

        Ok(ShellSession::open(self.layout.root())?)
    }

    fn credentials<V: VaultCipher>(&mut self, key: &KeyBytes) -> Result<CredentialRecord, BootError> {
        let vault = CredentialVault::<V>::open(key, self.layout.credentials_file())?;
        Ok(vault.load(&mut self.console)?)
    }
}
