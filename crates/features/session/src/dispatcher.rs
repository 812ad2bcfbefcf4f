use crate::command::Command;
use crate::editor::{EditOutcome, Editor, LineEditor};
use crate::error::SessionError;
use crate::help::HELP_TEXT;
use crate::session::{SessionState, ShellSession};
use mln_kernel::console::Console;
use mln_storage::{PathResolver, Resolution, StorageError, VirtualPath};
use std::time::Duration;
use tracing::{debug, info, warn};

const DEFAULT_PAUSE: Duration = Duration::from_secs(1);

/// Reads, parses and applies shell commands to a [`ShellSession`].
#[derive(Debug)]
pub struct CommandDispatcher<E: Editor = LineEditor> {
    editor: E,
    pause: Duration,
}

impl Default for CommandDispatcher {
    fn default() -> Self {
        Self::new(LineEditor)
    }
}

impl<E: Editor> CommandDispatcher<E> {
    #[must_use]
    pub const fn new(editor: E) -> Self {
        Self { editor, pause: DEFAULT_PAUSE }
    }

    /// Sets the pause between announcing `die` / `relive` and acting on it.
    #[must_use]
    pub const fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    /// Runs the prompt loop until the session stops running.
    ///
    /// End of input at the prompt shuts the session down like `die`.
    ///
    /// # Errors
    /// Returns [`SessionError::Io`] if the console fails. File operation failures are reported
    /// to the user and do not end the loop.
    pub fn run(
        &mut self,
        session: &mut ShellSession,
        console: &mut dyn Console,
    ) -> Result<SessionState, SessionError> {
        while session.state() == SessionState::Running {
            let command = match console.read_line(&session.prompt())? {
                Some(line) => Command::parse(&line),
                None => {
                    info!("Input closed at the shell prompt");
                    Command::Shutdown
                },
            };
            self.dispatch(session, &command, console)?;
        }

        Ok(session.state())
    }

    /// Applies one command.
    ///
    /// # Errors
    /// Returns [`SessionError::Io`] if the console fails.
    pub fn dispatch(
        &mut self,
        session: &mut ShellSession,
        command: &Command,
        console: &mut dyn Console,
    ) -> Result<(), SessionError> {
        debug!(command = command.keyword(), "Dispatching command");

        match command {
            Command::List => list(session, console)?,
            Command::ChangeDir(target) => change_dir(session, target, console)?,
            Command::ChangeDirUp => change_dir(session, "..", console)?,
            Command::Cat(name) => cat(session, name, console)?,
            Command::Touch(name) => touch(session, name, console)?,
            Command::Mkdir(name) => mkdir(session, name, console)?,
            Command::Remove(name) => remove(session, name, console)?,
            Command::RemoveRecursive(name) => remove_recursive(session, name, console)?,
            Command::Edit(name) => self.edit(session, name, console)?,
            Command::Help => {
                for line in HELP_TEXT {
                    console.write_line(line)?;
                }
            },
            Command::Clear => console.clear()?,
            Command::Shutdown => {
                console.write_line("Shutting Down...")?;
                self.stop(session, SessionState::ShuttingDown);
            },
            Command::Reboot => {
                console.write_line("Rebooting...")?;
                self.stop(session, SessionState::Rebooting);
            },
            Command::Unknown => {},
        }

        Ok(())
    }

    fn stop(&self, session: &mut ShellSession, state: SessionState) {
        std::thread::sleep(self.pause);
        info!(?state, "Session ending");
        session.transition(state);
    }

    fn edit(
        &mut self,
        session: &ShellSession,
        name: &str,
        console: &mut dyn Console,
    ) -> Result<(), SessionError> {
        let sandbox = session.sandbox();
        let path = match target(session, name) {
            Ok(path) => path,
            Err(err) => return report(console, name, &err, "Cannot edit"),
        };

        match sandbox.is_dir(&path) {
            Ok(false) => {},
            Ok(true) => {
                warn!("Refusing to edit a directory");
                console.write_line(&format!("Cannot edit '{name}'."))?;
                return Ok(());
            },
            Err(err) => return report(console, name, &err, "Cannot edit"),
        }

        let current = match sandbox.read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.is_not_found() => String::new(),
            Err(err) => return report(console, name, &err, "Cannot edit"),
        };

        match self.editor.edit(name, &current, console)? {
            EditOutcome::Saved(text) => match sandbox.write(&path, text) {
                Ok(()) => console.write_line(&format!("File '{name}' saved."))?,
                Err(err) => return report(console, name, &err, "Cannot save"),
            },
            EditOutcome::Discarded => console.write_line(&format!("File '{name}' left unchanged."))?,
        }

        Ok(())
    }
}

fn target(session: &ShellSession, raw: &str) -> Result<VirtualPath, StorageError> {
    PathResolver::resolve_target(session.current(), raw)
}

/// Logs a failed file operation and tells the user.
fn report(
    console: &mut dyn Console,
    name: &str,
    err: &StorageError,
    action: &str,
) -> Result<(), SessionError> {
    warn!(action, error = %err, "Shell command failed");
    console.write_line(&format!("{action} '{name}'."))?;
    Ok(())
}

fn list(session: &ShellSession, console: &mut dyn Console) -> Result<(), SessionError> {
    match session.sandbox().list(session.current()) {
        Ok(names) => console.write_line(&names.join(" "))?,
        Err(err) => {
            warn!(error = %err, "Listing failed");
            console.write_line("Cannot list the current directory.")?;
        },
    }
    Ok(())
}

fn change_dir(
    session: &mut ShellSession,
    raw: &str,
    console: &mut dyn Console,
) -> Result<(), SessionError> {
    let destination = match PathResolver::resolve(session.current(), raw) {
        Ok(Resolution::AtRoot) => {
            console.write_line("Already at the root directory.")?;
            return Ok(());
        },
        Ok(Resolution::Path(path)) => path,
        Err(err) => {
            warn!(error = %err, "Directory change rejected");
            console.write_line(&format!("No such directory '{raw}'"))?;
            return Ok(());
        },
    };

    match session.sandbox().is_dir(&destination) {
        Ok(true) => session.enter(destination),
        Ok(false) => console.write_line(&format!("No such directory '{raw}'"))?,
        Err(err) => {
            warn!(error = %err, "Directory change rejected");
            console.write_line(&format!("No such directory '{raw}'"))?;
        },
    }
    Ok(())
}

fn cat(session: &ShellSession, name: &str, console: &mut dyn Console) -> Result<(), SessionError> {
    let contents = target(session, name).and_then(|path| session.sandbox().read_to_string(&path));

    match contents {
        Ok(text) => console.write_line(text.strip_suffix('\n').unwrap_or(&text))?,
        Err(err) if err.is_not_found() || is_rejected(&err) => {
            console.write_line(&format!("No such file '{name}' in {}", session.current()))?;
        },
        Err(err) => report(console, name, &err, "Cannot read")?,
    }
    Ok(())
}

fn touch(session: &ShellSession, name: &str, console: &mut dyn Console) -> Result<(), SessionError> {
    match target(session, name).and_then(|path| session.sandbox().touch(&path)) {
        Ok(()) => console.write_line(&format!("File '{name}' created."))?,
        Err(err) => report(console, name, &err, "Cannot create file")?,
    }
    Ok(())
}

fn mkdir(session: &ShellSession, name: &str, console: &mut dyn Console) -> Result<(), SessionError> {
    match target(session, name).and_then(|path| session.sandbox().create_dir(&path)) {
        Ok(()) => console.write_line(&format!("Directory '{name}' created."))?,
        Err(err) => report(console, name, &err, "Cannot create directory")?,
    }
    Ok(())
}

fn remove(session: &ShellSession, name: &str, console: &mut dyn Console) -> Result<(), SessionError> {
    match target(session, name).and_then(|path| session.sandbox().remove_file(&path)) {
        Ok(()) => console.write_line(&format!("File '{name}' removed."))?,
        Err(err) if err.is_not_found() || is_rejected(&err) => {
            console.write_line(&format!("No such file '{name}'"))?;
        },
        Err(err) => report(console, name, &err, "Cannot remove")?,
    }
    Ok(())
}

fn remove_recursive(
    session: &ShellSession,
    name: &str,
    console: &mut dyn Console,
) -> Result<(), SessionError> {
    let result = target(session, name).and_then(|path| {
        if session.current().starts_with(&path) {
            return Err(StorageError::DirectoryNotFound {
                message: path.to_string().into(),
                context: Some("Cannot remove the current directory or its parents".into()),
            });
        }
        session.sandbox().remove_dir_all(&path)
    });

    match result {
        Ok(()) => console.write_line(&format!("Directory '{name}' removed."))?,
        Err(err) if err.is_not_found() || is_rejected(&err) => {
            console.write_line(&format!("No such directory '{name}'"))?;
        },
        Err(err) => report(console, name, &err, "Cannot remove")?,
    }
    Ok(())
}

const fn is_rejected(err: &StorageError) -> bool {
    matches!(err, StorageError::PathTraversalAttempt { .. })
}
