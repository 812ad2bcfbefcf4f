//! Shell session feature slice.
//!
//! A [`ShellSession`] is the state of one logged-in shell: the sandbox, the current directory
//! inside it and where the session is heading ([`SessionState`]). The [`CommandDispatcher`]
//! reads lines, parses them into [`Command`]s and applies them to the session until a command
//! ends it.

mod command;
mod dispatcher;
mod editor;
mod error;
mod help;
mod session;

pub use crate::command::Command;
pub use crate::dispatcher::CommandDispatcher;
pub use crate::editor::{EditOutcome, Editor, LineEditor};
pub use crate::error::{SessionError, SessionErrorExt};
pub use crate::help::HELP_TEXT;
pub use crate::session::{SessionState, ShellSession};
