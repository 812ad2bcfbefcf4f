//! The terminal boundary.
//!
//! Everything interactive (setup, login, the shell loop, the editor) reads and writes through
//! [`Console`], so the whole system can be driven by [`ScriptedConsole`] in tests.

mod scripted;
mod std_console;

pub use scripted::ScriptedConsole;
pub use std_console::StdConsole;

use std::io;

/// Line-oriented terminal I/O.
///
/// Reads return `Ok(None)` at end of input. Returned lines have their line terminator removed
/// but are otherwise untouched; callers trim where they need to.
pub trait Console {
    /// Prints `prompt` without a newline and reads one echoed line.
    ///
    /// # Errors
    /// Any I/O error of the underlying terminal.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Prints `prompt` and reads one line without echoing it.
    ///
    /// # Errors
    /// Any I/O error of the underlying terminal.
    fn read_secret(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Prints `text` followed by a newline.
    ///
    /// # Errors
    /// Any I/O error of the underlying terminal.
    fn write_line(&mut self, text: &str) -> io::Result<()>;

    /// Clears the screen.
    ///
    /// # Errors
    /// Any I/O error of the underlying terminal.
    fn clear(&mut self) -> io::Result<()>;
}

pub(crate) fn strip_line_ending(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}
