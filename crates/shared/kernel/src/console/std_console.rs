use super::{Console, strip_line_ending};
use std::io::{self, BufRead, IsTerminal, Write};

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

/// [`Console`] over the process's stdin and stdout.
///
/// Secrets are read with `rpassword` when stdin is a terminal. When stdin is a pipe they are
/// read as plain lines, which lets the binary be scripted.
#[derive(Debug)]
pub struct StdConsole {
    interactive: bool,
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl StdConsole {
    #[must_use]
    pub fn new() -> Self {
        Self { interactive: io::stdin().is_terminal() }
    }

    fn prompt(prompt: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(prompt.as_bytes())?;
        out.flush()
    }

    fn next_line() -> io::Result<Option<String>> {
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line)? {
            0 => Ok(None),
            _ => Ok(Some(strip_line_ending(line))),
        }
    }
}

impl Console for StdConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        Self::prompt(prompt)?;
        Self::next_line()
    }

    fn read_secret(&mut self, prompt: &str) -> io::Result<Option<String>> {
        if !self.interactive {
            Self::prompt(prompt)?;
            return Self::next_line();
        }

        match rpassword::prompt_password(prompt) {
            Ok(secret) => Ok(Some(secret)),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write_line(&mut self, text: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(text.as_bytes())?;
        out.write_all(b"\n")?;
        out.flush()
    }

    fn clear(&mut self) -> io::Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(CLEAR_SCREEN.as_bytes())?;
        out.flush()
    }
}
