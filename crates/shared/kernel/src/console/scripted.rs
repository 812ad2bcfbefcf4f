use super::Console;
use std::collections::VecDeque;
use std::io;

/// In-memory [`Console`] fed from a fixed script.
///
/// Lines and secrets are taken from the same queue in order. Everything written is recorded,
/// prompts separately from output lines.
///
/// ```rust
/// use mln_kernel::console::{Console, ScriptedConsole};
///
/// let mut console = ScriptedConsole::new(["alice"]);
/// assert_eq!(console.read_line("Username: ").unwrap().as_deref(), Some("alice"));
/// assert_eq!(console.read_line("Username: ").unwrap(), None);
/// assert_eq!(console.prompts(), ["Username: ", "Username: "]);
/// ```
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    input: VecDeque<String>,
    output: Vec<String>,
    prompts: Vec<String>,
    clears: usize,
}

impl ScriptedConsole {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { input: lines.into_iter().map(Into::into).collect(), ..Self::default() }
    }

    /// Queues more input after whatever is left.
    pub fn push_input<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.input.extend(lines.into_iter().map(Into::into));
    }

    #[must_use]
    pub fn output(&self) -> &[String] {
        &self.output
    }

    #[must_use]
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    #[must_use]
    pub const fn clears(&self) -> usize {
        self.clears
    }

    /// `true` if any output line equals `line`.
    #[must_use]
    pub fn printed(&self, line: &str) -> bool {
        self.output.iter().any(|l| l == line)
    }

    /// Number of output lines equal to `line`.
    #[must_use]
    pub fn count(&self, line: &str) -> usize {
        self.output.iter().filter(|l| *l == line).count()
    }

    /// Lines not consumed yet.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.input.len()
    }

    /// Forgets recorded output and prompts.
    pub fn clear_output(&mut self) {
        self.output.clear();
        self.prompts.clear();
    }

    fn next(&mut self, prompt: &str) -> Option<String> {
        self.prompts.push(prompt.to_owned());
        self.input.pop_front()
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        Ok(self.next(prompt))
    }

    fn read_secret(&mut self, prompt: &str) -> io::Result<Option<String>> {
        Ok(self.next(prompt))
    }

    fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.output.push(text.to_owned());
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        self.clears += 1;
        Ok(())
    }
}
