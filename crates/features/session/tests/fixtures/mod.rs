#![allow(dead_code)]

use mln_kernel::console::ScriptedConsole;
use mln_session::{CommandDispatcher, SessionState, ShellSession};
use std::time::Duration;
use tempfile::TempDir;

pub struct Shell {
    pub tmp: TempDir,
    pub session: ShellSession,
    pub dispatcher: CommandDispatcher,
}

impl Shell {
    pub fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        let session = ShellSession::open(tmp.path()).unwrap();
        let dispatcher = CommandDispatcher::default().with_pause(Duration::ZERO);
        Self { tmp, session, dispatcher }
    }

    /// Feeds `lines` to the prompt loop and returns the console for inspection.
    pub fn run(&mut self, lines: &[&str]) -> (SessionState, ScriptedConsole) {
        let mut console = ScriptedConsole::new(lines.iter().copied());
        let state = self.dispatcher.run(&mut self.session, &mut console).unwrap();
        (state, console)
    }
}
