//! The `nate` editor boundary.

use mln_kernel::console::Console;
use std::io;

/// What the user decided to do with an edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Saved(String),
    Discarded,
}

/// Edits the text of one file.
///
/// Implementations only transform text; loading and saving are done by the caller.
pub trait Editor {
    /// Lets the user edit `current`, the present contents of `name`.
    ///
    /// # Errors
    /// Any console I/O error.
    fn edit(
        &mut self,
        name: &str,
        current: &str,
        console: &mut dyn Console,
    ) -> io::Result<EditOutcome>;
}

/// Line-mode editor.
///
/// Shows the current text, then appends every entered line. Control lines:
/// `:wq` saves, `:q` discards, `:d` drops the last line. End of input discards.
#[derive(Debug, Default, Clone, Copy)]
pub struct LineEditor;

impl Editor for LineEditor {
    fn edit(
        &mut self,
        name: &str,
        current: &str,
        console: &mut dyn Console,
    ) -> io::Result<EditOutcome> {
        console.write_line(&format!(
            "Editing: {name} (type ':wq' on its own line to save, ':q' to discard)"
        ))?;

        let mut lines: Vec<String> = current.lines().map(str::to_owned).collect();
        for line in &lines {
            console.write_line(line)?;
        }

        while let Some(line) = console.read_line("")? {
            match line.trim_end() {
                ":wq" => return Ok(EditOutcome::Saved(join(&lines))),
                ":q" => return Ok(EditOutcome::Discarded),
                ":d" => {
                    lines.pop();
                },
                _ => lines.push(line),
            }
        }

        Ok(EditOutcome::Discarded)
    }
}

fn join(lines: &[String]) -> String {
    if lines.is_empty() {
        return String::new();
    }
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use mln_kernel::console::ScriptedConsole;

    fn run(current: &str, input: &[&str]) -> (EditOutcome, ScriptedConsole) {
        let mut console = ScriptedConsole::new(input.iter().copied());
        let outcome = LineEditor.edit("a.txt", current, &mut console).unwrap();
        (outcome, console)
    }

    #[test]
    fn test_appends_and_saves() {
        let (outcome, console) = run("first\n", &["second", "third", ":wq"]);
        assert_eq!(outcome, EditOutcome::Saved("first\nsecond\nthird\n".into()));
        assert!(console.printed("first"));
        assert!(console.output()[0].starts_with("Editing: a.txt"));
    }

    #[test]
    fn test_drop_last_line() {
        let (outcome, _) = run("keep\ndrop\n", &[":d", "new", ":wq"]);
        assert_eq!(outcome, EditOutcome::Saved("keep\nnew\n".into()));
    }

    #[test]
    fn test_discard() {
        assert_eq!(run("x", &["y", ":q"]).0, EditOutcome::Discarded);
        assert_eq!(run("x", &["y"]).0, EditOutcome::Discarded);
    }

    #[test]
    fn test_emptied_file_saves_empty() {
        let (outcome, _) = run("only\n", &[":d", ":wq"]);
        assert_eq!(outcome, EditOutcome::Saved(String::new()));
    }
}
