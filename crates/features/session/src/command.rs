/// One parsed shell input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    ChangeDir(String),
    ChangeDirUp,
    Cat(String),
    Touch(String),
    Mkdir(String),
    Remove(String),
    RemoveRecursive(String),
    Edit(String),
    Help,
    Clear,
    Shutdown,
    Reboot,
    Unknown,
}

impl Command {
    /// Parses a raw input line.
    ///
    /// The line is trimmed and the keyword split off at the first space. Keyword-only commands
    /// take no argument; the others need a non-empty argument, which is kept whole so names may
    /// contain spaces. `rm -r <name>` selects [`Command::RemoveRecursive`]. Anything else is
    /// [`Command::Unknown`].
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (keyword, arg) = match line.split_once(' ') {
            Some((keyword, rest)) => (keyword, Some(rest.trim()).filter(|a| !a.is_empty())),
            None => (line, None),
        };

        match (keyword, arg) {
            ("ls", None) => Self::List,
            ("help", None) => Self::Help,
            ("clear", None) => Self::Clear,
            ("die", None) => Self::Shutdown,
            ("relive", None) => Self::Reboot,
            ("cd", Some("..")) => Self::ChangeDirUp,
            ("cd", Some(target)) => Self::ChangeDir(target.to_owned()),
            ("cat", Some(name)) => Self::Cat(name.to_owned()),
            ("touch", Some(name)) => Self::Touch(name.to_owned()),
            ("mkdir", Some(name)) => Self::Mkdir(name.to_owned()),
            ("nate", Some(name)) => Self::Edit(name.to_owned()),
            ("rm", Some(arg)) => Self::parse_remove(arg),
            _ => Self::Unknown,
        }
    }

    fn parse_remove(arg: &str) -> Self {
        match arg.split_once(char::is_whitespace) {
            Some(("-r", name)) => {
                let name = name.trim();
                if name.is_empty() { Self::Unknown } else { Self::RemoveRecursive(name.to_owned()) }
            },
            _ if arg == "-r" => Self::Unknown,
            _ => Self::Remove(arg.to_owned()),
        }
    }

    /// Keyword for logs. Never includes the argument.
    #[must_use]
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::List => "ls",
            Self::ChangeDir(_) | Self::ChangeDirUp => "cd",
            Self::Cat(_) => "cat",
            Self::Touch(_) => "touch",
            Self::Mkdir(_) => "mkdir",
            Self::Remove(_) => "rm",
            Self::RemoveRecursive(_) => "rm -r",
            Self::Edit(_) => "nate",
            Self::Help => "help",
            Self::Clear => "clear",
            Self::Shutdown => "die",
            Self::Reboot => "relive",
            Self::Unknown => "unknown",
        }
    }
}
