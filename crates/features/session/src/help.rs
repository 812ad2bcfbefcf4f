/// The command reference printed by `help`.
pub const HELP_TEXT: &[&str] = &[
    "Commands:",
    "ls      - List files and directories",
    "cd      - Change directory",
    "cd ..   - Go back to previous directory",
    "cat     - Read files",
    "touch   - Create a file",
    "mkdir   - Make a directory",
    "rm      - Delete a file",
    "rm -r   - Delete a directory recursively",
    "nate    - Open Nate Text Editor",
    "clear   - Clear screen",
    "relive  - Reboot system",
    "die     - Shutdown system",
    "help    - Show help message",
];
