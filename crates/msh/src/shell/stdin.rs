use std::io;

use super::{Shell, ShellInput, ShellResult};

/// A non-interactive shell that reads input from stdin.
pub(crate) struct StdinShell;

impl Shell for StdinShell {
    fn prompt_line(&mut self, _prompt: &str) -> ShellInput {
        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) => ShellInput::None,
            Ok(_) => ShellInput::Line(line),
            Err(error) => {
                eprintln!("msh: {error}");
                ShellInput::None
            }
        }
    }

    fn is_interactive(&self) -> bool {
        false
    }

    fn add_history_entry(&mut self, _line: &str) {}

    fn save_history(&mut self) -> ShellResult<()> {
        Ok(())
    }
}
