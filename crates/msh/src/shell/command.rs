use super::{Shell, ShellInput, ShellResult};

/// A shell that executes a single line of input.
pub(crate) struct CommandShell {
    /// Line to execute, until it has been read.
    command: Option<String>,
}

impl CommandShell {
    pub fn new(command: String) -> Self {
        Self {
            command: Some(command),
        }
    }
}

impl Shell for CommandShell {
    fn prompt_line(&mut self, _prompt: &str) -> ShellInput {
        match self.command.take() {
            Some(command) => ShellInput::Line(command),
            None => ShellInput::None,
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
