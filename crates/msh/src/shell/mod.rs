mod command;
mod file;
mod interactive;
mod stdin;

use std::{io, path::PathBuf};

#[cfg(test)]
use mockall::automock;
use rustyline::error::ReadlineError;
use thiserror::Error;

pub(crate) use command::CommandShell;
pub(crate) use file::FileShell;
pub(crate) use interactive::InteractiveShell;
pub(crate) use stdin::StdinShell;

pub(crate) type ShellResult<T> = Result<T, ShellError>;

#[derive(Debug, Error)]
pub(crate) enum ShellError {
    #[error("could not start line editor: {0}")]
    Editor(ReadlineError),

    #[error("{}: {}", .0.display(), .1)]
    History(PathBuf, ReadlineError),

    #[error("{}: {}", .0.display(), .1)]
    Io(PathBuf, io::Error),
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum ShellInput {
    /// A line of input.
    Line(String),

    /// The user interrupted the current line.
    Interrupt,

    /// The user signalled the end of input.
    Logout,

    /// No more input.
    None,
}

#[cfg_attr(test, automock)]
pub(crate) trait Shell {
    /// Prompts the user for a line of input using a `prompt` text.
    fn prompt_line(&mut self, prompt: &str) -> ShellInput;

    /// Returns `true` if the prompt is run interactively, i.e. the user can be prompted for
    /// additional input.
    fn is_interactive(&self) -> bool;

    /// Appends a line entry to the shell's history.
    ///
    /// This feature is optional to implement, and may be a no-op.
    fn add_history_entry(&mut self, line: &str);

    /// Persists the shell's history.
    ///
    /// This feature is optional to implement, and may be a no-op.
    fn save_history(&mut self) -> ShellResult<()>;
}
