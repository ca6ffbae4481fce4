use std::{fs, path::PathBuf};

use rustyline::{
    completion::{Completer, FilenameCompleter, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::{Hinter, HistoryHinter},
    history::DefaultHistory,
    validate::Validator,
    Config, Context, Editor,
};
use rustyline_derive::Helper;

use super::{Shell, ShellError, ShellInput, ShellResult};

/// An interactive shell that prompts the user for input using a line editor.
pub(crate) struct InteractiveShell {
    editor: Editor<ShellHelper, DefaultHistory>,

    /// File that history is loaded from and appended to.
    history_file: PathBuf,
}

impl InteractiveShell {
    /// Constructs a new interactive shell, loading history from a file if it
    /// exists.
    pub fn new(history_file: PathBuf) -> ShellResult<Self> {
        let helper = ShellHelper {
            completer: FilenameCompleter::new(),
            hinter: HistoryHinter {},
        };

        let config = Config::builder().auto_add_history(false).build();
        let mut editor = Editor::with_config(config).map_err(ShellError::Editor)?;
        editor.set_helper(Some(helper));

        if history_file.exists() {
            editor
                .load_history(&history_file)
                .map_err(|err| ShellError::History(history_file.clone(), err))?;
        }

        Ok(Self {
            editor,
            history_file,
        })
    }
}

impl Shell for InteractiveShell {
    fn prompt_line(&mut self, prompt: &str) -> ShellInput {
        match self.editor.readline(prompt) {
            Ok(line) => ShellInput::Line(line),
            Err(ReadlineError::Interrupted) => ShellInput::Interrupt,
            Err(ReadlineError::Eof) => ShellInput::Logout,
            Err(error) => {
                eprintln!("msh: unhandled input: {error}");
                ShellInput::None
            }
        }
    }

    fn is_interactive(&self) -> bool {
        true
    }

    fn add_history_entry(&mut self, line: &str) {
        let _ = self.editor.add_history_entry(line);
    }

    fn save_history(&mut self) -> ShellResult<()> {
        if let Some(parent) = self.history_file.parent() {
            fs::create_dir_all(parent)
                .map_err(|err| ShellError::Io(parent.to_path_buf(), err))?;
        }

        self.editor
            .append_history(&self.history_file)
            .map_err(|err| ShellError::History(self.history_file.clone(), err))
    }
}

/// Rustyline helper completing file names and hinting from history.
#[derive(Helper)]
struct ShellHelper {
    completer: FilenameCompleter,
    hinter: HistoryHinter,
}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &Context<'_>,
    ) -> Result<(usize, Vec<Pair>), ReadlineError> {
        self.completer.complete(line, pos, ctx)
    }
}

impl Hinter for ShellHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, ctx: &Context<'_>) -> Option<String> {
        self.hinter.hint(line, pos, ctx)
    }
}

impl Highlighter for ShellHelper {}

impl Validator for ShellHelper {}
