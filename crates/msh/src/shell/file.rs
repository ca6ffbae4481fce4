use std::{
    fs::File,
    io::{BufRead, BufReader, Lines},
    path::{Path, PathBuf},
};

use super::{Shell, ShellError, ShellInput, ShellResult};

/// A shell that executes a script file line by line.
///
/// Blank lines and lines starting with `#` are skipped.
pub(crate) struct FileShell {
    path: PathBuf,
    lines: Lines<BufReader<File>>,
}

impl FileShell {
    pub fn open(path: &Path) -> ShellResult<Self> {
        let file = File::open(path).map_err(|err| ShellError::Io(path.to_path_buf(), err))?;
        Ok(Self {
            path: path.to_path_buf(),
            lines: BufReader::new(file).lines(),
        })
    }
}

impl Shell for FileShell {
    fn prompt_line(&mut self, _prompt: &str) -> ShellInput {
        for line in self.lines.by_ref() {
            match line {
                Ok(line) if is_script_line(&line) => return ShellInput::Line(line),
                Ok(_) => continue,
                Err(err) => {
                    eprintln!("msh: {}: {err}", self.path.display());
                    return ShellInput::None;
                }
            }
        }

        ShellInput::None
    }

    fn is_interactive(&self) -> bool {
        false
    }

    fn add_history_entry(&mut self, _line: &str) {}

    fn save_history(&mut self) -> ShellResult<()> {
        Ok(())
    }
}

fn is_script_line(line: &str) -> bool {
    let line = line.trim_start();
    !line.is_empty() && !line.starts_with('#')
}
