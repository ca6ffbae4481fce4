use std::fmt::Display;

use itertools::Itertools;

/// A command represents a single program invocation within a pipeline.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Command {
    /// Name or path of the program to execute.
    ///
    /// Empty if the command was parsed from input without any words, such as a
    /// segment consisting of redirections only.
    pub program: String,

    /// List of arguments for the command. The first argument is always equal to
    /// the program name.
    pub arguments: Vec<String>,

    /// File to read standard input from.
    pub input_source: Option<String>,

    /// File to write standard output to.
    pub output_target: Option<String>,

    /// Whether or not to append to [`Command::output_target`] rather than to
    /// truncate it.
    pub append: bool,
}

impl Command {
    /// Constructs a new command from a list of arguments, where the first
    /// argument names the program.
    pub fn new<I, S>(arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut command = Self::default();
        for arg in arguments {
            command.arg(arg);
        }
        command
    }

    /// Appends an argument to the command.
    ///
    /// The first argument also becomes the command's program.
    pub fn arg<S: Into<String>>(&mut self, arg: S) {
        let arg = arg.into();
        if self.arguments.is_empty() {
            self.program = arg.clone();
        }
        self.arguments.push(arg);
    }

    /// Redirects standard input from a file.
    pub fn read_from<S: Into<String>>(&mut self, path: S) {
        self.input_source = Some(path.into());
    }

    /// Redirects standard output to a file, truncating or appending to it.
    pub fn write_to<S: Into<String>>(&mut self, path: S, append: bool) {
        self.output_target = Some(path.into());
        self.append = append;
    }

    /// Returns `true` if there is no program to execute.
    pub fn is_empty(&self) -> bool {
        self.program.is_empty()
    }
}

impl Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.arguments.iter().join(" "))
    }
}
