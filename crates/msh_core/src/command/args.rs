use crate::{command::Io, Context};

/// Arguments that can be passed to a command.
pub struct Args<'a> {
    /// Execution context for the command.
    pub context: &'a mut Context,

    /// File descriptors that the command can use for input and output.
    pub io: &'a mut Io,

    /// Command line arguments, starting with the command's name.
    arguments: &'a [String],
}

impl<'a> Args<'a> {
    /// Constructs new command arguments.
    ///
    /// The first argument should be the command's name as returned by
    /// [`crate::command::Command::name()`].
    pub fn new(context: &'a mut Context, io: &'a mut Io, arguments: &'a [String]) -> Self {
        Self {
            context,
            io,
            arguments,
        }
    }

    /// Returns an iterator over the command line arguments.
    pub fn iter(&self) -> std::slice::Iter<'a, String> {
        self.arguments.iter()
    }
}
