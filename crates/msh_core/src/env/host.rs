/// A host is a shell's representation of its surrounding environment.
///
/// The host receives messages that the shell itself reports, such as job
/// notifications and execution statistics, as opposed to output from the
/// commands that it executes.
pub trait Host: Send {
    /// Prints a line of text to the host's stdout equivalent.
    fn println(&mut self, text: &str);

    /// Prints a line of text to the host's stderr equivalent.
    fn eprintln(&mut self, text: &str);
}
