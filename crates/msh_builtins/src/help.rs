use std::io::Write;

use clap::Parser;
use msh_core::{
    command::{Args, Command, CommandResult},
    status,
};

use crate::utils;

/// Command name.
const NAME: &str = "help";

const HELP_TEXT: &str = "\
Built-in commands:
  cd [dir|-]     Change directory
  pwd            Print working directory
  exit [status]  Exit the shell
  history        Show command history
  jobs [-a]      List background jobs
  help           Show this help message
  clear          Clear the screen
  stats          Toggle command statistics

Special characters:
  |              Pipe (connect commands)
  >              Output redirection
  >>             Append output
  <              Input redirection
  &              Run in background (at the end of a line)

Examples:
  ls -la | grep txt
  sort < input.txt > output.txt
  sleep 10 &
  cat file1.txt | grep error | wc -l
";

/// Print a summary of the shell's built-in commands and syntax.
///
/// This is a built-in shell command.
#[derive(Parser)]
#[clap(name = NAME, version)]
struct HelpOpts {}

/// Implementation for the "help" built-in command.
#[derive(Clone)]
pub struct Help;
impl Command for Help {
    fn name(&self) -> &str {
        NAME
    }

    fn run(&self, args: &mut Args) -> CommandResult {
        if let Err(err) = HelpOpts::try_parse_from(args.iter()) {
            return utils::exit_with_parse_error(args.io, err);
        }

        match args.io.stdout.write_all(HELP_TEXT.as_bytes()) {
            Ok(_) => CommandResult::code(status::SUCCESS),
            Err(err) => utils::exit_with_error(args.io, NAME, &err.to_string()),
        }
    }
}
