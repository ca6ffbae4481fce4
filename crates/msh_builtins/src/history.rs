use std::io::Write;

use clap::Parser;
use msh_core::{
    command::{Args, Command, CommandResult},
    status,
};

use crate::utils;

/// Command name.
const NAME: &str = "history";

/// Print the lines that have been entered during the session.
///
/// This is a built-in shell command.
#[derive(Parser)]
#[clap(name = NAME, version)]
struct HistoryOpts {}

/// Implementation for the "history" built-in command.
#[derive(Clone)]
pub struct History;
impl Command for History {
    fn name(&self) -> &str {
        NAME
    }

    fn run(&self, args: &mut Args) -> CommandResult {
        if let Err(err) = HistoryOpts::try_parse_from(args.iter()) {
            return utils::exit_with_parse_error(args.io, err);
        }

        for (index, line) in args.context.history().iter().enumerate() {
            if let Err(err) = writeln!(args.io.stdout, "{:5}  {}", index + 1, line) {
                return utils::exit_with_error(args.io, NAME, &err.to_string());
            }
        }

        CommandResult::code(status::SUCCESS)
    }
}
