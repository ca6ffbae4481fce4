use std::io::Write;

use clap::Parser;
use msh_core::{
    command::{Args, Command, CommandResult},
    status,
};

use crate::utils;

/// Command name.
const NAME: &str = "clear";

/// Moves the cursor home and erases the display.
const CLEAR_SCREEN: &[u8] = b"\x1b[H\x1b[J";

/// Clear the terminal screen.
///
/// This is a built-in shell command.
#[derive(Parser)]
#[clap(name = NAME, version)]
struct ClearOpts {}

/// Implementation for the "clear" built-in command.
#[derive(Clone)]
pub struct Clear;
impl Command for Clear {
    fn name(&self) -> &str {
        NAME
    }

    fn run(&self, args: &mut Args) -> CommandResult {
        if let Err(err) = ClearOpts::try_parse_from(args.iter()) {
            return utils::exit_with_parse_error(args.io, err);
        }

        match args.io.stdout.write_all(CLEAR_SCREEN) {
            Ok(_) => CommandResult::code(status::SUCCESS),
            Err(err) => utils::exit_with_error(args.io, NAME, &err.to_string()),
        }
    }
}
