use std::{env, io::Write};

use clap::Parser;
use msh_core::{
    command::{Args, Command, CommandResult},
    status,
    utils::path_to_string,
};

use crate::utils;

/// Command name.
const NAME: &str = "pwd";

/// Print the shell's working directory.
///
/// This is a built-in shell command.
#[derive(Parser)]
#[clap(name = NAME, version)]
struct PwdOpts {}

/// Implementation for the "pwd" built-in command.
#[derive(Clone)]
pub struct Pwd;
impl Command for Pwd {
    fn name(&self) -> &str {
        NAME
    }

    fn run(&self, args: &mut Args) -> CommandResult {
        if let Err(err) = PwdOpts::try_parse_from(args.iter()) {
            return utils::exit_with_parse_error(args.io, err);
        }

        let cwd = match env::current_dir() {
            Ok(cwd) => cwd,
            Err(err) => return utils::exit_with_error(args.io, NAME, &err.to_string()),
        };

        match writeln!(args.io.stdout, "{}", path_to_string(&cwd)) {
            Ok(_) => CommandResult::code(status::SUCCESS),
            Err(err) => utils::exit_with_error(args.io, NAME, &err.to_string()),
        }
    }
}
