use std::io::Write;

use clap::Parser;
use msh_core::command::{Action, Args, Command, CommandResult};

use crate::utils;

/// Exit the shell.
///
/// If no exit status is supplied, the last command's exit code is used.
///
/// This is a built-in shell command.
#[derive(Parser)]
#[clap(name = "exit", version)]
struct ExitOpts {
    /// Exit status for the shell.
    status: Option<i32>,
}

/// Implementation for the "exit" built-in command.
#[derive(Clone)]
pub struct Exit;
impl Command for Exit {
    fn name(&self) -> &str {
        "exit"
    }

    fn run(&self, args: &mut Args) -> CommandResult {
        match ExitOpts::try_parse_from(args.iter()) {
            Ok(opts) => {
                let code = opts.status.unwrap_or_else(|| args.context.last_exit());
                let _ = writeln!(args.io.stdout, "Thanks for using msh!");
                let _ = writeln!(
                    args.io.stdout,
                    "Total commands: {}",
                    args.context.commands_executed()
                );
                CommandResult::with_actions(code, vec![Action::Exit(code)])
            }
            Err(error) => utils::exit_with_parse_error(args.io, error),
        }
    }
}
