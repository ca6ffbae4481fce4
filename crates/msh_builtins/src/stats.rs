use std::io::Write;

use clap::Parser;
use msh_core::{
    command::{Args, Command, CommandResult},
    status,
};

use crate::utils;

/// Command name.
const NAME: &str = "stats";

/// Toggle reporting of execution times for foreground pipelines.
///
/// This is a built-in shell command.
#[derive(Parser)]
#[clap(name = NAME, version)]
struct StatsOpts {}

/// Implementation for the "stats" built-in command.
#[derive(Clone)]
pub struct Stats;
impl Command for Stats {
    fn name(&self) -> &str {
        NAME
    }

    fn run(&self, args: &mut Args) -> CommandResult {
        if let Err(err) = StatsOpts::try_parse_from(args.iter()) {
            return utils::exit_with_parse_error(args.io, err);
        }

        let state = match args.context.toggle_stats() {
            true => "enabled",
            false => "disabled",
        };

        match writeln!(args.io.stdout, "Command statistics {state}") {
            Ok(_) => CommandResult::code(status::SUCCESS),
            Err(err) => utils::exit_with_error(args.io, NAME, &err.to_string()),
        }
    }
}
