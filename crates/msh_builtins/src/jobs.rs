use std::io::Write;

use clap::Parser;
use msh_core::{
    command::{Args, Command, CommandResult},
    status, JobEntry,
};

use crate::utils;

/// Command name.
const NAME: &str = "jobs";

/// List background jobs.
///
/// Only running jobs are listed unless --all is supplied.
///
/// This is a built-in shell command.
#[derive(Parser)]
#[clap(name = NAME, version)]
struct JobsOpts {
    /// Also list jobs that have finished.
    #[clap(short, long)]
    all: bool,
}

/// Implementation for the "jobs" built-in command.
#[derive(Clone)]
pub struct Jobs;
impl Command for Jobs {
    fn name(&self) -> &str {
        NAME
    }

    fn run(&self, args: &mut Args) -> CommandResult {
        let opts = match JobsOpts::try_parse_from(args.iter()) {
            Ok(opts) => opts,
            Err(err) => return utils::exit_with_parse_error(args.io, err),
        };

        // The table may change while it is listed, so work on a snapshot.
        let entries: Vec<_> = args
            .context
            .jobs()
            .lock()
            .list()
            .into_iter()
            .filter(|entry| opts.all || entry.running)
            .collect();

        let mut output = String::new();
        if entries.is_empty() {
            output.push_str("No active background jobs\n");
        }
        for entry in &entries {
            output.push_str(&format_entry(entry));
            output.push('\n');
        }

        match args.io.stdout.write_all(output.as_bytes()) {
            Ok(_) => CommandResult::code(status::SUCCESS),
            Err(err) => utils::exit_with_error(args.io, NAME, &err.to_string()),
        }
    }
}

fn format_entry(entry: &JobEntry) -> String {
    let state = match (entry.running, entry.exit_code) {
        (true, _) => "Running".to_owned(),
        (false, Some(0) | None) => "Done".to_owned(),
        (false, Some(code)) => format!("Exit {code}"),
    };

    format!(
        "[{}] {} ({:.0}s)\t{}",
        entry.ordinal,
        state,
        entry.elapsed.as_secs_f64(),
        entry.display_command
    )
}

#[cfg(test)]
mod tests {
    use msh_core::Context;
    use nix::unistd::Pid;

    use crate::utils::{args, file_contents, mock_io};

    use super::*;

    fn jobs(context: &mut Context, arguments: &[&str]) -> (CommandResult, String) {
        let (mut io, mut stdout, _stderr) = mock_io();
        let arguments = args(arguments);
        let result = Jobs.run(&mut Args::new(context, &mut io, &arguments));
        (result, file_contents(&mut stdout))
    }

    fn context_with_jobs() -> Context {
        let context = Context::default();
        let jobs = context.jobs();
        let mut table = jobs.lock();
        table.register(Pid::from_raw(101), "sleep 10").unwrap();
        table.register(Pid::from_raw(102), "make | tee log").unwrap();
        table.register(Pid::from_raw(103), "false").unwrap();
        table.mark_done(Pid::from_raw(102), 0);
        table.mark_done(Pid::from_raw(103), 1);
        drop(table);
        context
    }

    #[test]
    fn it_reports_when_there_are_no_jobs() {
        let mut context = Context::default();
        let (result, stdout) = jobs(&mut context, &["jobs"]);
        assert_eq!(result.code, status::SUCCESS);
        assert_eq!(stdout, "No active background jobs\n");
    }

    #[test]
    fn it_lists_running_jobs() {
        let mut context = context_with_jobs();
        let (result, stdout) = jobs(&mut context, &["jobs"]);
        assert_eq!(result.code, status::SUCCESS);
        assert_eq!(stdout, "[1] Running (0s)\tsleep 10\n");
    }

    #[test]
    fn it_lists_all_jobs() {
        let mut context = context_with_jobs();
        let (_, stdout) = jobs(&mut context, &["jobs", "--all"]);
        assert_eq!(
            stdout,
            "[1] Running (0s)\tsleep 10\n\
             [2] Done (0s)\tmake | tee log\n\
             [3] Exit 1 (0s)\tfalse\n"
        );
    }
}
