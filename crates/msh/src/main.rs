mod logging;
mod opts;
mod prompt;
mod shell;
mod signals;

#[cfg(test)]
mod tests;

use std::{process, sync::Arc};

use clap::Parser;
use msh_core::{Context, StdHost};
use msh_exec::Executor;
use msh_parse::{parse_with, ParseOptions};
use opts::Opts;
use parking_lot::Mutex;
use shell::{
    CommandShell, FileShell, InteractiveShell, Shell, ShellInput, ShellResult, StdinShell,
};

/// Entrypoint for the application.
pub fn main() {
    let opts = Opts::parse();
    logging::init();

    if let Err(err) = signals::install_interrupt_handler() {
        tracing::error!(%err, "could not install interrupt handler");
    }

    match run(opts) {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("msh: {err}");
            process::exit(msh_core::status::GENERAL_ERROR);
        }
    }
}

/// Runs a shell session as configured by `opts`.
///
/// Returns the code that the process should exit with.
fn run(opts: Opts) -> ShellResult<i32> {
    let mut shell = select_shell(&opts)?;

    let mut context = Context::new(Arc::new(Mutex::new(StdHost)), opts.max_jobs);
    context.set_show_stats(opts.stats);
    let executor = Executor::new(msh_builtins::all_builtins());

    run_shell(shell.as_mut(), &executor, &mut context, &opts.parse_options());

    if let Err(err) = shell.save_history() {
        eprintln!("msh: could not save history: {err}");
    }

    Ok(context.exit_request().unwrap_or_else(|| context.last_exit()))
}

fn select_shell(opts: &Opts) -> ShellResult<Box<dyn Shell>> {
    if let Some(script) = &opts.script {
        return Ok(Box::new(FileShell::open(script)?));
    }

    if let Some(command) = &opts.command {
        return Ok(Box::new(CommandShell::new(command.clone())));
    }

    if atty::is(atty::Stream::Stdin) {
        Ok(Box::new(InteractiveShell::new(opts.history_file())?))
    } else {
        Ok(Box::new(StdinShell))
    }
}

/// Main loop for running a [`Shell`].
///
/// Returns when the shell runs out of input, or when a built-in command has
/// requested the shell to exit.
fn run_shell(
    shell: &mut dyn Shell,
    executor: &Executor,
    context: &mut Context,
    options: &ParseOptions,
) {
    loop {
        context.print_job_notices();

        let prompt = match shell.is_interactive() {
            true => prompt::prompt(),
            false => String::new(),
        };

        let line = match shell.prompt_line(&prompt) {
            ShellInput::Line(line) => line,
            ShellInput::Interrupt => continue,
            ShellInput::Logout if shell.is_interactive() => {
                context.host.lock().println("Use 'exit' to quit");
                continue;
            }
            ShellInput::Logout | ShellInput::None => break,
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        context.count_command();
        context.add_history_entry(line);
        shell.add_history_entry(line);

        match parse_with(line, options) {
            Ok(pipeline) => {
                if let Err(err) = executor.execute(&pipeline, context) {
                    context.host.lock().eprintln(&format!("msh: {err}"));
                }
            }
            Err(err) => {
                let mut host = context.host.lock();
                host.eprintln(&format!("msh: {err}"));
                host.eprintln(&format!("help: {}", err.help()));
            }
        }

        context.print_job_notices();

        if context.exit_request().is_some() {
            break;
        }
    }
}
