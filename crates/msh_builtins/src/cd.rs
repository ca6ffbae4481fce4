use std::{
    env,
    ffi::{OsStr, OsString},
    io::Write,
    path::PathBuf,
};

use clap::Parser;
use msh_core::{
    command::{Args, Command, CommandResult, Io},
    status,
    utils::path_to_string,
};

use crate::utils;

/// Command name.
const NAME: &str = "cd";

/// Change the shell's working directory.
///
/// If no directory is supplied, user's home directory is used.
///
/// This is a built-in shell command.
#[derive(Parser)]
#[clap(name = NAME, version)]
struct CdOpts {
    /// Directory to change to.
    ///
    /// If supplied with the directory "-", the working directory is changed to
    /// the shell's previous working directory.
    directory: Option<OsString>,
}

/// Implementation for the "cd" built-in command.
#[derive(Clone)]
pub struct Cd;
impl Command for Cd {
    fn name(&self) -> &str {
        NAME
    }

    fn run(&self, args: &mut Args) -> CommandResult {
        match CdOpts::try_parse_from(args.iter()) {
            Ok(opts) => change_directory(opts, args.io),
            Err(err) => utils::exit_with_parse_error(args.io, err),
        }
    }
}

/// Changes the working directory of the shell's process.
///
/// `$PWD` and `$OLDPWD` are updated so that child processes inherit them.
/// Prints the new working directory to stdout if the directory is "-".
fn change_directory(opts: CdOpts, io: &mut Io) -> CommandResult {
    let is_previous = opts.directory.as_deref() == Some(OsStr::new("-"));
    let directory = match opts.directory {
        Some(_) if is_previous => env::var_os("OLDPWD").map(PathBuf::from),
        Some(dir) => Some(PathBuf::from(dir)),
        None => dirs::home_dir(),
    };

    let Some(path) = directory else {
        let missing = if is_previous { "OLDPWD not set" } else { "HOME not set" };
        return utils::exit_with_error(io, NAME, missing);
    };

    let previous = env::current_dir().ok();
    if let Err(err) = env::set_current_dir(&path) {
        return utils::exit_with_error(io, NAME, &format!("{}: {}", path_to_string(&path), err));
    }

    let current = env::current_dir().unwrap_or(path);
    if let Some(previous) = previous {
        env::set_var("OLDPWD", previous);
    }
    env::set_var("PWD", &current);
    tracing::debug!(directory = %current.display(), "changed working directory");

    if is_previous {
        if let Err(err) = writeln!(io.stdout, "{}", path_to_string(&current)) {
            return utils::exit_with_error(io, NAME, &err.to_string());
        }
    }

    CommandResult::code(status::SUCCESS)
}
