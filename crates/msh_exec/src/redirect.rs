use std::{
    ffi::{CStr, CString},
    fs::{File, OpenOptions},
    io,
    os::{fd::RawFd, unix::fs::OpenOptionsExt},
};

use msh_ast::Command;
use msh_core::command::Io;
use nix::{
    errno::Errno,
    fcntl::{open, OFlag},
    sys::stat::Mode,
    unistd::{close, dup2},
};

use crate::error::{ExecError, ExecResult};

/// Permissions for files created by output redirection.
const FILE_MODE: u32 = 0o644;

/// Opens a command's redirections within the shell's own process.
///
/// Streams that are not redirected are inherited from the shell.
pub(crate) fn open_io(command: &Command) -> ExecResult<Io> {
    let stdin: Box<dyn io::Read + Send> = match &command.input_source {
        Some(path) => {
            Box::new(File::open(path).map_err(|err| ExecError::Redirect(path.clone(), err))?)
        }
        None => Box::new(io::stdin()),
    };

    let stdout: Box<dyn io::Write + Send> = match &command.output_target {
        Some(path) => Box::new(
            open_output(path, command.append)
                .map_err(|err| ExecError::Redirect(path.clone(), err))?,
        ),
        None => Box::new(io::stdout()),
    };

    Ok(Io::new(stdin, stdout, Box::new(io::stderr())))
}

fn open_output(path: &str, append: bool) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).mode(FILE_MODE);
    if append {
        options.append(true);
    } else {
        options.truncate(true);
    }
    options.open(path)
}

/// Redirections of a command, prepared to be applied in a child process.
#[derive(Debug, Default)]
pub(crate) struct ChildRedirects {
    input: Option<CString>,
    output: Option<(CString, bool)>,
}

impl ChildRedirects {
    pub(crate) fn prepare(command: &Command) -> ExecResult<Self> {
        let input = command.input_source.as_deref().map(c_string).transpose()?;
        let output = match command.output_target.as_deref() {
            Some(path) => Some((c_string(path)?, command.append)),
            None => None,
        };
        Ok(Self { input, output })
    }

    /// Replaces the calling process's stdin and stdout with the redirections.
    ///
    /// Only async-signal-safe functions are called. On failure, the offending
    /// path is returned along with the reason.
    pub(crate) fn apply(&self) -> Result<(), (&CStr, Errno)> {
        if let Some(path) = &self.input {
            replace_fd(path, OFlag::O_RDONLY, libc::STDIN_FILENO).map_err(|err| (&**path, err))?;
        }

        if let Some((path, append)) = &self.output {
            let mode = if *append {
                OFlag::O_APPEND
            } else {
                OFlag::O_TRUNC
            };
            replace_fd(
                path,
                OFlag::O_WRONLY | OFlag::O_CREAT | mode,
                libc::STDOUT_FILENO,
            )
            .map_err(|err| (&**path, err))?;
        }

        Ok(())
    }
}

fn replace_fd(path: &CStr, flags: OFlag, target: RawFd) -> Result<(), Errno> {
    let fd = open(path, flags, Mode::from_bits_truncate(FILE_MODE as _))?;
    if fd != target {
        dup2(fd, target)?;
        close(fd)?;
    }
    Ok(())
}

pub(crate) fn c_string(text: &str) -> ExecResult<CString> {
    CString::new(text).map_err(|_| ExecError::InvalidArgument(text.to_owned()))
}
