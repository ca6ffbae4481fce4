use std::{
    ffi::CString,
    os::fd::{AsRawFd, RawFd},
    ptr,
};

use msh_ast::Command;
use msh_core::{status, Reaper};
use nix::{
    sys::signal::{kill, signal, SigHandler, Signal},
    unistd::{close, dup2, fork, ForkResult, Pid},
};

use crate::{
    error::{ExecError, ExecResult},
    redirect::{c_string, ChildRedirects},
};

/// An external program that is ready to be started in a child process.
///
/// Everything that the child needs is allocated up front, as the child of a
/// multi-threaded process may only call async-signal-safe functions.
pub(crate) struct Program {
    name: CString,
    arguments: Vec<CString>,

    /// Null terminated pointers into `arguments`.
    argv: Vec<*const libc::c_char>,

    redirects: ChildRedirects,
}

impl Program {
    pub(crate) fn prepare(command: &Command) -> ExecResult<Self> {
        let name = c_string(&command.program)?;
        let arguments = command
            .arguments
            .iter()
            .map(|arg| c_string(arg))
            .collect::<ExecResult<Vec<_>>>()?;
        let argv = arguments
            .iter()
            .map(|arg| arg.as_ptr())
            .chain(std::iter::once(ptr::null()))
            .collect();

        Ok(Self {
            name,
            arguments,
            argv,
            redirects: ChildRedirects::prepare(command)?,
        })
    }
}

/// Pipe ends that replace a stage's standard streams.
#[derive(Debug, Default, Clone, Copy)]
struct StageFds {
    stdin: Option<RawFd>,
    stdout: Option<RawFd>,
}

/// Starts every program in `programs`, connecting neighbouring stages with
/// pipes.
///
/// Stages without a program are skipped, but still own their pipe ends. Returns
/// the process IDs of the started stages in order. If any stage cannot be
/// started, the stages that were already started are killed and reaped.
pub(crate) fn spawn_pipeline(
    programs: &[Option<Program>],
    reaper: &Reaper,
) -> ExecResult<Vec<Pid>> {
    let pipes = (1..programs.len())
        .map(|_| os_pipe::pipe())
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(ExecError::CreatePipe)?;
    let pipe_fds: Vec<RawFd> = pipes
        .iter()
        .flat_map(|(reader, writer)| [reader.as_raw_fd(), writer.as_raw_fd()])
        .collect();

    let mut pids = Vec::with_capacity(programs.len());
    for (index, program) in programs.iter().enumerate() {
        let Some(program) = program else {
            continue;
        };

        let fds = StageFds {
            stdin: index
                .checked_sub(1)
                .map(|previous| pipes[previous].0.as_raw_fd()),
            stdout: pipes.get(index).map(|(_, writer)| writer.as_raw_fd()),
        };

        match spawn(program, fds, &pipe_fds) {
            Ok(pid) => {
                tracing::debug!(
                    %pid,
                    stage = index,
                    program = ?program.name,
                    argc = program.arguments.len(),
                    "spawned stage"
                );
                pids.push(pid);
            }
            Err(errno) => {
                abort(&pids, reaper);
                return Err(ExecError::Fork(errno));
            }
        }
    }

    // The parent must not keep any pipe end open, or readers never see EOF.
    drop(pipes);
    Ok(pids)
}

/// Kills and reaps already started stages of a pipeline.
fn abort(pids: &[Pid], reaper: &Reaper) {
    for pid in pids {
        let _ = kill(*pid, Signal::SIGKILL);
    }
    reaper.wait_all(pids);
    tracing::warn!(stages = pids.len(), "aborted partially started pipeline");
}

fn spawn(program: &Program, fds: StageFds, pipe_fds: &[RawFd]) -> nix::Result<Pid> {
    // SAFETY: the child only calls async-signal-safe functions before it
    // either replaces its image or exits.
    match unsafe { fork() }? {
        ForkResult::Parent { child } => Ok(child),
        ForkResult::Child => exec_child(program, fds, pipe_fds),
    }
}

fn exec_child(program: &Program, fds: StageFds, pipe_fds: &[RawFd]) -> ! {
    reset_signals();

    if let Some(fd) = fds.stdin {
        let _ = dup2(fd, libc::STDIN_FILENO);
    }
    if let Some(fd) = fds.stdout {
        let _ = dup2(fd, libc::STDOUT_FILENO);
    }
    for fd in pipe_fds {
        let _ = close(*fd);
    }

    if let Err((path, errno)) = program.redirects.apply() {
        write_stderr(&[path.to_bytes(), b": ", errno.desc().as_bytes(), b"\n"]);
        exit(status::GENERAL_ERROR);
    }

    // SAFETY: `argv` is null terminated and points into `arguments`, which
    // outlive the call.
    unsafe {
        libc::execvp(program.name.as_ptr(), program.argv.as_ptr());
    }

    write_stderr(&[program.name.to_bytes(), b": command not found\n"]);
    exit(status::COMMAND_NOT_FOUND);
}

/// Restores the default dispositions of the signals that the shell handles.
fn reset_signals() {
    for sig in [Signal::SIGINT, Signal::SIGCHLD, Signal::SIGPIPE] {
        // SAFETY: restoring a default disposition installs no handler.
        let _ = unsafe { signal(sig, SigHandler::SigDfl) };
    }
}

fn write_stderr(parts: &[&[u8]]) {
    for part in parts {
        // SAFETY: write(2) is async-signal-safe and `part` is a valid buffer.
        unsafe {
            libc::write(libc::STDERR_FILENO, part.as_ptr().cast(), part.len());
        }
    }
}

fn exit(code: i32) -> ! {
    // SAFETY: _exit(2) skips atexit handlers and stdio buffers owned by the
    // parent process.
    unsafe { libc::_exit(code) }
}
