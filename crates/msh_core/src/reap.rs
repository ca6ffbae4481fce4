use std::{
    collections::HashMap,
    io::{self, Read},
    os::fd::IntoRawFd,
    sync::{
        atomic::{AtomicI32, Ordering},
        OnceLock,
    },
    thread,
};

use nix::{
    errno::Errno,
    fcntl::{fcntl, FcntlArg, OFlag},
    sys::{
        signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal},
        wait::{waitpid, WaitPidFlag, WaitStatus},
    },
    unistd::Pid,
};
use os_pipe::PipeReader;
use parking_lot::{const_mutex, Condvar, Mutex};
use thiserror::Error;

use crate::status;

static REAPER: OnceLock<Reaper> = OnceLock::new();
static INSTALLED: Mutex<bool> = const_mutex(false);

/// Write end of the pipe used to wake the reaper thread from the signal handler.
static WAKE_FD: AtomicI32 = AtomicI32::new(-1);

#[derive(Debug, Error)]
pub enum ReapError {
    #[error("could not create wake-up pipe: {0}")]
    CreatePipe(io::Error),

    #[error("could not install SIGCHLD handler: {0}")]
    Signal(Errno),

    #[error("could not start reaper thread: {0}")]
    Thread(io::Error),
}

/// Returns the shell-style exit code for a wait status.
///
/// Processes terminated by a signal are reported as 128 plus the signal number.
/// Returns [`None`] for statuses that do not represent termination.
pub fn exit_code(status: WaitStatus) -> Option<i32> {
    match status {
        WaitStatus::Exited(_, code) => Some(code),
        WaitStatus::Signaled(_, signal, _) => Some(status::SIGNAL_OFFSET + signal as i32),
        _ => None,
    }
}

/// Who is interested in a child's exit code.
enum Owner {
    /// A thread waiting in [`Reaper::wait_all`].
    Foreground,

    /// A callback to invoke once the child has exited.
    Job(Box<dyn FnOnce(i32) + Send>),

    /// Nobody. The exit code is discarded.
    Detached,
}

#[derive(Default)]
struct ReapState {
    owners: HashMap<Pid, Owner>,

    /// Exit codes waiting to be claimed.
    exited: HashMap<Pid, i32>,
}

/// The single place where child processes of the shell are waited for.
///
/// A `SIGCHLD` handler wakes a dedicated thread that reaps every exited child
/// without blocking. Exit codes are then routed to whoever claimed the child:
/// a foreground wait, a background job callback, or nobody.
///
/// Children may exit before they are claimed. Their exit codes are kept until
/// they are claimed.
pub struct Reaper {
    state: Mutex<ReapState>,
    exited: Condvar,
}

impl Reaper {
    fn new() -> Self {
        Self {
            state: Mutex::new(ReapState::default()),
            exited: Condvar::new(),
        }
    }

    /// Returns the process-wide reaper, installing it on first use.
    pub fn global() -> Result<&'static Reaper, ReapError> {
        let mut installed = INSTALLED.lock();
        let reaper = REAPER.get_or_init(Reaper::new);
        if !*installed {
            install(reaper)?;
            *installed = true;
        }
        Ok(reaper)
    }

    /// Blocks until every process in `pids` has exited.
    ///
    /// Returns the exit codes in the same order as `pids`.
    pub fn wait_all(&self, pids: &[Pid]) -> Vec<i32> {
        let mut state = self.state.lock();
        for pid in pids {
            if !state.exited.contains_key(pid) {
                state.owners.insert(*pid, Owner::Foreground);
            }
        }

        while !pids.iter().all(|pid| state.exited.contains_key(pid)) {
            self.exited.wait(&mut state);
        }

        pids.iter()
            .map(|pid| state.exited.remove(pid).unwrap_or(status::GENERAL_ERROR))
            .collect()
    }

    /// Invokes `callback` with a process's exit code once it has exited.
    ///
    /// The callback runs on the reaper thread, or immediately on the calling
    /// thread if the process has already exited.
    pub fn watch<F>(&self, pid: Pid, callback: F)
    where
        F: FnOnce(i32) + Send + 'static,
    {
        let mut state = self.state.lock();
        match state.exited.remove(&pid) {
            Some(code) => {
                drop(state);
                callback(code);
            }
            None => {
                state.owners.insert(pid, Owner::Job(Box::new(callback)));
            }
        }
    }

    /// Discards a process's exit code.
    pub fn detach(&self, pid: Pid) {
        let mut state = self.state.lock();
        if state.exited.remove(&pid).is_none() {
            state.owners.insert(pid, Owner::Detached);
        }
    }

    /// Routes an exit code to the process's owner.
    fn record(&self, pid: Pid, code: i32) {
        let mut state = self.state.lock();
        match state.owners.remove(&pid) {
            Some(Owner::Job(callback)) => {
                drop(state);
                callback(code);
            }
            Some(Owner::Detached) => {}
            Some(Owner::Foreground) | None => {
                state.exited.insert(pid, code);
                drop(state);
                self.exited.notify_all();
            }
        }
    }

    /// Reaps all exited children without blocking.
    fn reap_exited(&self) {
        loop {
            match waitpid(Pid::from_raw(-1), Some(WaitPidFlag::WNOHANG)) {
                Ok(WaitStatus::StillAlive) | Err(Errno::ECHILD) => return,
                Ok(status) => {
                    if let (Some(pid), Some(code)) = (status.pid(), exit_code(status)) {
                        tracing::trace!(%pid, code, "reaped child");
                        self.record(pid, code);
                    }
                }
                Err(Errno::EINTR) => continue,
                Err(err) => {
                    tracing::error!("waitpid failed: {err}");
                    return;
                }
            }
        }
    }

    fn run(&self, mut wake: PipeReader) {
        let mut buf = [0u8; 64];
        loop {
            self.reap_exited();
            match wake.read(&mut buf) {
                Ok(0) => return,
                Ok(_) => {}
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => {
                    tracing::error!("reaper stopped: {err}");
                    return;
                }
            }
        }
    }
}

extern "C" fn on_sigchld(_: libc::c_int) {
    let fd = WAKE_FD.load(Ordering::Relaxed);
    if fd < 0 {
        return;
    }

    let saved = Errno::last_raw();
    let byte = 1u8;
    // SAFETY: write(2) is async-signal-safe and `byte` outlives the call.
    unsafe {
        libc::write(fd, (&byte as *const u8).cast(), 1);
    }
    Errno::set_raw(saved);
}

fn install(reaper: &'static Reaper) -> Result<(), ReapError> {
    let (reader, writer) = os_pipe::pipe().map_err(ReapError::CreatePipe)?;
    let write_fd = writer.into_raw_fd();
    fcntl(write_fd, FcntlArg::F_SETFL(OFlag::O_NONBLOCK))
        .map_err(|errno| ReapError::CreatePipe(errno.into()))?;
    WAKE_FD.store(write_fd, Ordering::Relaxed);

    let action = SigAction::new(
        SigHandler::Handler(on_sigchld),
        SaFlags::SA_RESTART | SaFlags::SA_NOCLDSTOP,
        SigSet::empty(),
    );
    // SAFETY: the handler only performs async-signal-safe operations.
    unsafe { sigaction(Signal::SIGCHLD, &action) }.map_err(ReapError::Signal)?;

    thread::Builder::new()
        .name("msh-reaper".into())
        .spawn(move || reaper.run(reader))
        .map_err(ReapError::Thread)?;

    tracing::debug!("installed child process reaper");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{
        process::{Command, Stdio},
        sync::mpsc,
        time::Duration,
    };

    use super::*;

    fn spawn(program: &str, args: &[&str]) -> Pid {
        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .spawn()
            .expect("spawn child");
        Pid::from_raw(child.id() as i32)
    }

    #[test]
    fn it_waits_for_all_processes_in_order() {
        let reaper = Reaper::global().expect("install reaper");
        let pids = [spawn("/bin/sh", &["-c", "exit 3"]), spawn("/bin/sh", &["-c", "exit 0"])];
        assert_eq!(reaper.wait_all(&pids), vec![3, 0]);
    }

    #[test]
    fn it_reports_signals_as_exit_codes() {
        let reaper = Reaper::global().expect("install reaper");
        let pid = spawn("/bin/sh", &["-c", "kill -9 $$"]);
        assert_eq!(reaper.wait_all(&[pid]), vec![128 + 9]);
    }

    #[test]
    fn it_invokes_callbacks_for_watched_processes() {
        let reaper = Reaper::global().expect("install reaper");
        let (tx, rx) = mpsc::channel();
        let pid = spawn("/bin/sh", &["-c", "sleep 0.1; exit 7"]);
        reaper.watch(pid, move |code| {
            let _ = tx.send(code);
        });

        let code = rx
            .recv_timeout(Duration::from_secs(10))
            .expect("callback is invoked");
        assert_eq!(code, 7);
    }

    #[test]
    fn it_invokes_callbacks_for_processes_that_have_already_exited() {
        let reaper = Reaper::global().expect("install reaper");
        let pid = spawn("/bin/sh", &["-c", "exit 5"]);
        thread::sleep(Duration::from_millis(300));

        let (tx, rx) = mpsc::channel();
        reaper.watch(pid, move |code| {
            let _ = tx.send(code);
        });
        assert_eq!(rx.recv_timeout(Duration::from_secs(10)), Ok(5));
    }

    #[test]
    fn it_maps_wait_statuses_to_exit_codes() {
        let pid = Pid::from_raw(1);
        assert_eq!(exit_code(WaitStatus::Exited(pid, 2)), Some(2));
        assert_eq!(
            exit_code(WaitStatus::Signaled(pid, Signal::SIGTERM, false)),
            Some(128 + 15)
        );
        assert_eq!(exit_code(WaitStatus::StillAlive), None);
    }
}
