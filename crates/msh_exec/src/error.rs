use std::io;

use msh_core::{JobTableError, ReapError};
use nix::errno::Errno;
use thiserror::Error;

pub type ExecResult<T> = Result<T, ExecError>;

#[derive(Debug, Error)]
pub enum ExecError {
    /// An argument or path cannot be passed to a program.
    #[error("{0}: argument contains a nul byte")]
    InvalidArgument(String),

    #[error("failed to create pipe: {0}")]
    CreatePipe(io::Error),

    #[error("failed to fork: {0}")]
    Fork(Errno),

    #[error(transparent)]
    Jobs(#[from] JobTableError),

    #[error(transparent)]
    Reaper(#[from] ReapError),

    /// A redirection could not be opened by the shell itself.
    #[error("{0}: {1}")]
    Redirect(String, io::Error),
}
