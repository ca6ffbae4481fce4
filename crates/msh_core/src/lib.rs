pub mod command;
mod context;
mod env;
mod jobs;
mod reap;
pub mod status;
pub mod utils;

pub use context::Context;
pub use env::host::Host;
pub use env::std_host::StdHost;
pub use jobs::{Job, JobEntry, JobNotice, JobTable, JobTableError, MAX_JOBS};
pub use reap::{exit_code, ReapError, Reaper};
