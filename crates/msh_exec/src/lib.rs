mod error;
mod executor;
mod redirect;
mod spawn;

pub use error::{ExecError, ExecResult};
pub use executor::Executor;
