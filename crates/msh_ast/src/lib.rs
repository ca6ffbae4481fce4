mod command;
mod pipeline;

pub use command::Command;
pub use pipeline::Pipeline;
