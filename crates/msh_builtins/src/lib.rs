mod cd;
mod clear;
mod exit;
mod help;
mod history;
mod jobs;
mod pwd;
mod stats;
mod utils;

pub use cd::Cd;
pub use clear::Clear;
pub use exit::Exit;
pub use help::Help;
pub use history::History;
pub use jobs::Jobs;
pub use pwd::Pwd;
pub use stats::Stats;

/// Returns one instance of every built-in command.
pub fn all_builtins() -> Vec<Box<dyn msh_core::command::Command>> {
    vec![
        Box::new(Cd),
        Box::new(Clear),
        Box::new(Exit),
        Box::new(Help),
        Box::new(History),
        Box::new(Jobs),
        Box::new(Pwd),
        Box::new(Stats),
    ]
}
