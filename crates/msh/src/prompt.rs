use std::env;

use msh_core::utils::dir_name;
use nix::unistd::gethostname;

/// Returns the interactive prompt: `user@host:dir$ `.
pub(crate) fn prompt() -> String {
    let user = env::var("USER").unwrap_or_else(|_| "user".to_owned());
    let host = gethostname()
        .map(|host| host.to_string_lossy().into_owned())
        .unwrap_or_else(|_| "localhost".to_owned());
    let dir = env::current_dir()
        .map(|cwd| dir_name(&cwd))
        .unwrap_or_else(|_| "?".to_owned());

    format_prompt(&user, &host, &dir)
}

fn format_prompt(user: &str, host: &str, dir: &str) -> String {
    format!("{user}@{host}:{dir}$ ")
}
