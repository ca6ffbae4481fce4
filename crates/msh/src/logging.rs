use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives.
const LOG_ENV: &str = "MSH_LOG";

/// Installs a subscriber that writes log records to stderr.
///
/// Only errors are logged unless `MSH_LOG` says otherwise, for example
/// `MSH_LOG=debug` or `MSH_LOG=msh_exec=trace`.
pub(crate) fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("error"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}
