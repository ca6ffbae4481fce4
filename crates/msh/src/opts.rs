use std::path::PathBuf;

use clap::Parser;
use msh_core::MAX_JOBS;
use msh_parse::{ParseOptions, MAX_STAGES};

/// File name of the history file within the user's home directory.
const HISTORY_FILE_NAME: &str = ".msh_history";

/// Command line options for the application's CLI.
#[derive(Debug, Parser)]
#[command(about = "A minimal shell with pipelines, redirection and background jobs.", version)]
pub(crate) struct Opts {
    /// Execute a single line of input and exit.
    #[arg(short, long, conflicts_with = "script")]
    pub command: Option<String>,

    /// Script file to execute line by line.
    pub script: Option<PathBuf>,

    /// Report the execution time of foreground pipelines.
    #[arg(long)]
    pub stats: bool,

    /// Maximum number of stages in a pipeline.
    #[arg(long, env = "MSH_MAX_STAGES", default_value_t = MAX_STAGES, value_parser = at_least_one)]
    pub max_stages: usize,

    /// Reject pipelines with too many stages instead of discarding the excess stages.
    #[arg(long)]
    pub strict_stages: bool,

    /// Maximum number of background jobs.
    #[arg(long, env = "MSH_MAX_JOBS", default_value_t = MAX_JOBS, value_parser = at_least_one)]
    pub max_jobs: usize,

    /// File that interactive history is loaded from and saved to.
    ///
    /// Defaults to ~/.msh_history.
    #[arg(long, env = "MSH_HISTORY_FILE")]
    pub history_file: Option<PathBuf>,
}

impl Opts {
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            max_stages: self.max_stages,
            strict_stages: self.strict_stages,
        }
    }

    /// Returns the path to the interactive history file.
    pub fn history_file(&self) -> PathBuf {
        self.history_file.clone().unwrap_or_else(|| {
            let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/tmp"));
            path.push(HISTORY_FILE_NAME);
            path
        })
    }
}

fn at_least_one(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_owned()),
        Ok(n) => Ok(n),
        Err(err) => Err(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_uses_defaults() {
        let opts = Opts::try_parse_from(["msh"]).unwrap();
        assert_eq!(opts.command, None);
        assert_eq!(opts.script, None);
        assert!(!opts.stats);
        assert!(!opts.strict_stages);
    }

    #[test]
    fn it_parses_limits() {
        let opts =
            Opts::try_parse_from(["msh", "--max-stages", "3", "--strict-stages", "--max-jobs", "2"])
                .unwrap();
        assert_eq!(
            opts.parse_options(),
            ParseOptions {
                max_stages: 3,
                strict_stages: true
            }
        );
        assert_eq!(opts.max_jobs, 2);
    }

    #[test]
    fn it_rejects_zero_limits() {
        assert!(Opts::try_parse_from(["msh", "--max-stages", "0"]).is_err());
        assert!(Opts::try_parse_from(["msh", "--max-jobs", "0"]).is_err());
    }

    #[test]
    fn it_rejects_both_a_command_and_a_script() {
        assert!(Opts::try_parse_from(["msh", "-c", "ls", "script.msh"]).is_err());
    }
}
