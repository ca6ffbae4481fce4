use std::sync::Arc;

use parking_lot::Mutex;

use crate::{Host, JobTable, StdHost, MAX_JOBS};

/// The shell's session state.
///
/// A context is created once when the shell starts, and is passed to the
/// executor and to built-in commands for the remainder of the session.
pub struct Context {
    /// The context's host.
    pub host: Arc<Mutex<dyn Host>>,

    /// Background jobs started within the session.
    ///
    /// The table is shared with the process reaper, which marks jobs as done.
    jobs: Arc<Mutex<JobTable>>,

    /// Lines of input in the order that they were entered.
    history: Vec<String>,

    /// Number of non-empty lines of input that have been executed.
    commands_executed: usize,

    /// Whether or not to report execution statistics for foreground pipelines.
    show_stats: bool,

    /// The exit code of the last foreground pipeline.
    last_exit: i32,

    /// Exit code requested by a built-in command.
    exit_request: Option<i32>,
}

impl Default for Context {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(StdHost)), MAX_JOBS)
    }
}

impl Context {
    /// Constructs a new context.
    pub fn new(host: Arc<Mutex<dyn Host>>, max_jobs: usize) -> Self {
        Self {
            host,
            jobs: Arc::new(Mutex::new(JobTable::new(max_jobs))),
            history: Vec::new(),
            commands_executed: 0,
            show_stats: false,
            last_exit: 0,
            exit_request: None,
        }
    }

    /// Returns a shared handle to the session's job table.
    pub fn jobs(&self) -> Arc<Mutex<JobTable>> {
        Arc::clone(&self.jobs)
    }

    /// Registers an executed line of input.
    pub fn count_command(&mut self) {
        self.commands_executed += 1;
    }

    /// Returns the number of executed lines of input.
    pub fn commands_executed(&self) -> usize {
        self.commands_executed
    }

    /// Appends a line to the session's history.
    pub fn add_history_entry(&mut self, line: &str) {
        self.history.push(line.to_owned());
    }

    /// Returns the session's history, oldest entry first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn show_stats(&self) -> bool {
        self.show_stats
    }

    pub fn set_show_stats(&mut self, show_stats: bool) {
        self.show_stats = show_stats;
    }

    /// Toggles execution statistics, returning the new state.
    pub fn toggle_stats(&mut self) -> bool {
        self.show_stats = !self.show_stats;
        self.show_stats
    }

    /// Registers the exit code of the last foreground pipeline.
    pub fn register_exit(&mut self, code: i32) {
        self.last_exit = code;
    }

    /// Returns the exit code of the last foreground pipeline.
    pub fn last_exit(&self) -> i32 {
        self.last_exit
    }

    /// Requests that the shell exits with a code.
    pub fn request_exit(&mut self, code: i32) {
        self.exit_request = Some(code);
    }

    /// Returns the requested exit code if an exit has been requested.
    pub fn exit_request(&self) -> Option<i32> {
        self.exit_request
    }

    /// Prints the completion notices of all background jobs that have finished
    /// since the last call.
    pub fn print_job_notices(&mut self) {
        let notices = self.jobs.lock().take_notices();
        let mut host = self.host.lock();
        for notice in notices {
            host.println(&notice.to_string());
        }
    }
}
