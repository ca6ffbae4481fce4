use std::{
    collections::BTreeMap,
    fmt::Display,
    time::{Duration, Instant},
};

use nix::unistd::Pid;
use thiserror::Error;

/// Default number of jobs that a job table can hold.
pub const MAX_JOBS: usize = 64;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum JobTableError {
    /// Every slot in the table is occupied by a running job.
    #[error("too many background jobs: all {0} job slots are running")]
    Full(usize),
}

/// A background pipeline, tracked through the process of its final stage.
#[derive(Debug, Clone)]
pub struct Job {
    /// Process ID of the pipeline's last stage.
    pub pid: Pid,

    /// Human readable representation of the whole pipeline.
    pub display_command: String,

    /// `true` until the job's process has exited.
    pub running: bool,

    /// Time of registration.
    pub start_time: Instant,

    /// Time at which the job was observed to have exited.
    pub finish_time: Option<Instant>,

    /// Exit code of the job's process.
    pub exit_code: Option<i32>,
}

impl Job {
    /// Returns the time that the job has been running, or ran for if it has
    /// exited.
    pub fn elapsed(&self) -> Duration {
        self.finish_time
            .unwrap_or_else(Instant::now)
            .saturating_duration_since(self.start_time)
    }
}

/// A snapshot of a job's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobEntry {
    pub ordinal: usize,
    pub pid: Pid,
    pub running: bool,
    pub elapsed: Duration,
    pub exit_code: Option<i32>,
    pub display_command: String,
}

/// A notice reporting that a job has finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobNotice {
    pub ordinal: usize,
    pub pid: Pid,
    pub elapsed: Duration,
    pub exit_code: i32,
    pub display_command: String,
}

impl Display for JobNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[Job {}] Done ({:.0}s)\t{}",
            self.ordinal,
            self.elapsed.as_secs_f64(),
            self.display_command
        )
    }
}

/// A bounded registry of background jobs.
///
/// Jobs are numbered by ordinals starting at 1. An ordinal is assigned once and
/// is never reused, so a job keeps its number for as long as it is tracked.
#[derive(Debug)]
pub struct JobTable {
    /// Maximum number of tracked jobs.
    capacity: usize,

    /// Most recently assigned ordinal.
    last_ordinal: usize,

    /// Tracked jobs keyed by their ordinal.
    jobs: BTreeMap<usize, Job>,

    /// Completion notices that have not yet been taken.
    notices: Vec<JobNotice>,
}

impl Default for JobTable {
    fn default() -> Self {
        Self::new(MAX_JOBS)
    }
}

impl JobTable {
    /// Constructs an empty job table holding at most `capacity` jobs.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            last_ordinal: 0,
            jobs: BTreeMap::new(),
            notices: Vec::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` if another job can be registered.
    ///
    /// Finished jobs are evicted on demand, so only running jobs occupy slots
    /// permanently.
    pub fn has_capacity(&self) -> bool {
        self.running_count() < self.capacity
    }

    /// Returns the number of running jobs.
    pub fn running_count(&self) -> usize {
        self.jobs.values().filter(|job| job.running).count()
    }

    /// Registers a running job and returns its ordinal.
    ///
    /// If the table is full, finished jobs are evicted to make room.
    pub fn register<S: Into<String>>(
        &mut self,
        pid: Pid,
        display_command: S,
    ) -> Result<usize, JobTableError> {
        if self.jobs.len() >= self.capacity {
            self.evict_finished();
        }

        if self.jobs.len() >= self.capacity {
            return Err(JobTableError::Full(self.capacity));
        }

        self.last_ordinal += 1;
        let ordinal = self.last_ordinal;
        self.jobs.insert(
            ordinal,
            Job {
                pid,
                display_command: display_command.into(),
                running: true,
                start_time: Instant::now(),
                finish_time: None,
                exit_code: None,
            },
        );

        tracing::debug!(ordinal, %pid, "registered background job");
        Ok(ordinal)
    }

    /// Marks the running job with a process ID as done.
    ///
    /// Returns a completion notice, or [`None`] if no running job matches the
    /// process ID. The notice is also queued for [`JobTable::take_notices`].
    pub fn mark_done(&mut self, pid: Pid, exit_code: i32) -> Option<JobNotice> {
        let (ordinal, job) = self
            .jobs
            .iter_mut()
            .find(|(_, job)| job.pid == pid && job.running)?;

        job.running = false;
        job.finish_time = Some(Instant::now());
        job.exit_code = Some(exit_code);

        let notice = JobNotice {
            ordinal: *ordinal,
            pid,
            elapsed: job.elapsed(),
            exit_code,
            display_command: job.display_command.clone(),
        };

        tracing::debug!(ordinal, %pid, exit_code, "background job done");
        self.notices.push(notice.clone());
        Some(notice)
    }

    /// Returns a snapshot of all tracked jobs in order of their ordinals.
    pub fn list(&self) -> Vec<JobEntry> {
        self.jobs
            .iter()
            .map(|(ordinal, job)| JobEntry {
                ordinal: *ordinal,
                pid: job.pid,
                running: job.running,
                elapsed: job.elapsed(),
                exit_code: job.exit_code,
                display_command: job.display_command.clone(),
            })
            .collect()
    }

    /// Returns a tracked job by its ordinal.
    pub fn get(&self, ordinal: usize) -> Option<&Job> {
        self.jobs.get(&ordinal)
    }

    /// Removes and returns all queued completion notices.
    pub fn take_notices(&mut self) -> Vec<JobNotice> {
        std::mem::take(&mut self.notices)
    }

    /// Removes all finished jobs from the table.
    fn evict_finished(&mut self) {
        let before = self.jobs.len();
        self.jobs.retain(|_, job| job.running);
        let evicted = before - self.jobs.len();
        if evicted > 0 {
            tracing::warn!(evicted, "evicted finished background jobs");
        }
    }
}
