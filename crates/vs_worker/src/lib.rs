use chrono::{DateTime, Utc};
use std::io::Write;
use std::time::Duration;
use tracing::{debug, info};
use vs_core::{Error, Result};

pub const DEFAULT_TOTAL_JOBS: u32 = 10;
pub const DEFAULT_JOB_INTERVAL: Duration = Duration::from_secs(1);

/// Printed in place of an API key that was never configured.
pub const MISSING_API_KEY: &str = "None";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobProgress {
    pub completed: u32,
    pub total: u32,
}

impl JobProgress {
    pub fn new(total: u32) -> Self {
        Self { completed: 0, total }
    }

    pub fn is_finished(&self) -> bool {
        self.completed >= self.total
    }

    fn advance(&mut self) {
        self.completed += 1;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    NotStarted,
    Running,
    Finished,
}

#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Display only.
    pub api_key: Option<String>,
    pub total_jobs: u32,
    pub interval: Duration,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            total_jobs: DEFAULT_TOTAL_JOBS,
            interval: DEFAULT_JOB_INTERVAL,
        }
    }
}

/// Runs a fixed number of jobs one after another, writing a progress line to
/// `out` after each.
pub struct Worker<W: Write> {
    config: WorkerConfig,
    progress: JobProgress,
    state: WorkerState,
    out: W,
}

impl<W: Write> Worker<W> {
    pub fn new(config: WorkerConfig, out: W) -> Self {
        let progress = JobProgress::new(config.total_jobs);
        Self {
            config,
            progress,
            state: WorkerState::NotStarted,
            out,
        }
    }

    pub fn state(&self) -> WorkerState {
        self.state
    }

    pub fn progress(&self) -> JobProgress {
        self.progress
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub async fn run(&mut self) -> Result<JobProgress> {
        if self.state != WorkerState::NotStarted {
            return Err(Error::Worker(format!("Worker cannot start from state {:?}", self.state)));
        }

        let api_key = self.config.api_key.as_deref().unwrap_or(MISSING_API_KEY);
        self.emit(&format!("API key: {}", api_key))?;

        let started_at: DateTime<Utc> = Utc::now();
        self.state = WorkerState::Running;
        self.emit("Worker is working...")?;

        while !self.progress.is_finished() {
            tokio::time::sleep(self.config.interval).await;
            self.progress.advance();
            debug!("Completed job {} of {}", self.progress.completed, self.progress.total);
            self.emit(&format!("Job done: {}/{}", self.progress.completed, self.progress.total))?;
        }

        self.state = WorkerState::Finished;
        self.emit("Worker finished")?;

        let finished_at = Utc::now();
        info!(
            "🏁 {} jobs done between {} and {} ({} ms)",
            self.progress.total,
            started_at.to_rfc3339(),
            finished_at.to_rfc3339(),
            (finished_at - started_at).num_milliseconds()
        );

        Ok(self.progress)
    }

    fn emit(&mut self, line: &str) -> Result<()> {
        writeln!(self.out, "{}", line)?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_key: Option<&str>, total_jobs: u32) -> WorkerConfig {
        WorkerConfig {
            api_key: api_key.map(str::to_string),
            total_jobs,
            interval: DEFAULT_JOB_INTERVAL,
        }
    }

    fn lines(worker: Worker<Vec<u8>>) -> Vec<String> {
        String::from_utf8(worker.into_inner())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_worker_reports_every_job() {
        let mut worker = Worker::new(config(Some("secret"), DEFAULT_TOTAL_JOBS), Vec::new());
        assert_eq!(worker.state(), WorkerState::NotStarted);

        let progress = worker.run().await.unwrap();
        assert_eq!(progress, JobProgress { completed: 10, total: 10 });
        assert_eq!(worker.state(), WorkerState::Finished);

        let mut expected = vec!["API key: secret".to_string(), "Worker is working...".to_string()];
        expected.extend((1..=10).map(|i| format!("Job done: {}/10", i)));
        expected.push("Worker finished".to_string());
        assert_eq!(lines(worker), expected);
    }

    #[tokio::test(start_paused = true)]
    async fn test_worker_paces_jobs() {
        let start = tokio::time::Instant::now();
        let mut worker = Worker::new(config(None, 3), std::io::sink());
        worker.run().await.unwrap();
        let elapsed = start.elapsed();
        assert!(elapsed >= DEFAULT_JOB_INTERVAL * 3);
        assert!(elapsed < DEFAULT_JOB_INTERVAL * 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_api_key_is_not_fatal() {
        let mut worker = Worker::new(config(None, 1), Vec::new());
        worker.run().await.unwrap();
        assert_eq!(
            lines(worker),
            vec!["API key: None", "Worker is working...", "Job done: 1/1", "Worker finished"]
        );
    }

    #[tokio::test]
    async fn test_zero_jobs_finishes_immediately() {
        let mut worker = Worker::new(config(Some("k"), 0), Vec::new());
        let progress = worker.run().await.unwrap();
        assert!(progress.is_finished());
        assert_eq!(lines(worker), vec!["API key: k", "Worker is working...", "Worker finished"]);
    }

    #[tokio::test]
    async fn test_worker_does_not_restart() {
        let mut worker = Worker::new(config(None, 0), std::io::sink());
        worker.run().await.unwrap();
        assert!(matches!(worker.run().await, Err(Error::Worker(_))));
        assert_eq!(worker.progress().completed, 0);
    }
}
