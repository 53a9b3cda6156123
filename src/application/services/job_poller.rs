use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use crate::application::ports::{TranscriptionJobClient, TranscriptionJobError};
use crate::domain::{JobStatus, ScribeJobRequest};

#[derive(Debug, Clone)]
pub struct JobPollerConfig {
    pub poll_interval: Duration,
    /// Must stay below the host's hard execution timeout.
    pub time_budget: Duration,
    pub status_retry_attempts: u32,
    pub status_retry_backoff: Duration,
}

impl Default for JobPollerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(30),
            time_budget: Duration::from_secs(840),
            status_retry_attempts: 3,
            status_retry_backoff: Duration::from_secs(1),
        }
    }
}

/// Last observed state of a job when the poller returned.
///
/// `finished == false` means the budget ran out first: the job was submitted
/// and its outcome is not known yet. That is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOutcome {
    pub status: JobStatus,
    pub status_checks: u32,
    pub finished: bool,
}

pub struct JobPoller {
    client: Arc<dyn TranscriptionJobClient>,
    config: JobPollerConfig,
}

impl JobPoller {
    pub fn new(client: Arc<dyn TranscriptionJobClient>, config: JobPollerConfig) -> Self {
        Self { client, config }
    }

    /// Deadline for an invocation starting now.
    pub fn deadline(&self) -> Instant {
        Instant::now() + self.config.time_budget
    }

    /// Submits the job once, then waits for it until `deadline`.
    #[tracing::instrument(skip(self, request, deadline), fields(job_name = %request.job_name()))]
    pub async fn submit_and_wait(
        &self,
        request: &ScribeJobRequest,
        deadline: Instant,
    ) -> Result<PollOutcome, JobPollerError> {
        let submission = tokio::time::timeout_at(deadline, self.client.submit(request))
            .await
            .map_err(|_| {
                JobPollerError::Submission(TranscriptionJobError::Transient(
                    "submission did not answer before the deadline".to_string(),
                ))
            })?;

        match submission {
            Ok(()) => {
                tracing::info!(media_uri = %request.media_uri, "Scribe job submitted");
            }
            Err(TranscriptionJobError::Conflict(reason)) => {
                tracing::info!(reason = %reason, "Scribe job already exists, polling it");
            }
            Err(e) => return Err(JobPollerError::Submission(e)),
        }

        self.wait(request.job_name(), deadline).await
    }

    pub async fn wait(
        &self,
        job_name: &str,
        deadline: Instant,
    ) -> Result<PollOutcome, JobPollerError> {
        let mut status_checks = 0;
        let mut last_status = JobStatus::InProgress;

        loop {
            let Some(status) = self.check_status(job_name, deadline).await? else {
                tracing::warn!(
                    status = %last_status,
                    status_checks,
                    "Status check still pending at the deadline"
                );
                return Ok(PollOutcome {
                    status: last_status,
                    status_checks,
                    finished: false,
                });
            };
            status_checks += 1;
            last_status = status;

            if status.is_terminal() {
                tracing::info!(status = %status, status_checks, "Scribe job finished");
                return Ok(PollOutcome {
                    status,
                    status_checks,
                    finished: true,
                });
            }

            let now = Instant::now();
            if now >= deadline {
                tracing::warn!(
                    status = %status,
                    status_checks,
                    "Time budget exhausted before the scribe job finished"
                );
                return Ok(PollOutcome {
                    status,
                    status_checks,
                    finished: false,
                });
            }

            tracing::debug!(status = %status, "Scribe job not ready yet");
            let pause = self.config.poll_interval.min(deadline - now);
            tokio::time::sleep(pause).await;
        }
    }

    /// `Ok(None)` when the deadline passes before the service answers.
    async fn check_status(
        &self,
        job_name: &str,
        deadline: Instant,
    ) -> Result<Option<JobStatus>, JobPollerError> {
        let mut retries_left = self.config.status_retry_attempts;
        let mut delay = self.config.status_retry_backoff;

        loop {
            let Ok(result) =
                tokio::time::timeout_at(deadline, self.client.get_status(job_name)).await
            else {
                return Ok(None);
            };

            match result {
                Ok(status) => return Ok(Some(status)),
                Err(e)
                    if e.is_transient()
                        && retries_left > 0
                        && Instant::now() + delay <= deadline =>
                {
                    retries_left -= 1;
                    tracing::warn!(
                        error = %e,
                        retries_left,
                        delay_ms = delay.as_millis() as u64,
                        "Status check failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
                Err(e) => return Err(JobPollerError::Status(e)),
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum JobPollerError {
    #[error("job submission: {0}")]
    Submission(TranscriptionJobError),
    #[error("job status: {0}")]
    Status(TranscriptionJobError),
}
