use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;

use medisync::application::ports::{TranscriptionJobClient, TranscriptionJobError};
use medisync::application::services::{JobPoller, JobPollerConfig, JobPollerError};
use medisync::domain::{JobIdentity, JobStatus, ObjectKey, ScribeJobRequest, StorageEvent};
use medisync::infrastructure::healthscribe::MockTranscriptionJobClient;

struct SlowClient {
    submit_delay: Duration,
    status_delay: Duration,
}

#[async_trait::async_trait]
impl TranscriptionJobClient for SlowClient {
    async fn submit(&self, _request: &ScribeJobRequest) -> Result<(), TranscriptionJobError> {
        tokio::time::sleep(self.submit_delay).await;
        Ok(())
    }

    async fn get_status(&self, _job_name: &str) -> Result<JobStatus, TranscriptionJobError> {
        tokio::time::sleep(self.status_delay).await;
        Ok(JobStatus::Completed)
    }
}

fn request() -> ScribeJobRequest {
    let event = StorageEvent::new("audio-source", ObjectKey::new("patientA/input/audio1.mp3"));
    let identity = JobIdentity::derive(&event.object_key);
    ScribeJobRequest::for_upload(&event, identity, "scribe-output", "arn:aws:iam::1:role/scribe")
}

fn config(poll_interval: Duration, time_budget: Duration) -> JobPollerConfig {
    JobPollerConfig {
        poll_interval,
        time_budget,
        status_retry_attempts: 3,
        status_retry_backoff: Duration::from_secs(1),
    }
}

#[tokio::test]
async fn given_status_sequence_ending_completed_when_polling_with_zero_interval_then_returns_completed_after_three_checks()
 {
    let client = Arc::new(MockTranscriptionJobClient::with_statuses(&[
        JobStatus::InProgress,
        JobStatus::InProgress,
        JobStatus::Completed,
    ]));
    let poller = JobPoller::new(
        client.clone(),
        config(Duration::ZERO, Duration::from_secs(60)),
    );

    let outcome = poller
        .submit_and_wait(&request(), poller.deadline())
        .await
        .unwrap();

    assert_eq!(outcome.status, JobStatus::Completed);
    assert_eq!(outcome.status_checks, 3);
    assert!(outcome.finished);
    assert_eq!(client.status_calls(), 3);
    assert_eq!(client.submissions().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn given_job_that_never_finishes_when_polling_then_returns_in_progress_within_budget() {
    let interval = Duration::from_secs(30);
    let budget = Duration::from_secs(840);
    let client = Arc::new(MockTranscriptionJobClient::always(JobStatus::InProgress));
    let poller = JobPoller::new(client.clone(), config(interval, budget));

    let start = Instant::now();
    let outcome = poller
        .submit_and_wait(&request(), poller.deadline())
        .await
        .unwrap();
    let elapsed = start.elapsed();

    assert_eq!(outcome.status, JobStatus::InProgress);
    assert!(!outcome.finished);
    assert!(outcome.status_checks > 1);
    assert!(elapsed >= budget);
    assert!(elapsed <= budget + interval);
    assert_eq!(client.submissions().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn given_interval_not_dividing_budget_when_polling_then_last_sleep_is_clipped_to_deadline() {
    let budget = Duration::from_secs(840);
    let client = Arc::new(MockTranscriptionJobClient::always(JobStatus::InProgress));
    let poller = JobPoller::new(client.clone(), config(Duration::from_secs(300), budget));

    let start = Instant::now();
    let outcome = poller
        .submit_and_wait(&request(), poller.deadline())
        .await
        .unwrap();

    assert!(start.elapsed() <= budget);
    assert!(!outcome.finished);
    assert_eq!(outcome.status_checks, 4);
}

#[tokio::test(start_paused = true)]
async fn given_job_failing_remotely_when_polling_then_returns_failed_immediately() {
    let client = Arc::new(MockTranscriptionJobClient::with_statuses(&[
        JobStatus::InProgress,
        JobStatus::Failed,
    ]));
    let poller = JobPoller::new(
        client.clone(),
        config(Duration::from_secs(30), Duration::from_secs(840)),
    );

    let start = Instant::now();
    let outcome = poller
        .submit_and_wait(&request(), poller.deadline())
        .await
        .unwrap();

    assert_eq!(outcome.status, JobStatus::Failed);
    assert!(outcome.finished);
    assert_eq!(start.elapsed(), Duration::from_secs(30));
}

#[tokio::test]
async fn given_existing_job_with_same_name_when_submitting_then_polls_existing_job() {
    let client = Arc::new(
        MockTranscriptionJobClient::with_statuses(&[JobStatus::Completed])
            .failing_submit(TranscriptionJobError::Conflict("exists".to_string())),
    );
    let poller = JobPoller::new(client.clone(), config(Duration::ZERO, Duration::from_secs(5)));

    let outcome = poller
        .submit_and_wait(&request(), poller.deadline())
        .await
        .unwrap();

    assert_eq!(outcome.status, JobStatus::Completed);
    assert_eq!(client.status_calls(), 1);
}

#[tokio::test]
async fn given_rejected_submission_when_submitting_then_returns_error_without_polling() {
    let client = Arc::new(
        MockTranscriptionJobClient::always(JobStatus::InProgress)
            .failing_submit(TranscriptionJobError::Rejected("bad role".to_string())),
    );
    let poller = JobPoller::new(client.clone(), config(Duration::ZERO, Duration::from_secs(5)));

    let result = poller.submit_and_wait(&request(), poller.deadline()).await;

    assert!(matches!(
        result,
        Err(JobPollerError::Submission(TranscriptionJobError::Rejected(_)))
    ));
    assert_eq!(client.status_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn given_transient_status_failures_when_polling_then_retries_with_backoff() {
    let client = Arc::new(MockTranscriptionJobClient::new(
        vec![
            Err(TranscriptionJobError::Transient("timeout".to_string())),
            Err(TranscriptionJobError::Transient("timeout".to_string())),
            Ok(JobStatus::Completed),
        ],
        JobStatus::Completed,
    ));
    let poller = JobPoller::new(
        client.clone(),
        config(Duration::from_secs(30), Duration::from_secs(840)),
    );

    let start = Instant::now();
    let outcome = poller
        .submit_and_wait(&request(), poller.deadline())
        .await
        .unwrap();

    assert_eq!(outcome.status, JobStatus::Completed);
    assert_eq!(outcome.status_checks, 1);
    assert_eq!(client.status_calls(), 3);
    assert_eq!(start.elapsed(), Duration::from_secs(3));
}

#[tokio::test(start_paused = true)]
async fn given_persistent_transient_failures_when_polling_then_error_propagates_after_retries() {
    let client = Arc::new(MockTranscriptionJobClient::new(
        (0..10)
            .map(|_| Err(TranscriptionJobError::Transient("unavailable".to_string())))
            .collect(),
        JobStatus::InProgress,
    ));
    let poller = JobPoller::new(
        client.clone(),
        config(Duration::from_secs(30), Duration::from_secs(840)),
    );

    let result = poller.submit_and_wait(&request(), poller.deadline()).await;

    assert!(matches!(
        result,
        Err(JobPollerError::Status(TranscriptionJobError::Transient(_)))
    ));
    assert_eq!(client.status_calls(), 4);
}

#[tokio::test]
async fn given_non_transient_status_error_when_polling_then_fails_without_retry() {
    let client = Arc::new(MockTranscriptionJobClient::new(
        vec![Err(TranscriptionJobError::InvalidResponse(
            "garbled".to_string(),
        ))],
        JobStatus::InProgress,
    ));
    let poller = JobPoller::new(client.clone(), config(Duration::ZERO, Duration::from_secs(5)));

    let result = poller.submit_and_wait(&request(), poller.deadline()).await;

    assert!(matches!(result, Err(JobPollerError::Status(_))));
    assert_eq!(client.status_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn given_status_call_that_hangs_when_polling_then_returns_in_progress_at_deadline() {
    let budget = Duration::from_secs(840);
    let interval = Duration::from_secs(30);
    let client = Arc::new(SlowClient {
        submit_delay: Duration::ZERO,
        status_delay: Duration::from_secs(3600),
    });
    let poller = JobPoller::new(client, config(interval, budget));

    let start = Instant::now();
    let outcome = poller
        .submit_and_wait(&request(), poller.deadline())
        .await
        .unwrap();
    let elapsed = start.elapsed();

    assert_eq!(outcome.status, JobStatus::InProgress);
    assert!(!outcome.finished);
    assert_eq!(outcome.status_checks, 0);
    assert!(elapsed <= budget + interval);
}

#[tokio::test(start_paused = true)]
async fn given_submission_that_hangs_when_submitting_then_fails_transiently_at_deadline() {
    let budget = Duration::from_secs(840);
    let client = Arc::new(SlowClient {
        submit_delay: Duration::from_secs(3600),
        status_delay: Duration::ZERO,
    });
    let poller = JobPoller::new(client, config(Duration::from_secs(30), budget));

    let start = Instant::now();
    let result = poller.submit_and_wait(&request(), poller.deadline()).await;

    assert!(matches!(
        result,
        Err(JobPollerError::Submission(TranscriptionJobError::Transient(_)))
    ));
    assert!(start.elapsed() <= budget);
}

#[tokio::test(start_paused = true)]
async fn given_status_call_slower_than_interval_when_polling_then_answer_before_deadline_is_used() {
    let client = Arc::new(SlowClient {
        submit_delay: Duration::ZERO,
        status_delay: Duration::from_secs(100),
    });
    let poller = JobPoller::new(
        client,
        config(Duration::from_secs(30), Duration::from_secs(840)),
    );

    let outcome = poller
        .submit_and_wait(&request(), poller.deadline())
        .await
        .unwrap();

    assert_eq!(outcome.status, JobStatus::Completed);
    assert!(outcome.finished);
    assert_eq!(outcome.status_checks, 1);
}
