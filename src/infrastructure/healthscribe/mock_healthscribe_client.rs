use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::application::ports::{TranscriptionJobClient, TranscriptionJobError};
use crate::domain::{JobStatus, ScribeJobRequest};

/// Replays a scripted status sequence, then repeats `fallback` forever.
pub struct MockTranscriptionJobClient {
    script: Mutex<VecDeque<Result<JobStatus, TranscriptionJobError>>>,
    fallback: JobStatus,
    submit_error: Mutex<Option<TranscriptionJobError>>,
    submissions: Mutex<Vec<ScribeJobRequest>>,
    status_calls: AtomicU32,
}

impl MockTranscriptionJobClient {
    pub fn new(script: Vec<Result<JobStatus, TranscriptionJobError>>, fallback: JobStatus) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback,
            submit_error: Mutex::new(None),
            submissions: Mutex::new(Vec::new()),
            status_calls: AtomicU32::new(0),
        }
    }

    pub fn with_statuses(statuses: &[JobStatus]) -> Self {
        let fallback = statuses.last().copied().unwrap_or(JobStatus::InProgress);
        Self::new(statuses.iter().copied().map(Ok).collect(), fallback)
    }

    pub fn always(status: JobStatus) -> Self {
        Self::new(Vec::new(), status)
    }

    /// The next `submit` call fails with `error`.
    pub fn failing_submit(self, error: TranscriptionJobError) -> Self {
        if let Ok(mut slot) = self.submit_error.lock() {
            *slot = Some(error);
        }
        self
    }

    pub fn submissions(&self) -> Vec<ScribeJobRequest> {
        self.submissions
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    pub fn status_calls(&self) -> u32 {
        self.status_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl TranscriptionJobClient for MockTranscriptionJobClient {
    async fn submit(&self, request: &ScribeJobRequest) -> Result<(), TranscriptionJobError> {
        if let Ok(mut submissions) = self.submissions.lock() {
            submissions.push(request.clone());
        }
        match self.submit_error.lock().ok().and_then(|mut e| e.take()) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    async fn get_status(&self, _job_name: &str) -> Result<JobStatus, TranscriptionJobError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        self.script
            .lock()
            .ok()
            .and_then(|mut script| script.pop_front())
            .unwrap_or(Ok(self.fallback))
    }
}
