use async_trait::async_trait;

use crate::domain::{JobStatus, ScribeJobRequest};

#[async_trait]
pub trait TranscriptionJobClient: Send + Sync {
    async fn submit(&self, request: &ScribeJobRequest) -> Result<(), TranscriptionJobError>;

    async fn get_status(&self, job_name: &str) -> Result<JobStatus, TranscriptionJobError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionJobError {
    #[error("transient service error: {0}")]
    Transient(String),
    #[error("job already exists: {0}")]
    Conflict(String),
    #[error("request rejected: {0}")]
    Rejected(String),
    #[error("invalid service response: {0}")]
    InvalidResponse(String),
}

impl TranscriptionJobError {
    pub fn is_transient(&self) -> bool {
        matches!(self, TranscriptionJobError::Transient(_))
    }
}
