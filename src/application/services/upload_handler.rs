use crate::domain::{
    JobIdentity, JobSummary, NotificationRecord, ScribeJobRequest, StorageEvent,
    StorageNotification, is_eligible_audio,
};

use super::{JobPoller, JobPollerError};

#[derive(Debug, Default)]
pub struct UploadReport {
    pub results: Vec<JobSummary>,
    pub skipped: usize,
}

/// Reacts to object-created notifications: filters audio uploads, derives a job
/// identity from each key, submits the scribe job and waits on it within budget.
pub struct UploadHandler {
    poller: JobPoller,
    output_bucket: String,
    data_access_role_arn: String,
}

impl UploadHandler {
    pub fn new(
        poller: JobPoller,
        output_bucket: impl Into<String>,
        data_access_role_arn: impl Into<String>,
    ) -> Result<Self, PipelineError> {
        let output_bucket = output_bucket.into();
        let data_access_role_arn = data_access_role_arn.into();

        if output_bucket.trim().is_empty() {
            return Err(PipelineError::Validation(
                "output bucket name is not configured".to_string(),
            ));
        }
        if data_access_role_arn.trim().is_empty() {
            return Err(PipelineError::Validation(
                "data access role ARN is not configured".to_string(),
            ));
        }

        Ok(Self {
            poller,
            output_bucket,
            data_access_role_arn,
        })
    }

    pub async fn handle(
        &self,
        notification: StorageNotification,
    ) -> Result<UploadReport, PipelineError> {
        let deadline = self.poller.deadline();
        let mut report = UploadReport::default();

        for (index, value) in notification.records.into_iter().enumerate() {
            let Some(event) = Self::storage_event(index, value) else {
                report.skipped += 1;
                continue;
            };

            if !is_eligible_audio(&event.object_key) {
                tracing::debug!(object_key = %event.object_key, "Skipping non-audio object");
                report.skipped += 1;
                continue;
            }

            let identity = JobIdentity::derive(&event.object_key);
            if !identity.is_nameable() {
                tracing::warn!(
                    object_key = %event.object_key,
                    "Audio object has no folder prefix to name a job after, skipping"
                );
                report.skipped += 1;
                continue;
            }

            let request = ScribeJobRequest::for_upload(
                &event,
                identity,
                &self.output_bucket,
                &self.data_access_role_arn,
            );
            let outcome = self.poller.submit_and_wait(&request, deadline).await?;

            report.results.push(JobSummary {
                job_name: request.job_name().to_string(),
                job_status: outcome.status,
                input_file: request.media_uri.clone(),
                output_location: request.output_location(),
            });
        }

        Ok(report)
    }

    fn storage_event(index: usize, value: serde_json::Value) -> Option<StorageEvent> {
        match serde_json::from_value::<NotificationRecord>(value) {
            Ok(NotificationRecord { s3: Some(s3), .. }) => Some(s3.into()),
            Ok(_) => {
                tracing::warn!(record_index = index, "Upload record has no storage section");
                None
            }
            Err(e) => {
                tracing::warn!(record_index = index, error = %e, "Upload record is malformed");
                None
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("invalid configuration: {0}")]
    Validation(String),
    #[error(transparent)]
    Job(#[from] JobPollerError),
}
