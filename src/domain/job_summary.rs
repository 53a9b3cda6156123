use serde::Serialize;

use super::JobStatus;

/// Per-upload entry of the upload trigger's response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    pub job_name: String,
    pub job_status: JobStatus,
    pub input_file: String,
    pub output_location: String,
}
