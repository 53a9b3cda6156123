use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::StatusCode;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::application::ports::{TranscriptionJobClient, TranscriptionJobError};
use crate::domain::{ChannelDefinition, JobStatus, ScribeJobRequest, ScribeSettings};

use super::sigv4::{self, SigV4Params};

const SERVICE: &str = "transcribe";
const CONTENT_TYPE: &str = "application/x-amz-json-1.1";
const START_TARGET: &str = "Transcribe.StartMedicalScribeJob";
const GET_TARGET: &str = "Transcribe.GetMedicalScribeJob";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const TRANSIENT_ERROR_TYPES: [&str; 4] = [
    "ThrottlingException",
    "LimitExceededException",
    "InternalFailureException",
    "ServiceUnavailableException",
];

#[derive(Clone)]
pub struct AwsCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

impl AwsCredentials {
    /// Reads the standard `AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY` /
    /// `AWS_SESSION_TOKEN` variables.
    pub fn from_env() -> Option<Self> {
        let access_key_id = std::env::var("AWS_ACCESS_KEY_ID").ok()?;
        let secret_access_key = std::env::var("AWS_SECRET_ACCESS_KEY").ok()?;
        let session_token = std::env::var("AWS_SESSION_TOKEN")
            .ok()
            .filter(|t| !t.is_empty());
        Some(Self {
            access_key_id,
            secret_access_key,
            session_token,
        })
    }
}

impl fmt::Debug for AwsCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"[REDACTED]")
            .field("session_token", &self.session_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// JSON RPC client for the managed medical scribe job API.
pub struct HealthScribeClient {
    client: reqwest::Client,
    endpoint: Url,
    host: String,
    region: String,
    credentials: AwsCredentials,
}

impl HealthScribeClient {
    pub fn new(region: &str, credentials: AwsCredentials) -> Result<Self, TranscriptionJobError> {
        let endpoint = format!("https://{SERVICE}.{region}.amazonaws.com/");
        Self::with_endpoint(&endpoint, region, credentials)
    }

    pub fn with_endpoint(
        endpoint: &str,
        region: &str,
        credentials: AwsCredentials,
    ) -> Result<Self, TranscriptionJobError> {
        let endpoint = Url::parse(endpoint).map_err(|e| {
            TranscriptionJobError::Rejected(format!("invalid endpoint {}: {}", endpoint, e))
        })?;
        let host = match (endpoint.host_str(), endpoint.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            (None, _) => {
                return Err(TranscriptionJobError::Rejected(format!(
                    "endpoint has no host: {}",
                    endpoint
                )));
            }
        };

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| TranscriptionJobError::Rejected(format!("http client: {}", e)))?;

        Ok(Self {
            client,
            endpoint,
            host,
            region: region.to_string(),
            credentials,
        })
    }

    async fn call<B, R>(&self, target: &str, body: &B) -> Result<R, TranscriptionJobError>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let payload = serde_json::to_vec(body)
            .map_err(|e| TranscriptionJobError::Rejected(format!("encode request: {}", e)))?;

        let headers = sigv4::sign(SigV4Params {
            method: "POST",
            service: SERVICE,
            region: &self.region,
            host: &self.host,
            canonical_uri: self.endpoint.path(),
            payload: &payload,
            access_key: &self.credentials.access_key_id,
            secret_key: &self.credentials.secret_access_key,
            session_token: self.credentials.session_token.as_deref(),
            headers: vec![
                ("content-type".to_string(), CONTENT_TYPE.to_string()),
                ("x-amz-target".to_string(), target.to_string()),
            ],
            timestamp: Utc::now(),
        })
        .map_err(|e| TranscriptionJobError::Rejected(format!("signing: {}", e)))?;

        tracing::debug!(rpc_target = target, endpoint = %self.endpoint, "Calling scribe service");

        let mut request = self.client.post(self.endpoint.clone()).body(payload);
        for (name, value) in headers {
            request = request.header(name, value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TranscriptionJobError::Transient(format!("request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(classify_error(status, &body));
        }

        response
            .json::<R>()
            .await
            .map_err(|e| TranscriptionJobError::InvalidResponse(format!("parse response: {}", e)))
    }
}

#[async_trait]
impl TranscriptionJobClient for HealthScribeClient {
    #[tracing::instrument(skip(self, request), fields(job_name = %request.job_name()))]
    async fn submit(&self, request: &ScribeJobRequest) -> Result<(), TranscriptionJobError> {
        let body = StartMedicalScribeJobRequest {
            medical_scribe_job_name: request.job_name(),
            media: Media {
                media_file_uri: &request.media_uri,
            },
            output_bucket_name: &request.output_bucket,
            data_access_role_arn: &request.data_access_role_arn,
            settings: &request.settings,
            channel_definitions: &request.channel_definitions,
        };

        self.call::<_, IgnoredAny>(START_TARGET, &body).await?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn get_status(&self, job_name: &str) -> Result<JobStatus, TranscriptionJobError> {
        let body = GetMedicalScribeJobRequest {
            medical_scribe_job_name: job_name,
        };

        let response: GetMedicalScribeJobResponse = self.call(GET_TARGET, &body).await?;
        let job = response.medical_scribe_job;
        let status = job
            .medical_scribe_job_status
            .parse::<JobStatus>()
            .map_err(TranscriptionJobError::InvalidResponse)?;

        if status == JobStatus::Failed {
            tracing::warn!(
                failure_reason = job.failure_reason.as_deref().unwrap_or("unknown"),
                "Scribe job failed"
            );
        }

        Ok(status)
    }
}

fn classify_error(status: StatusCode, body: &str) -> TranscriptionJobError {
    let parsed: ServiceErrorBody = serde_json::from_str(body).unwrap_or_default();
    let error_type = parsed
        .error_type
        .as_deref()
        .map(|t| t.rsplit('#').next().unwrap_or(t))
        .unwrap_or("UnknownError")
        .to_string();
    let message = parsed
        .message
        .or(parsed.message_upper)
        .unwrap_or_else(|| body.to_string());
    let detail = format!("status {}: {}: {}", status, error_type, message);

    if error_type == "ConflictException" {
        TranscriptionJobError::Conflict(detail)
    } else if status == StatusCode::TOO_MANY_REQUESTS
        || status.is_server_error()
        || TRANSIENT_ERROR_TYPES.contains(&error_type.as_str())
    {
        TranscriptionJobError::Transient(detail)
    } else {
        TranscriptionJobError::Rejected(detail)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct StartMedicalScribeJobRequest<'a> {
    medical_scribe_job_name: &'a str,
    media: Media<'a>,
    output_bucket_name: &'a str,
    data_access_role_arn: &'a str,
    settings: &'a ScribeSettings,
    channel_definitions: &'a [ChannelDefinition],
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct Media<'a> {
    media_file_uri: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct GetMedicalScribeJobRequest<'a> {
    medical_scribe_job_name: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GetMedicalScribeJobResponse {
    medical_scribe_job: MedicalScribeJob,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct MedicalScribeJob {
    medical_scribe_job_status: String,
    #[serde(default)]
    failure_reason: Option<String>,
}

#[derive(Deserialize, Default)]
struct ServiceErrorBody {
    #[serde(rename = "__type", default)]
    error_type: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(rename = "Message", default)]
    message_upper: Option<String>,
}
