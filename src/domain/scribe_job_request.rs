use super::{ChannelDefinition, JobIdentity, ScribeSettings, StorageEvent};

/// Everything needed to start one scribe job for an uploaded recording.
#[derive(Debug, Clone, PartialEq)]
pub struct ScribeJobRequest {
    pub identity: JobIdentity,
    pub media_uri: String,
    pub output_bucket: String,
    pub data_access_role_arn: String,
    pub settings: ScribeSettings,
    pub channel_definitions: Vec<ChannelDefinition>,
}

impl ScribeJobRequest {
    pub fn for_upload(
        event: &StorageEvent,
        identity: JobIdentity,
        output_bucket: &str,
        data_access_role_arn: &str,
    ) -> Self {
        Self {
            identity,
            media_uri: event.object_uri(),
            output_bucket: output_bucket.to_string(),
            data_access_role_arn: data_access_role_arn.to_string(),
            settings: ScribeSettings::default(),
            channel_definitions: ChannelDefinition::consultation(),
        }
    }

    pub fn job_name(&self) -> &str {
        &self.identity.job_name
    }

    /// Output folder mirroring the uploaded recording's folder.
    pub fn output_location(&self) -> String {
        format!("s3://{}/{}/", self.output_bucket, self.identity.output_prefix)
    }
}
