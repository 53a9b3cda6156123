mod audio_format;
mod channel_definition;
mod job_identity;
mod job_status;
mod job_summary;
mod object_key;
mod patient_identifier;
mod scribe_job_request;
mod storage_event;

pub use audio_format::{AudioFormat, is_eligible_audio};
pub use channel_definition::{ChannelDefinition, ParticipantRole, ScribeSettings};
pub use job_identity::JobIdentity;
pub use job_status::JobStatus;
pub use job_summary::JobSummary;
pub use object_key::ObjectKey;
pub use patient_identifier::PatientIdentifier;
pub use scribe_job_request::ScribeJobRequest;
pub use storage_event::{
    NotificationRecord, S3Bucket, S3Entity, S3Object, StorageEvent, StorageNotification,
};
