mod database_error;
mod patient_records;
mod transcription_job_client;

pub use database_error::DatabaseError;
pub use patient_records::{PatientRecordConnection, PatientRecordConnector};
pub use transcription_job_client::{TranscriptionJobClient, TranscriptionJobError};
