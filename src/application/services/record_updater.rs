use std::sync::Arc;

use crate::application::ports::{DatabaseError, PatientRecordConnector};
use crate::domain::{PatientIdentifier, StorageEvent};

use super::MalformedEventError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordUpdate {
    pub patient: PatientIdentifier,
    pub rows_affected: u64,
}

impl RecordUpdate {
    pub fn matched(&self) -> bool {
        self.rows_affected > 0
    }
}

/// Marks the patient owning a finished job's output as complete.
pub struct RecordUpdater {
    connector: Arc<dyn PatientRecordConnector>,
}

impl RecordUpdater {
    pub fn new(connector: Arc<dyn PatientRecordConnector>) -> Self {
        Self { connector }
    }

    /// Runs one update on a dedicated connection. The connection is closed on every
    /// path once it has been opened, including when the statement fails.
    #[tracing::instrument(skip(self, event), fields(object_key = %event.object_key))]
    pub async fn update(&self, event: &StorageEvent) -> Result<RecordUpdate, RecordUpdateError> {
        let patient = PatientIdentifier::from_key(&event.object_key).ok_or_else(|| {
            RecordUpdateError::Malformed(MalformedEventError::EmptyIdentifier(
                event.object_key.to_string(),
            ))
        })?;

        let mut connection = self
            .connector
            .connect()
            .await
            .map_err(RecordUpdateError::Database)?;

        let result = connection.mark_complete(&patient).await;

        if let Err(e) = connection.close().await {
            tracing::warn!(error = %e, "Failed to close patient record connection");
        }

        let rows_affected = result.map_err(RecordUpdateError::Database)?;

        if rows_affected == 0 {
            tracing::warn!(patient = %patient, "No patient record matched the completed job");
        } else {
            tracing::info!(patient = %patient, rows_affected, "Patient record marked complete");
        }

        Ok(RecordUpdate {
            patient,
            rows_affected,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RecordUpdateError {
    #[error("malformed event: {0}")]
    Malformed(MalformedEventError),
    #[error("database: {0}")]
    Database(DatabaseError),
}
