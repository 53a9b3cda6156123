use async_trait::async_trait;

use crate::domain::PatientIdentifier;

use super::DatabaseError;

/// Opens one connection per use. Connections are never pooled or shared.
#[async_trait]
pub trait PatientRecordConnector: Send + Sync {
    async fn connect(&self) -> Result<Box<dyn PatientRecordConnection>, DatabaseError>;
}

#[async_trait]
pub trait PatientRecordConnection: Send {
    /// Sets the patient's status to complete and commits. Returns the affected row count.
    async fn mark_complete(&mut self, patient: &PatientIdentifier) -> Result<u64, DatabaseError>;

    async fn close(self: Box<Self>) -> Result<(), DatabaseError>;
}
