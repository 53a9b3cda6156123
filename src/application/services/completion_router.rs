use crate::domain::{NotificationRecord, StorageEvent, StorageNotification};

/// A storage event recovered from a completion record, with the queue message id
/// it arrived under (absent for direct deliveries).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutedEvent {
    pub message_id: Option<String>,
    pub event: StorageEvent,
}

#[derive(Debug)]
pub struct SkippedRecord {
    pub index: usize,
    pub message_id: Option<String>,
    pub reason: MalformedEventError,
}

#[derive(Debug, Default)]
pub struct RoutedBatch {
    pub events: Vec<RoutedEvent>,
    pub skipped: Vec<SkippedRecord>,
}

#[derive(Debug, thiserror::Error)]
pub enum MalformedEventError {
    #[error("record is not a notification record: {0}")]
    InvalidRecord(String),
    #[error("message body is not valid JSON: {0}")]
    InvalidBody(String),
    #[error("message body carries no records")]
    MissingRecords,
    #[error("event has no storage object section")]
    MissingStorageSection,
    #[error("object key has no identifier segment: {0}")]
    EmptyIdentifier(String),
}

/// Unwraps completion records, either direct storage events or queue messages whose
/// body holds a serialized storage notification. Bad records are skipped, never fatal.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompletionRouter;

impl CompletionRouter {
    pub fn route(&self, notification: StorageNotification) -> RoutedBatch {
        let mut batch = RoutedBatch::default();

        for (index, value) in notification.records.into_iter().enumerate() {
            let record: NotificationRecord = match serde_json::from_value(value) {
                Ok(record) => record,
                Err(e) => {
                    batch.skip(index, None, MalformedEventError::InvalidRecord(e.to_string()));
                    continue;
                }
            };

            let message_id = record.message_id;
            match (record.body, record.s3) {
                (Some(body), _) => Self::unwrap_body(&body, index, message_id, &mut batch),
                (None, Some(s3)) => batch.events.push(RoutedEvent {
                    message_id,
                    event: s3.into(),
                }),
                (None, None) => {
                    batch.skip(index, message_id, MalformedEventError::MissingStorageSection)
                }
            }
        }

        batch
    }

    fn unwrap_body(body: &str, index: usize, message_id: Option<String>, batch: &mut RoutedBatch) {
        let inner: StorageNotification = match serde_json::from_str(body) {
            Ok(inner) => inner,
            Err(e) => {
                batch.skip(index, message_id, MalformedEventError::InvalidBody(e.to_string()));
                return;
            }
        };

        if inner.records.is_empty() {
            batch.skip(index, message_id, MalformedEventError::MissingRecords);
            return;
        }

        for value in inner.records {
            match serde_json::from_value::<NotificationRecord>(value) {
                Ok(NotificationRecord { s3: Some(s3), .. }) => batch.events.push(RoutedEvent {
                    message_id: message_id.clone(),
                    event: s3.into(),
                }),
                _ => batch.skip(
                    index,
                    message_id.clone(),
                    MalformedEventError::MissingStorageSection,
                ),
            }
        }
    }
}

impl RoutedBatch {
    fn skip(&mut self, index: usize, message_id: Option<String>, reason: MalformedEventError) {
        tracing::warn!(
            record_index = index,
            message_id = message_id.as_deref().unwrap_or("-"),
            reason = %reason,
            "Skipping malformed completion record"
        );
        self.skipped.push(SkippedRecord {
            index,
            message_id,
            reason,
        });
    }
}
