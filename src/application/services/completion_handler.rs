use serde::Serialize;

use crate::domain::StorageNotification;

use super::{CompletionRouter, RecordUpdateError, RecordUpdater};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionStatus {
    Success,
    PartialFailure,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionReport {
    pub status: CompletionStatus,
    pub updated: usize,
    pub unmatched: usize,
    pub skipped: usize,
    pub failed: usize,
    /// Queue message ids whose update failed and should be redelivered.
    pub failed_message_ids: Vec<String>,
}

pub struct CompletionHandler {
    router: CompletionRouter,
    updater: RecordUpdater,
}

impl CompletionHandler {
    pub fn new(updater: RecordUpdater) -> Self {
        Self {
            router: CompletionRouter,
            updater,
        }
    }

    pub async fn handle(&self, notification: StorageNotification) -> CompletionReport {
        let batch = self.router.route(notification);

        let mut updated = 0;
        let mut unmatched = 0;
        let mut skipped = batch.skipped.len();
        let mut failed = 0;
        let mut failed_message_ids: Vec<String> = Vec::new();

        for routed in batch.events {
            match self.updater.update(&routed.event).await {
                Ok(update) if update.matched() => updated += 1,
                Ok(_) => unmatched += 1,
                Err(RecordUpdateError::Malformed(reason)) => {
                    tracing::warn!(reason = %reason, "Skipping completion event");
                    skipped += 1;
                }
                Err(RecordUpdateError::Database(e)) => {
                    tracing::error!(
                        error = %e,
                        object_key = %routed.event.object_key,
                        "Patient record update failed"
                    );
                    failed += 1;
                    if let Some(id) = routed.message_id {
                        if !failed_message_ids.contains(&id) {
                            failed_message_ids.push(id);
                        }
                    }
                }
            }
        }

        let status = if failed == 0 {
            CompletionStatus::Success
        } else if updated + unmatched == 0 {
            CompletionStatus::Failure
        } else {
            CompletionStatus::PartialFailure
        };

        CompletionReport {
            status,
            updated,
            unmatched,
            skipped,
            failed,
            failed_message_ids,
        }
    }
}
