use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::services::{CompletionReport, CompletionStatus};
use crate::domain::StorageNotification;
use crate::presentation::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionResponse {
    pub status: CompletionStatus,
    pub updated: usize,
    pub unmatched: usize,
    pub skipped: usize,
    pub failed: usize,
    pub batch_item_failures: Vec<BatchItemFailure>,
}

/// Queue message the delivery substrate should hand out again.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItemFailure {
    pub item_identifier: String,
}

impl From<CompletionReport> for CompletionResponse {
    fn from(report: CompletionReport) -> Self {
        Self {
            status: report.status,
            updated: report.updated,
            unmatched: report.unmatched,
            skipped: report.skipped,
            failed: report.failed,
            batch_item_failures: report
                .failed_message_ids
                .into_iter()
                .map(|item_identifier| BatchItemFailure { item_identifier })
                .collect(),
        }
    }
}

#[tracing::instrument(
    name = "completion_invocation",
    skip(state, notification),
    fields(records = notification.records.len())
)]
pub async fn completion_event_handler(
    State(state): State<AppState>,
    Json(notification): Json<StorageNotification>,
) -> impl IntoResponse {
    let report = state.completion_handler.handle(notification).await;

    tracing::info!(
        status = ?report.status,
        updated = report.updated,
        unmatched = report.unmatched,
        skipped = report.skipped,
        failed = report.failed,
        "Completion invocation finished"
    );

    let status = match report.status {
        CompletionStatus::Failure => StatusCode::INTERNAL_SERVER_ERROR,
        CompletionStatus::Success | CompletionStatus::PartialFailure => StatusCode::OK,
    };

    (status, Json(CompletionResponse::from(report)))
}
