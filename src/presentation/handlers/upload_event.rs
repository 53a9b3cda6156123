use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::domain::{JobSummary, StorageNotification};
use crate::presentation::state::AppState;

/// `{statusCode, body}` envelope returned to the upload trigger.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerResponse<B> {
    pub status_code: u16,
    pub body: B,
}

#[derive(Serialize)]
pub struct UploadBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<JobSummary>>,
}

#[tracing::instrument(
    name = "upload_invocation",
    skip(state, payload),
    fields(records = tracing::field::Empty)
)]
pub async fn upload_event_handler(
    State(state): State<AppState>,
    payload: Result<Json<StorageNotification>, JsonRejection>,
) -> impl IntoResponse {
    let notification = match payload {
        Ok(Json(notification)) => notification,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "Upload event payload rejected");
            return respond(
                rejection.status(),
                UploadBody {
                    message: format!("Error processing upload: {}", rejection.body_text()),
                    results: None,
                },
            );
        }
    };
    tracing::Span::current().record("records", notification.records.len());

    match state.upload_handler.handle(notification).await {
        Ok(report) => {
            tracing::info!(
                submitted = report.results.len(),
                skipped = report.skipped,
                "Upload invocation finished"
            );
            let message = format!(
                "Processed {} audio file(s), skipped {} record(s)",
                report.results.len(),
                report.skipped
            );
            respond(
                StatusCode::OK,
                UploadBody {
                    message,
                    results: Some(report.results),
                },
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "Upload invocation failed");
            respond(
                StatusCode::INTERNAL_SERVER_ERROR,
                UploadBody {
                    message: format!("Error processing upload: {}", e),
                    results: None,
                },
            )
        }
    }
}

fn respond(status: StatusCode, body: UploadBody) -> Response {
    (
        status,
        Json(TriggerResponse {
            status_code: status.as_u16(),
            body,
        }),
    )
        .into_response()
}
