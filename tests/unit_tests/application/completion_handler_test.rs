use std::sync::Arc;

use serde_json::json;

use medisync::application::services::{CompletionHandler, CompletionStatus, RecordUpdater};
use medisync::domain::StorageNotification;
use medisync::infrastructure::persistence::MockPatientRecords;

fn handler(records: &MockPatientRecords) -> CompletionHandler {
    CompletionHandler::new(RecordUpdater::new(Arc::new(records.clone())))
}

fn queued(message_id: &str, key: &str) -> serde_json::Value {
    let body = json!({ "Records": [
        { "s3": { "bucket": { "name": "b" }, "object": { "key": key } } }
    ] });
    json!({ "messageId": message_id, "body": body.to_string() })
}

fn batch(records: Vec<serde_json::Value>) -> StorageNotification {
    serde_json::from_value(json!({ "Records": records })).unwrap()
}

#[tokio::test]
async fn given_queue_wrapped_completion_when_handling_then_patient_is_marked_complete() {
    let records = MockPatientRecords::new();

    let report = handler(&records)
        .handle(batch(vec![queued(
            "m-1",
            "patientA@example.com/output/result.json",
        )]))
        .await;

    assert_eq!(report.status, CompletionStatus::Success);
    assert_eq!(report.updated, 1);
    assert_eq!(records.updates(), vec!["patientA@example.com".to_string()]);
    assert!(records.last_connection_closed());
}

#[tokio::test]
async fn given_malformed_and_valid_records_when_handling_then_valid_one_is_still_updated() {
    let records = MockPatientRecords::new();

    let report = handler(&records)
        .handle(batch(vec![
            json!({ "messageId": "bad", "body": "not json" }),
            queued("good", "patientB/output/result.json"),
        ]))
        .await;

    assert_eq!(report.status, CompletionStatus::Success);
    assert_eq!(report.updated, 1);
    assert_eq!(report.skipped, 1);
    assert_eq!(records.updates(), vec!["patientB".to_string()]);
}

#[tokio::test]
async fn given_unmatched_patient_when_handling_then_counted_as_unmatched() {
    let records = MockPatientRecords::with_patients(&["patientA"]);

    let report = handler(&records)
        .handle(batch(vec![
            queued("m-1", "patientA/output/result.json"),
            queued("m-2", "ghost/output/result.json"),
        ]))
        .await;

    assert_eq!(report.status, CompletionStatus::Success);
    assert_eq!(report.updated, 1);
    assert_eq!(report.unmatched, 1);
}

#[tokio::test]
async fn given_database_failure_when_handling_then_message_ids_are_reported_for_redelivery() {
    let records = MockPatientRecords::failing_statement();

    let report = handler(&records)
        .handle(batch(vec![
            queued("m-1", "patientA/output/result.json"),
            queued("m-2", "patientB/output/result.json"),
        ]))
        .await;

    assert_eq!(report.status, CompletionStatus::Failure);
    assert_eq!(report.failed, 2);
    assert_eq!(
        report.failed_message_ids,
        vec!["m-1".to_string(), "m-2".to_string()]
    );
    assert_eq!(records.connections_opened(), records.connections_closed());
}

#[tokio::test]
async fn given_empty_identifier_when_handling_then_record_is_skipped_not_failed() {
    let records = MockPatientRecords::new();

    let report = handler(&records)
        .handle(batch(vec![queued("m-1", "/output/result.json")]))
        .await;

    assert_eq!(report.status, CompletionStatus::Success);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.failed, 0);
    assert!(report.failed_message_ids.is_empty());
}
