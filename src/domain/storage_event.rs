use serde::Deserialize;

use super::ObjectKey;

/// An object-created notification reduced to what the pipeline needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    pub bucket_name: String,
    pub object_key: ObjectKey,
}

impl StorageEvent {
    pub fn new(bucket_name: impl Into<String>, object_key: ObjectKey) -> Self {
        Self {
            bucket_name: bucket_name.into(),
            object_key,
        }
    }

    pub fn object_uri(&self) -> String {
        format!("s3://{}/{}", self.bucket_name, self.object_key)
    }
}

/// Top-level notification payload: `{"Records": [...]}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageNotification {
    #[serde(rename = "Records", default)]
    pub records: Vec<serde_json::Value>,
}

/// One entry of `Records`. Queue deliveries carry `body`/`messageId`,
/// direct storage deliveries carry `s3`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationRecord {
    #[serde(default)]
    pub s3: Option<S3Entity>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(rename = "messageId", default)]
    pub message_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Entity {
    pub bucket: S3Bucket,
    pub object: S3Object,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Bucket {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Object {
    pub key: String,
}

impl From<S3Entity> for StorageEvent {
    fn from(entity: S3Entity) -> Self {
        StorageEvent::new(
            entity.bucket.name,
            ObjectKey::from_event_encoded(&entity.object.key),
        )
    }
}
