mod completion_event;
mod health;
mod upload_event;

pub use completion_event::{BatchItemFailure, CompletionResponse, completion_event_handler};
pub use health::health_handler;
pub use upload_event::{TriggerResponse, UploadBody, upload_event_handler};
