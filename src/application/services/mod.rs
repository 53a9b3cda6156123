mod completion_handler;
mod completion_router;
mod job_poller;
mod record_updater;
mod upload_handler;

pub use completion_handler::{CompletionHandler, CompletionReport, CompletionStatus};
pub use completion_router::{
    CompletionRouter, MalformedEventError, RoutedBatch, RoutedEvent, SkippedRecord,
};
pub use job_poller::{JobPoller, JobPollerConfig, JobPollerError, PollOutcome};
pub use record_updater::{RecordUpdate, RecordUpdateError, RecordUpdater};
pub use upload_handler::{PipelineError, UploadHandler, UploadReport};
