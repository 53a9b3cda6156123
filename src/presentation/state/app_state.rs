use std::sync::Arc;

use crate::application::services::{CompletionHandler, UploadHandler};

#[derive(Clone)]
pub struct AppState {
    pub upload_handler: Arc<UploadHandler>,
    pub completion_handler: Arc<CompletionHandler>,
}

impl AppState {
    pub fn new(upload_handler: UploadHandler, completion_handler: CompletionHandler) -> Self {
        Self {
            upload_handler: Arc::new(upload_handler),
            completion_handler: Arc::new(completion_handler),
        }
    }
}
