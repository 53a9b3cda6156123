mod healthscribe_client;
mod mock_healthscribe_client;
pub mod sigv4;

pub use healthscribe_client::{AwsCredentials, HealthScribeClient};
pub use mock_healthscribe_client::MockTranscriptionJobClient;
