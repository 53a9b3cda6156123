mod init_tracing;
mod invocation_id;
mod tracing_config;

pub use init_tracing::init_tracing;
pub use invocation_id::{INVOCATION_ID_HEADER, InvocationId, invocation_id_middleware};
pub use tracing_config::TracingConfig;
