#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    #[error("query failed: {0}")]
    QueryFailed(String),
    #[error("commit failed: {0}")]
    CommitFailed(String),
    #[error("close failed: {0}")]
    CloseFailed(String),
}
