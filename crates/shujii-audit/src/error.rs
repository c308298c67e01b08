use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("event log I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("event log lock poisoned")]
    Poisoned,
}
