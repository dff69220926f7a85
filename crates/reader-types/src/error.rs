use thiserror::Error;

/// Errors shared by every `ContentStore` implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("File not found: {0}")]
    NotFound(u64),

    #[error("{0}")]
    ValidationFailed(String),

    #[error("Content unavailable for file {0}")]
    ContentUnavailable(u64),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Index serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Remote store error: {0}")]
    Remote(String),
}
