use thiserror::Error;

#[derive(Error, Debug)]
pub enum JournalError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(#[from] eyre::Report),

    #[error("Corrupted data under key '{key}': {source}")]
    Corrupted {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Photo ingestion failed: {0}")]
    PhotoIngestion(String),
}

impl JournalError {
    /// Whether the error is meant to be shown to the user as-is rather than
    /// treated as a failure of the program.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            JournalError::Validation(_) | JournalError::NotFound(_) | JournalError::PhotoIngestion(_)
        )
    }
}

pub type JournalResult<T> = Result<T, JournalError>;
