use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScoringError>;

#[derive(Error, Debug)]
pub enum ScoringError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Storage error: {0}")]
    StorageError(#[from] storage::StorageError),

    #[error("Results page error: {0}")]
    ExtractionError(String),

    #[error("Malformed result row for '{athlete}' in '{discipline}': {reason}")]
    MalformedRow {
        discipline: String,
        athlete: String,
        reason: String,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
