use thiserror::Error;

/// Result type returned by the repository layer.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Errors raised while talking to the remote store.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The store expected exactly one row and found zero or several.
    #[error("record not found")]
    NotFound,
    /// A unique constraint rejected the write. Carries the store message.
    #[error("{0}")]
    Conflict(String),
    /// The store answered with an error. Carries the store message verbatim.
    #[error("{message}")]
    Remote { status: u16, message: String },
    /// The store could not be reached.
    #[error("store request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The store answered with a body that does not match the row shape.
    #[error("unexpected store response: {0}")]
    Decode(#[from] serde_json::Error),
    /// A row decoded but lacks a field the domain requires.
    #[error("invalid row: {0}")]
    InvalidRow(String),
}
