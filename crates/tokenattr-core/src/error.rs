use thiserror::Error;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors surfaced by a [`TokenStore`](crate::store::TokenStore) backend.
///
/// The resolver never inspects these; they propagate to the caller unchanged.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("row already exists: {0}")]
    Conflict(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),
}

/// Errors raised while declaring a token attribute.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    #[error("token length for \"{0}\" must be greater than zero")]
    ZeroLength(String),
    #[error("max attempts for \"{0}\" must be greater than zero")]
    ZeroAttempts(String),
    #[error("alphabet for \"{0}\" must not be empty")]
    EmptyAlphabet(String),
    #[error("attribute name must not be blank")]
    BlankAttribute,
}
