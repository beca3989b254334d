use thiserror::Error;
use tokenattr_core::StorageError;

pub type Result<T> = std::result::Result<T, TokenAttrError>;

#[derive(Debug, Clone, Error)]
pub enum TokenAttrError {
    /// Every candidate collided with a stored row.
    #[error("can't generate unique token for \"{attribute}\", last attempt with \"{token}\"")]
    TooManyAttempts {
        attribute: String,
        /// The last candidate tried, still colliding.
        token: String,
        attempts: usize,
    },
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
