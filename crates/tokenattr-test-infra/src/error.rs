use std::path::PathBuf;
use std::result::Result as StdResult;
use thiserror::Error;

/// Errors raised while preparing a test database.
#[derive(Debug, Error)]
pub enum TestInfraError {
    #[error("Container error: {0}")]
    Container(#[from] testcontainers::TestcontainersError),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Failed to read schema from {}: {source}", path.display())]
    Schema {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = StdResult<T, TestInfraError>;
