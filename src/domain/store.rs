//! Error type shared by the template store and delivery log backends.

use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during data-store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// PostgreSQL operation failed
    #[error("Postgres error: {0}")]
    Postgres(#[from] sqlx::Error),

    /// A stored value could not be interpreted (e.g. unknown channel class)
    #[error("Invalid stored record: {0}")]
    InvalidRecord(String),

    /// An update targeted a row that does not exist
    #[error("Row not found: {0}")]
    RowMissing(Uuid),
}
