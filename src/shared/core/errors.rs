// Errors raised by the outbound ports.
//
// Purpose
// - Give every repository the same small error vocabulary so the HTTP shell
//   can map failures to status codes in one place.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    InUse(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl RepositoryError {
    /// Turns a unique constraint violation into a `Conflict` with the given message.
    pub fn on_unique_violation(error: sqlx::Error, message: impl Into<String>) -> Self {
        match &error {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepositoryError::Conflict(message.into())
            }
            _ => RepositoryError::Database(error),
        }
    }
}
