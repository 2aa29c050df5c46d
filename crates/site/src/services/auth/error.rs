//! Authentication error types.

use thiserror::Error;

use super::storage::StorageError;

/// Errors that can occur during session operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No admin account matches the email/password pair.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Durable storage rejected a read or write.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
