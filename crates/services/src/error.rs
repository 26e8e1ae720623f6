//! Shared error types for the services crate.

use thiserror::Error;

use mantra_core::model::PracticeSessionError;
use storage::repository::StorageError;

/// Errors emitted by `AuthService` and its providers.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error("sign-in was cancelled")]
    Cancelled,
    #[error("identity provider rejected the request with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("identity provider returned an invalid profile: {0}")]
    InvalidProfile(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by `SessionService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionServiceError {
    #[error(transparent)]
    Session(#[from] PracticeSessionError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `PreferencesService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PreferencesServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}
