//! Staff Directory Error Types

use thiserror::Error;

use crate::permissions::PermissionError;

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// Acting account is banned or not yet approved.
    #[error("User {0} cannot act while banned or pending")]
    InactiveActor(String),

    #[error("User {0} is not pending approval")]
    NotPending(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Permission(#[from] PermissionError),

    #[error("Snapshot encoding error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),
}
