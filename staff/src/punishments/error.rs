//! Punishment Log Error Types

use thiserror::Error;

use crate::directory::DirectoryError;
use crate::permissions::PermissionError;

#[derive(Debug, Error)]
pub enum PunishmentError {
    #[error("Punishment not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Comment cannot be empty")]
    EmptyComment,

    #[error(transparent)]
    Permission(#[from] PermissionError),

    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error("Snapshot encoding error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),
}
