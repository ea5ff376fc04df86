//! Dashboard Content Error Types

use thiserror::Error;

use crate::permissions::PermissionError;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("Validation error: {0}")]
    Validation(String),

    /// Message recipient is the sender, banned or pending.
    #[error("Cannot message user {0}")]
    InvalidRecipient(String),

    #[error(transparent)]
    Permission(#[from] PermissionError),

    #[error("Snapshot encoding error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContentError {
    pub(crate) fn not_found(kind: &'static str, id: &str) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for ContentError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}
