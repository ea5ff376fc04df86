//! Authentication Error Types

use thiserror::Error;

/// Authentication error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No account matches the given email.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Username or email already registered.
    #[error("Username or email already taken")]
    UserAlreadyExists,

    /// User not found.
    #[error("User not found")]
    UserNotFound,

    /// Registration payload failed validation.
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Result type for authentication operations.
pub type AuthResult<T> = Result<T, AuthError>;
