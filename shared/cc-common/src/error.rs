//! Common Error Types

use thiserror::Error;

/// Errors raised while decoding shared record types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A rank token that is not part of the rank enumeration.
    #[error("Unknown rank: {0:?}")]
    UnknownRank(String),
}

/// Result alias for common operations.
pub type Result<T> = std::result::Result<T, Error>;
