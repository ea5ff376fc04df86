//! Shared Types

pub mod rank;
pub mod user;

pub use rank::Rank;
pub use user::{User, UserStatus};
