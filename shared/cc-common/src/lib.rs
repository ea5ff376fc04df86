//! `ConsoleCraft` Common Library
//!
//! Shared record types used by the staff authority and anything that reads
//! or writes dashboard snapshots.

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::*;
