//! Authentication
//!
//! Access-code gate, registration payloads and screen routing for the
//! dashboard session.

pub mod codes;
mod error;
pub mod screen;
pub mod types;

pub use codes::verify_access_code;
pub use error::{AuthError, AuthResult};
pub use screen::{resolve_screen, Screen};
pub use types::RegisterRequest;
