//! Authentication request types.

use serde::Deserialize;
use validator::Validate;

/// Registration request.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 32))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    /// Checked for length and confirmation, never stored.
    #[validate(length(min = 6, max = 128))]
    pub password: String,
    #[validate(must_match(other = "password"))]
    pub confirm_password: String,
    /// Avatar glyph (defaults to a silhouette).
    pub avatar: Option<String>,
    /// Display name (defaults to username).
    #[validate(length(max = 64))]
    pub display_name: Option<String>,
}

impl RegisterRequest {
    /// Request with matching password fields and no optional profile data.
    #[must_use]
    pub fn new(username: &str, email: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: password.to_string(),
            avatar: None,
            display_name: None,
        }
    }
}
