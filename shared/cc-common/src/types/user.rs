//! User Types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::rank::Rank;

/// Account approval status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    /// Waiting for a founder to approve the account.
    #[default]
    Pending,
    /// Approved staff member.
    Approved,
    /// Account banned from the dashboard.
    Banned,
}

/// Staff dashboard account.
///
/// Field names follow the dashboard's stored JSON (`camelCase`), so existing
/// snapshots deserialize unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Opaque identifier.
    pub id: String,
    /// Username (unique).
    pub username: String,
    /// Email address (unique, used for login).
    pub email: String,
    /// Current staff rank.
    pub rank: Rank,
    /// Avatar glyph or image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Whether the user is currently logged in.
    pub is_online: bool,
    /// When the account was created.
    pub join_date: DateTime<Utc>,
    /// Last login, logout or activity.
    pub last_active: DateTime<Utc>,
    /// Performance score, 0 to 100.
    pub performance: u32,
    /// Number of punishments issued.
    pub total_actions: u32,
    /// Admin override flag, independent of rank.
    pub is_admin: bool,
    /// Approval status.
    pub status: UserStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
    /// Whether the account is banned from the dashboard.
    pub is_banned: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ban_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banned_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banned_at: Option<DateTime<Utc>>,
}

impl User {
    /// Create a freshly registered, pending account.
    #[must_use]
    pub fn new_pending(username: impl Into<String>, email: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7().to_string(),
            username: username.into(),
            email: email.into(),
            rank: Rank::Pending,
            avatar: None,
            display_name: None,
            is_online: false,
            join_date: now,
            last_active: now,
            performance: 0,
            total_actions: 0,
            is_admin: false,
            status: UserStatus::Pending,
            approved_by: None,
            approved_at: None,
            is_banned: false,
            ban_reason: None,
            banned_by: None,
            banned_at: None,
        }
    }

    /// Name shown in the dashboard and recorded on actions taken by this user.
    #[must_use]
    pub fn display_label(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.username)
    }
}
