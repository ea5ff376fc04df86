//! Staff Directory
//!
//! In-memory list of dashboard accounts with the administrative actions that
//! change them. Every action is gated by the permission authority before any
//! record is touched; a denied action leaves the directory unchanged.

mod error;

use std::path::Path;

use cc_common::{Rank, User, UserStatus};
use chrono::Utc;
use tracing::info;
use validator::Validate;

use crate::auth::{AuthError, AuthResult, RegisterRequest};
use crate::permissions::{Permission, StaffContext};

pub use error::DirectoryError;

/// Avatar given to accounts registered without one.
pub const DEFAULT_AVATAR: &str = "👤";

/// Highest performance score.
pub const MAX_PERFORMANCE: u32 = 100;

/// Dashboard accounts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaffDirectory {
    users: Vec<User>,
}

impl StaffDirectory {
    #[must_use]
    pub const fn new() -> Self {
        Self { users: Vec::new() }
    }

    #[must_use]
    pub const fn from_users(users: Vec<User>) -> Self {
        Self { users }
    }

    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    #[must_use]
    pub fn into_users(self) -> Vec<User> {
        self.users
    }

    // === Snapshots ===

    /// Decode a JSON array of user records.
    pub fn from_json(json: &str) -> Result<Self, DirectoryError> {
        Ok(Self::from_users(serde_json::from_str(json)?))
    }

    pub fn to_json(&self) -> Result<String, DirectoryError> {
        Ok(serde_json::to_string_pretty(&self.users)?)
    }

    /// Load a snapshot file. A missing file yields an empty directory.
    pub fn load(path: &Path) -> Result<Self, DirectoryError> {
        match std::fs::read_to_string(path) {
            Ok(json) => Self::from_json(&json),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::new()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), DirectoryError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    // === Lookup ===

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    #[must_use]
    pub fn find_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.email == email)
    }

    fn index_of(&self, id: &str) -> Result<usize, DirectoryError> {
        self.users
            .iter()
            .position(|u| u.id == id)
            .ok_or_else(|| DirectoryError::UserNotFound(id.to_string()))
    }

    /// Look up a user who may act: approved and not banned.
    pub fn active_member(&self, id: &str) -> Result<&User, DirectoryError> {
        let user = &self.users[self.index_of(id)?];
        if user.is_banned || user.status != UserStatus::Approved {
            return Err(DirectoryError::InactiveActor(id.to_string()));
        }
        Ok(user)
    }

    fn actor(&self, id: &str) -> Result<StaffContext, DirectoryError> {
        self.active_member(id).map(StaffContext::for_user)
    }

    // === Session ===

    /// Register a pending account and log it in.
    pub fn register(&mut self, request: RegisterRequest) -> AuthResult<&User> {
        request
            .validate()
            .map_err(|e| AuthError::Validation(e.to_string()))?;

        if self
            .users
            .iter()
            .any(|u| u.email == request.email || u.username == request.username)
        {
            return Err(AuthError::UserAlreadyExists);
        }

        let mut user = User::new_pending(request.username, request.email);
        user.avatar = Some(
            request
                .avatar
                .filter(|a| !a.is_empty())
                .unwrap_or_else(|| DEFAULT_AVATAR.to_string()),
        );
        user.display_name = Some(
            request
                .display_name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| user.username.clone()),
        );
        user.is_online = true;

        info!(user_id = %user.id, username = %user.username, "Registered pending account");
        self.users.push(user);
        Ok(&self.users[self.users.len() - 1])
    }

    /// Log in by email. Passwords are not stored, so only the email is checked.
    pub fn login(&mut self, email: &str) -> AuthResult<&User> {
        let user = self
            .users
            .iter_mut()
            .find(|u| u.email == email)
            .ok_or(AuthError::InvalidCredentials)?;

        user.is_online = true;
        user.last_active = Utc::now();
        info!(user_id = %user.id, "User logged in");
        Ok(&*user)
    }

    pub fn logout(&mut self, id: &str) -> AuthResult<()> {
        let user = self
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(AuthError::UserNotFound)?;

        user.is_online = false;
        user.last_active = Utc::now();
        info!(user_id = %user.id, "User logged out");
        Ok(())
    }

    // === Administrative actions ===

    /// Approve a pending account as a guide.
    pub fn approve_user(&mut self, actor_id: &str, target_id: &str) -> Result<&User, DirectoryError> {
        let actor = self.actor(actor_id)?;
        actor.require_permission(Permission::ApproveUsers)?;
        let approver = self.users[self.index_of(actor_id)?].display_label().to_string();

        let idx = self.index_of(target_id)?;
        let target = &mut self.users[idx];
        if target.status != UserStatus::Pending {
            return Err(DirectoryError::NotPending(target_id.to_string()));
        }

        target.status = UserStatus::Approved;
        target.rank = Rank::Guide;
        target.approved_by = Some(approver);
        target.approved_at = Some(Utc::now());

        info!(actor_id, target_id, "Approved pending account");
        Ok(&self.users[idx])
    }

    /// Move a user to `new_rank`.
    ///
    /// The actor needs `manage_ranks` and must outrank both the target's
    /// current rank and the rank being assigned.
    pub fn change_rank(
        &mut self,
        actor_id: &str,
        target_id: &str,
        new_rank: Rank,
    ) -> Result<&User, DirectoryError> {
        let actor = self.actor(actor_id)?;
        actor.require_permission(Permission::ManageRanks)?;
        let approver = self.users[self.index_of(actor_id)?].display_label().to_string();

        let idx = self.index_of(target_id)?;
        let old_rank = self.users[idx].rank;
        actor.require_manage(old_rank)?;
        actor.require_manage(new_rank)?;

        let target = &mut self.users[idx];
        target.rank = new_rank;
        if new_rank == Rank::Pending {
            target.status = UserStatus::Pending;
            target.approved_by = None;
            target.approved_at = None;
        } else {
            target.status = UserStatus::Approved;
            target.approved_by = Some(approver);
            target.approved_at = Some(Utc::now());
        }

        info!(actor_id, target_id, from = %old_rank, to = %new_rank, "Changed rank");
        Ok(&self.users[idx])
    }

    /// Flip the admin override flag of a lower-ranked user.
    pub fn toggle_admin(&mut self, actor_id: &str, target_id: &str) -> Result<&User, DirectoryError> {
        let actor = self.actor(actor_id)?;
        actor.require_admin_panel()?;

        let idx = self.index_of(target_id)?;
        actor.require_manage(self.users[idx].rank)?;

        let target = &mut self.users[idx];
        target.is_admin = !target.is_admin;

        info!(actor_id, target_id, is_admin = target.is_admin, "Toggled admin flag");
        Ok(&self.users[idx])
    }

    /// Ban a lower-ranked user from the dashboard, or lift an existing ban.
    ///
    /// `reason` is required when banning and ignored when unbanning.
    pub fn toggle_ban(
        &mut self,
        actor_id: &str,
        target_id: &str,
        reason: &str,
    ) -> Result<&User, DirectoryError> {
        let actor = self.actor(actor_id)?;
        actor.require_permission(Permission::WebsiteBan)?;
        let banned_by = self.users[self.index_of(actor_id)?].display_label().to_string();

        let idx = self.index_of(target_id)?;
        actor.require_manage(self.users[idx].rank)?;

        let target = &mut self.users[idx];
        if target.is_banned {
            target.is_banned = false;
            target.ban_reason = None;
            target.banned_by = None;
            target.banned_at = None;
            info!(actor_id, target_id, "Lifted dashboard ban");
        } else {
            let reason = reason.trim();
            if reason.is_empty() {
                return Err(DirectoryError::Validation("Ban reason is required".into()));
            }
            target.is_banned = true;
            target.ban_reason = Some(reason.to_string());
            target.banned_by = Some(banned_by);
            target.banned_at = Some(Utc::now());
            info!(actor_id, target_id, reason, "Banned from dashboard");
        }
        target.is_online = false;

        Ok(&self.users[idx])
    }

    /// Count one issued punishment towards a user's statistics.
    pub fn credit_action(&mut self, id: &str) -> Result<&User, DirectoryError> {
        let idx = self.index_of(id)?;
        let user = &mut self.users[idx];
        user.total_actions = user.total_actions.saturating_add(1);
        user.performance = user.performance.saturating_add(1).min(MAX_PERFORMANCE);
        Ok(&self.users[idx])
    }

    // === Queries ===

    pub fn pending(&self) -> impl Iterator<Item = &User> {
        self.users.iter().filter(|u| u.status == UserStatus::Pending)
    }

    pub fn banned(&self) -> impl Iterator<Item = &User> {
        self.users.iter().filter(|u| u.is_banned)
    }

    /// Approved accounts that are not banned.
    pub fn active(&self) -> impl Iterator<Item = &User> {
        self.users
            .iter()
            .filter(|u| !u.is_banned && u.status == UserStatus::Approved)
    }

    pub fn online(&self) -> impl Iterator<Item = &User> {
        self.users.iter().filter(|u| u.is_online && !u.is_banned)
    }

    /// Accounts `user_id` can exchange messages with.
    pub fn messageable<'a>(&'a self, user_id: &'a str) -> impl Iterator<Item = &'a User> {
        self.active().filter(move |u| u.id != user_id)
    }

    /// Number of non-banned accounts per rank, for every rank.
    #[must_use]
    pub fn count_by_rank(&self) -> Vec<(Rank, usize)> {
        Rank::all()
            .iter()
            .map(|rank| {
                let count = self
                    .users
                    .iter()
                    .filter(|u| u.rank == *rank && !u.is_banned)
                    .count();
                (*rank, count)
            })
            .collect()
    }
}
