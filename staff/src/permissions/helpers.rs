//! Permission helper functions for dashboard actions.
//!
//! Provides a pre-computed context so a caller can run several checks for
//! the same user without repeating table lookups.

use cc_common::{Rank, User, UserStatus};

use super::flags::StaffPermissions;
use super::permission::Permission;
use super::rank::RankTable;
use super::resolver::PermissionError;

/// Pre-computed permission context for a staff member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffContext {
    pub user_id: String,
    pub rank: Rank,
    /// Admin override flag carried on the user record.
    pub is_admin: bool,
    /// Permissions granted by the rank.
    pub permissions: StaffPermissions,
    /// Level of the rank, for hierarchy checks.
    pub level: u8,
}

impl StaffContext {
    /// Build a context from the standard rank table.
    #[must_use]
    pub fn for_user(user: &User) -> Self {
        Self::with_table(RankTable::standard(), user)
    }

    /// Build a context for a user who is about to act.
    ///
    /// Banned and pending accounts hold no effective permissions, whatever
    /// their rank says.
    pub fn for_active_user(user: &User) -> Result<Self, PermissionError> {
        if user.is_banned || user.status != UserStatus::Approved {
            tracing::debug!(user_id = %user.id, "Inactive account attempted a staff action");
            return Err(PermissionError::InactiveAccount(user.id.clone()));
        }
        Ok(Self::for_user(user))
    }

    /// Build a context from a specific rank table.
    #[must_use]
    pub fn with_table(table: &RankTable, user: &User) -> Self {
        let config = table.config(user.rank);
        Self {
            user_id: user.id.clone(),
            rank: user.rank,
            is_admin: user.is_admin,
            permissions: config.permissions,
            level: config.level,
        }
    }

    #[must_use]
    pub const fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.grants(permission)
    }

    /// Require that the member has the specified permission.
    pub const fn require_permission(&self, permission: Permission) -> Result<(), PermissionError> {
        if self.has_permission(permission) {
            Ok(())
        } else {
            Err(PermissionError::MissingPermission(permission))
        }
    }

    /// Check whether this member strictly outranks `target`.
    #[must_use]
    pub fn can_manage(&self, target: Rank) -> bool {
        self.can_manage_in(RankTable::standard(), target)
    }

    /// [`StaffContext::can_manage`] against a specific table.
    #[must_use]
    pub const fn can_manage_in(&self, table: &RankTable, target: Rank) -> bool {
        self.level > table.level(target)
    }

    pub fn require_manage(&self, target: Rank) -> Result<(), PermissionError> {
        if self.can_manage(target) {
            Ok(())
        } else {
            Err(PermissionError::RankHierarchy {
                actor: self.rank,
                target,
            })
        }
    }

    #[must_use]
    pub const fn can_access_admin_panel(&self) -> bool {
        self.is_admin || self.has_permission(Permission::AdminPanel)
    }

    pub const fn require_admin_panel(&self) -> Result<(), PermissionError> {
        if self.can_access_admin_panel() {
            Ok(())
        } else {
            Err(PermissionError::AdminPanelRequired)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staff(rank: Rank) -> User {
        let mut user = User::new_pending("staff", "staff@example.com");
        user.rank = rank;
        user
    }

    #[test]
    fn test_context_mirrors_rank_table() {
        let ctx = StaffContext::for_user(&staff(Rank::Moderator));
        assert_eq!(ctx.rank, Rank::Moderator);
        assert_eq!(ctx.level, 3);
        assert_eq!(ctx.permissions, StaffPermissions::MODERATOR_DEFAULT);
    }

    #[test]
    fn test_active_context_rejects_banned_and_pending() {
        let mut user = staff(Rank::Admin);
        assert!(matches!(
            StaffContext::for_active_user(&user),
            Err(PermissionError::InactiveAccount(_))
        ));

        user.status = UserStatus::Approved;
        assert!(StaffContext::for_active_user(&user).is_ok());

        user.is_banned = true;
        assert_eq!(
            StaffContext::for_active_user(&user),
            Err(PermissionError::InactiveAccount(user.id.clone()))
        );
    }

    #[test]
    fn test_require_permission() {
        let ctx = StaffContext::for_user(&staff(Rank::Admin));
        assert!(ctx.require_permission(Permission::CreateAnnouncements).is_ok());
        assert_eq!(
            ctx.require_permission(Permission::EditRules),
            Err(PermissionError::MissingPermission(Permission::EditRules))
        );
    }

    #[test]
    fn test_require_manage() {
        let ctx = StaffContext::for_user(&staff(Rank::Admin));
        assert!(ctx.require_manage(Rank::Moderator).is_ok());
        assert_eq!(
            ctx.require_manage(Rank::Admin),
            Err(PermissionError::RankHierarchy {
                actor: Rank::Admin,
                target: Rank::Admin,
            })
        );
    }

    #[test]
    fn test_admin_flag_opens_panel() {
        let mut user = staff(Rank::Guide);
        assert!(!StaffContext::for_user(&user).can_access_admin_panel());

        user.is_admin = true;
        let ctx = StaffContext::for_user(&user);
        assert!(ctx.can_access_admin_panel());
        assert!(ctx.require_admin_panel().is_ok());
        // The flag does not add rank permissions.
        assert!(!ctx.has_permission(Permission::AdminPanel));
    }

    #[test]
    fn test_admin_flag_does_not_change_hierarchy() {
        let mut user = staff(Rank::Guide);
        user.is_admin = true;
        let ctx = StaffContext::for_user(&user);
        assert!(!ctx.can_manage(Rank::Assistant));
        assert!(ctx.can_manage(Rank::Pending));
    }
}
