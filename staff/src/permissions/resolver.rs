//! Permission resolution logic.
//!
//! Answers "does rank R hold permission P?" and "does rank A outrank rank
//! B?" against a [`RankTable`]. Every query is pure and fails closed: an
//! absent user, an absent rank or an unknown permission identifier all
//! resolve to `false`. Only a rank token outside the enumeration is an
//! error, because it means stored data and the rank type have drifted apart.

use cc_common::{Rank, User};
use thiserror::Error;

use super::permission::Permission;
use super::rank::{RankConfig, RankTable, RankTableError};

impl RankTable {
    /// Check if `rank` holds `permission`. `None` never holds anything.
    #[must_use]
    pub const fn has_permission(&self, rank: Option<Rank>, permission: Permission) -> bool {
        match rank {
            Some(rank) => self.permissions(rank).grants(permission),
            None => false,
        }
    }

    /// String-boundary form of [`RankTable::has_permission`].
    ///
    /// Identifiers outside the vocabulary are not errors; no rank holds them.
    #[must_use]
    pub fn has_permission_id(&self, rank: Option<Rank>, permission_id: &str) -> bool {
        match Permission::from_id(permission_id) {
            Some(permission) => self.has_permission(rank, permission),
            None => {
                tracing::debug!(permission_id, "Unknown permission identifier, denying");
                false
            }
        }
    }

    /// Strict level comparison; equal ranks cannot manage each other.
    #[must_use]
    pub const fn can_manage_user(&self, manager: Rank, target: Rank) -> bool {
        self.level(manager) > self.level(target)
    }

    /// The admin flag short-circuits; otherwise the rank needs `admin_panel`.
    #[must_use]
    pub fn can_access_admin_panel(&self, user: Option<&User>) -> bool {
        match user {
            Some(user) if user.is_admin => true,
            Some(user) => self.has_permission(Some(user.rank), Permission::AdminPanel),
            None => false,
        }
    }

    /// [`RankTable::validate`], reported as a permission error.
    pub fn ensure_valid(&self) -> Result<(), PermissionError> {
        self.validate().map_err(|e| {
            tracing::error!(error = %e, "Rank table is inconsistent");
            PermissionError::from(e)
        })
    }

    /// Resolve a stored rank token to its config.
    pub fn config_for_token(&self, token: &str) -> Result<&RankConfig, PermissionError> {
        match token.parse::<Rank>() {
            Ok(rank) => Ok(self.config(rank)),
            Err(_) => {
                tracing::error!(token, "Rank token is not part of the rank table");
                Err(PermissionError::UnknownRank(token.to_string()))
            }
        }
    }
}

/// Configuration for a rank in the standard table.
#[must_use]
pub fn get_rank_config(rank: Rank) -> &'static RankConfig {
    RankTable::standard().config(rank)
}

/// Check a permission against the standard table.
#[must_use]
pub fn has_permission(rank: Option<Rank>, permission: Permission) -> bool {
    RankTable::standard().has_permission(rank, permission)
}

/// Check a permission identifier against the standard table.
#[must_use]
pub fn has_permission_id(rank: Option<Rank>, permission_id: &str) -> bool {
    RankTable::standard().has_permission_id(rank, permission_id)
}

/// Check if `manager` strictly outranks `target` in the standard table.
#[must_use]
pub fn can_manage_user(manager: Rank, target: Rank) -> bool {
    RankTable::standard().can_manage_user(manager, target)
}

/// Check admin panel access against the standard table.
#[must_use]
pub fn can_access_admin_panel(user: Option<&User>) -> bool {
    RankTable::standard().can_access_admin_panel(user)
}

/// Require that `rank` holds `permission`.
pub fn require_permission(rank: Option<Rank>, permission: Permission) -> Result<(), PermissionError> {
    if has_permission(rank, permission) {
        Ok(())
    } else {
        tracing::debug!(?rank, permission = permission.id(), "Permission denied");
        Err(PermissionError::MissingPermission(permission))
    }
}

/// Require that `actor` strictly outranks `target`.
pub fn require_outranks(actor: Rank, target: Rank) -> Result<(), PermissionError> {
    if can_manage_user(actor, target) {
        Ok(())
    } else {
        tracing::debug!(%actor, %target, "Rank hierarchy violation");
        Err(PermissionError::RankHierarchy { actor, target })
    }
}

/// Permission check errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermissionError {
    /// Rank lacks the required permission.
    #[error("Missing permission: {0}")]
    MissingPermission(Permission),

    /// Actor does not outrank the target.
    #[error("Rank {actor} cannot manage rank {target}")]
    RankHierarchy { actor: Rank, target: Rank },

    /// Acting account is banned or still pending approval.
    #[error("Account {0} is banned or pending approval")]
    InactiveAccount(String),

    /// Neither the admin flag nor the rank grants admin panel access.
    #[error("Admin panel access required")]
    AdminPanelRequired,

    /// Rank token outside the rank enumeration.
    #[error("Unknown rank: {0:?}")]
    UnknownRank(String),

    /// The rank table itself is inconsistent.
    #[error("Invalid rank table: {0}")]
    InvalidRankTable(#[from] RankTableError),
}
