//! Rank-based permission system.
//!
//! - Permissions: the fixed vocabulary of named capabilities
//! - Flags: permission sets and the cumulative per-rank presets
//! - Rank table: level and permission set for every rank
//! - Resolver: the fail-closed query functions

pub mod flags;
pub mod helpers;
pub mod permission;
pub mod rank;
pub mod resolver;

pub use flags::StaffPermissions;
pub use helpers::StaffContext;
pub use permission::Permission;
pub use rank::{RankConfig, RankTable, RankTableError};
pub use resolver::{
    can_access_admin_panel, can_manage_user, get_rank_config, has_permission, has_permission_id,
    require_outranks, require_permission, PermissionError,
};
