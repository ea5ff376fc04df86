//! Staff permission sets using bitflags.
//!
//! One bit per [`Permission`], in table order. The per-rank presets are
//! built as unions of the preset below them, so every rank holds everything
//! the lower ranks hold.

use bitflags::bitflags;

use super::permission::Permission;

bitflags! {
    /// Set of staff permissions represented as a 32-bit bitfield.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
    #[serde(transparent)]
    pub struct StaffPermissions: u32 {
        // === Messaging (bits 0-2) ===
        const READ_MESSAGES        = 1 << 0;
        const SEND_MESSAGES        = 1 << 1;
        const VIEW_ANNOUNCEMENTS   = 1 << 2;

        // === Game moderation (bits 3-5) ===
        const KICK_PLAYERS         = 1 << 3;
        const MUTE_PLAYERS         = 1 << 4;
        const BAN_PLAYERS          = 1 << 5;

        // === Administration (bits 6-12) ===
        const WEBSITE_BAN          = 1 << 6;
        const MANAGE_USERS         = 1 << 7;
        const CREATE_ANNOUNCEMENTS = 1 << 8;
        const ADMIN_PANEL          = 1 << 9;
        const APPROVE_USERS        = 1 << 10;
        const MANAGE_RANKS         = 1 << 11;
        const EDIT_RULES           = 1 << 12;
    }
}

impl StaffPermissions {
    // === Rank Presets ===

    /// Pending accounts hold nothing.
    pub const PENDING_DEFAULT: Self = Self::empty();

    pub const GUIDE_DEFAULT: Self = Self::PENDING_DEFAULT
        .union(Self::READ_MESSAGES)
        .union(Self::SEND_MESSAGES)
        .union(Self::VIEW_ANNOUNCEMENTS);

    pub const ASSISTANT_DEFAULT: Self = Self::GUIDE_DEFAULT.union(Self::KICK_PLAYERS);

    pub const MODERATOR_DEFAULT: Self = Self::ASSISTANT_DEFAULT
        .union(Self::MUTE_PLAYERS)
        .union(Self::BAN_PLAYERS);

    pub const ADMIN_DEFAULT: Self = Self::MODERATOR_DEFAULT
        .union(Self::WEBSITE_BAN)
        .union(Self::MANAGE_USERS)
        .union(Self::CREATE_ANNOUNCEMENTS);

    pub const DEVELOPER_DEFAULT: Self = Self::ADMIN_DEFAULT
        .union(Self::ADMIN_PANEL)
        .union(Self::EDIT_RULES);

    pub const FOUNDER_DEFAULT: Self = Self::DEVELOPER_DEFAULT
        .union(Self::APPROVE_USERS)
        .union(Self::MANAGE_RANKS);

    /// Single-permission flag for a [`Permission`].
    #[must_use]
    pub const fn from_permission(permission: Permission) -> Self {
        match permission {
            Permission::ReadMessages => Self::READ_MESSAGES,
            Permission::SendMessages => Self::SEND_MESSAGES,
            Permission::ViewAnnouncements => Self::VIEW_ANNOUNCEMENTS,
            Permission::KickPlayers => Self::KICK_PLAYERS,
            Permission::MutePlayers => Self::MUTE_PLAYERS,
            Permission::BanPlayers => Self::BAN_PLAYERS,
            Permission::WebsiteBan => Self::WEBSITE_BAN,
            Permission::ManageUsers => Self::MANAGE_USERS,
            Permission::CreateAnnouncements => Self::CREATE_ANNOUNCEMENTS,
            Permission::AdminPanel => Self::ADMIN_PANEL,
            Permission::ApproveUsers => Self::APPROVE_USERS,
            Permission::ManageRanks => Self::MANAGE_RANKS,
            Permission::EditRules => Self::EDIT_RULES,
        }
    }

    /// Check if this set includes the specified permission(s).
    ///
    /// # Examples
    ///
    /// ```
    /// use cc_staff::permissions::StaffPermissions;
    ///
    /// let perms = StaffPermissions::MODERATOR_DEFAULT;
    /// assert!(perms.has(StaffPermissions::BAN_PLAYERS));
    /// assert!(!perms.has(StaffPermissions::ADMIN_PANEL));
    /// ```
    #[must_use]
    pub const fn has(self, permissions: Self) -> bool {
        self.contains(permissions)
    }

    /// Check a single named permission.
    #[must_use]
    pub const fn grants(self, permission: Permission) -> bool {
        self.contains(Self::from_permission(permission))
    }

    /// Named permissions in this set, in table order.
    pub fn permissions(self) -> impl Iterator<Item = Permission> {
        Permission::all()
            .iter()
            .copied()
            .filter(move |p| self.grants(*p))
    }
}

impl From<Permission> for StaffPermissions {
    fn from(permission: Permission) -> Self {
        Self::from_permission(permission)
    }
}

impl FromIterator<Permission> for StaffPermissions {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |acc, p| acc | Self::from_permission(p))
    }
}

impl Default for StaffPermissions {
    fn default() -> Self {
        Self::empty()
    }
}
