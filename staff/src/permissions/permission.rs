//! Named staff permissions.
//!
//! The identifier strings are the contract with every caller and with stored
//! data, so they never change. Inside the crate permissions are always
//! handled as the [`Permission`] enum.

/// A named capability granted to one or more ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Read direct and group messages
    ReadMessages,
    /// Send direct and group messages
    SendMessages,
    /// See the announcement board
    ViewAnnouncements,
    /// Kick players from the game server
    KickPlayers,
    /// Mute players on the game server
    MutePlayers,
    /// Ban players from the game server
    BanPlayers,
    /// Ban accounts from the website
    WebsiteBan,
    /// Manage staff accounts and reports
    ManageUsers,
    /// Publish announcements
    CreateAnnouncements,
    /// Open the admin panel
    AdminPanel,
    /// Approve pending registrations
    ApproveUsers,
    /// Change other users' ranks
    ManageRanks,
    /// Edit the server rules
    EditRules,
}

impl Permission {
    /// Returns the stable identifier for this permission.
    ///
    /// # Examples
    ///
    /// ```
    /// use cc_staff::permissions::Permission;
    ///
    /// assert_eq!(Permission::BanPlayers.id(), "ban_players");
    /// ```
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::ReadMessages => "read_messages",
            Self::SendMessages => "send_messages",
            Self::ViewAnnouncements => "view_announcements",
            Self::KickPlayers => "kick_players",
            Self::MutePlayers => "mute_players",
            Self::BanPlayers => "ban_players",
            Self::WebsiteBan => "website_ban",
            Self::ManageUsers => "manage_users",
            Self::CreateAnnouncements => "create_announcements",
            Self::AdminPanel => "admin_panel",
            Self::ApproveUsers => "approve_users",
            Self::ManageRanks => "manage_ranks",
            Self::EditRules => "edit_rules",
        }
    }

    /// Look up a permission by identifier.
    ///
    /// Matching is exact; there is no normalization or wildcard.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::all().iter().copied().find(|p| p.id() == id)
    }

    /// Returns all permissions in table order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::ReadMessages,
            Self::SendMessages,
            Self::ViewAnnouncements,
            Self::KickPlayers,
            Self::MutePlayers,
            Self::BanPlayers,
            Self::WebsiteBan,
            Self::ManageUsers,
            Self::CreateAnnouncements,
            Self::AdminPanel,
            Self::ApproveUsers,
            Self::ManageRanks,
            Self::EditRules,
        ]
    }

    /// Display name shown in the dashboard.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ReadMessages => "Mesaj Okuma",
            Self::SendMessages => "Mesaj Gönderme",
            Self::ViewAnnouncements => "Duyuru Görme",
            Self::KickPlayers => "Kick Atma",
            Self::MutePlayers => "Mute Atma",
            Self::BanPlayers => "Ban Atma",
            Self::WebsiteBan => "Website Ban",
            Self::ManageUsers => "Kullanıcı Yönetimi",
            Self::CreateAnnouncements => "Duyuru Oluşturma",
            Self::AdminPanel => "Admin Panel",
            Self::ApproveUsers => "Kullanıcı Onaylama",
            Self::ManageRanks => "Rank Yönetimi",
            Self::EditRules => "Kural Düzenleme",
        }
    }

    /// Human-readable description. Presentational only.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::ReadMessages => "Mesajları okuyabilir",
            Self::SendMessages => "Mesaj gönderebilir",
            Self::ViewAnnouncements => "Duyuruları görebilir",
            Self::KickPlayers => "Oyuncuları kickleyebilir",
            Self::MutePlayers => "Oyuncuları muteleyebilir",
            Self::BanPlayers => "Oyuncuları banlayabilir",
            Self::WebsiteBan => "Web sitesinden banlayabilir",
            Self::ManageUsers => "Kullanıcıları yönetebilir",
            Self::CreateAnnouncements => "Duyuru oluşturabilir",
            Self::AdminPanel => "Admin paneline erişebilir",
            Self::ApproveUsers => "Beklemedeki kullanıcıları onaylayabilir",
            Self::ManageRanks => "Kullanıcı ranklarını değiştirebilir",
            Self::EditRules => "Kuralları düzenleyebilir",
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_snake_case() {
        for perm in Permission::all() {
            let id = perm.id();
            assert!(
                id.chars().all(|c| c.is_ascii_lowercase() || c == '_'),
                "Permission id '{id}' should be snake_case"
            );
        }
    }

    #[test]
    fn test_ids_are_unique() {
        let ids: Vec<&str> = Permission::all().iter().map(|p| p.id()).collect();

        for (i, id) in ids.iter().enumerate() {
            for (j, other) in ids.iter().enumerate() {
                if i != j {
                    assert_ne!(id, other, "Duplicate permission id found: {id}");
                }
            }
        }
    }

    #[test]
    fn test_vocabulary_is_preserved() {
        let expected = [
            "read_messages",
            "send_messages",
            "view_announcements",
            "kick_players",
            "mute_players",
            "ban_players",
            "website_ban",
            "manage_users",
            "create_announcements",
            "admin_panel",
            "approve_users",
            "manage_ranks",
            "edit_rules",
        ];
        let ids: Vec<&str> = Permission::all().iter().map(|p| p.id()).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_from_id_roundtrip() {
        for perm in Permission::all() {
            assert_eq!(Permission::from_id(perm.id()), Some(*perm));
        }
    }

    #[test]
    fn test_from_id_is_exact() {
        assert_eq!(Permission::from_id("Ban_Players"), None);
        assert_eq!(Permission::from_id("ban_players "), None);
        assert_eq!(Permission::from_id("ban_*"), None);
        assert_eq!(Permission::from_id(""), None);
    }

    #[test]
    fn test_names_and_descriptions_are_not_empty() {
        for perm in Permission::all() {
            assert!(!perm.name().is_empty(), "Name for {perm:?} is empty");
            assert!(
                !perm.description().is_empty(),
                "Description for {perm:?} is empty"
            );
        }
    }

    #[test]
    fn test_serde_matches_id() {
        for perm in Permission::all() {
            let json = serde_json::to_string(perm).unwrap();
            assert_eq!(json, format!("\"{}\"", perm.id()));

            let restored: Permission = serde_json::from_str(&json).unwrap();
            assert_eq!(*perm, restored);
        }
    }

    #[test]
    fn test_display_is_id() {
        assert_eq!(Permission::AdminPanel.to_string(), "admin_panel");
    }
}
