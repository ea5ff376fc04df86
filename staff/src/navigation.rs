//! Dashboard sections and what each rank may open.

use cc_common::{Rank, User};
use serde::{Deserialize, Serialize};

use crate::permissions::{can_access_admin_panel, has_permission, Permission};
use crate::punishments::PunishmentKind;

/// A page of the staff dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Dashboard,
    Staff,
    Punishments,
    Messages,
    Reports,
    Notebook,
    Performance,
    Rules,
    Admin,
    Settings,
}

impl Section {
    /// Sections in sidebar order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Dashboard,
            Self::Staff,
            Self::Punishments,
            Self::Messages,
            Self::Reports,
            Self::Notebook,
            Self::Performance,
            Self::Rules,
            Self::Admin,
            Self::Settings,
        ]
    }

    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Staff => "staff",
            Self::Punishments => "punishments",
            Self::Messages => "messages",
            Self::Reports => "reports",
            Self::Notebook => "notebook",
            Self::Performance => "performance",
            Self::Rules => "rules",
            Self::Admin => "admin",
            Self::Settings => "settings",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Ana Sayfa",
            Self::Staff => "Yetkili Listesi",
            Self::Punishments => "Cezalar",
            Self::Messages => "Mesajlar",
            Self::Reports => "Raporlar",
            Self::Notebook => "Not Defteri",
            Self::Performance => "Performans",
            Self::Rules => "Kurallar",
            Self::Admin => "Admin Paneli",
            Self::Settings => "Ayarlar",
        }
    }

    #[must_use]
    pub const fn required_permission(self) -> Permission {
        match self {
            Self::Messages => Permission::ReadMessages,
            Self::Admin => Permission::AdminPanel,
            _ => Permission::ViewAnnouncements,
        }
    }

    /// Whether `user` may open this section.
    ///
    /// The admin section follows the admin-panel rule, so the admin flag
    /// opens it regardless of rank.
    #[must_use]
    pub fn is_visible_to(self, user: Option<&User>) -> bool {
        match self {
            Self::Admin => can_access_admin_panel(user),
            _ => has_permission(user.map(|u| u.rank), self.required_permission()),
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Sections `user` may open, in sidebar order.
#[must_use]
pub fn visible_sections(user: Option<&User>) -> Vec<Section> {
    Section::all()
        .iter()
        .copied()
        .filter(|section| section.is_visible_to(user))
        .collect()
}

/// Punishment kinds `rank` may issue.
#[must_use]
pub fn punishment_kinds_for(rank: Rank) -> Vec<PunishmentKind> {
    PunishmentKind::all()
        .iter()
        .copied()
        .filter(|kind| has_permission(Some(rank), kind.required_permission()))
        .collect()
}
