//! Punishment records and request types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::permissions::Permission;

/// Kind of in-game punishment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PunishmentKind {
    Mute,
    Ban,
    Kick,
    WebsiteBan,
}

impl PunishmentKind {
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Mute, Self::Ban, Self::Kick, Self::WebsiteBan]
    }

    /// Permission an actor needs to issue this kind.
    #[must_use]
    pub const fn required_permission(self) -> Permission {
        match self {
            Self::Mute => Permission::MutePlayers,
            Self::Ban => Permission::BanPlayers,
            Self::Kick => Permission::KickPlayers,
            Self::WebsiteBan => Permission::WebsiteBan,
        }
    }

    /// Kicks end immediately and never carry a duration.
    #[must_use]
    pub const fn takes_duration(self) -> bool {
        !matches!(self, Self::Kick)
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Mute => "Susturma",
            Self::Ban => "Yasaklama",
            Self::Kick => "Atma",
            Self::WebsiteBan => "Site Yasağı",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationUnit {
    Minutes,
    Hours,
    Days,
}

impl DurationUnit {
    #[must_use]
    pub const fn minutes(self) -> u32 {
        match self {
            Self::Minutes => 1,
            Self::Hours => 60,
            Self::Days => 1440,
        }
    }
}

/// Duration as entered on the punishment form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunishmentDuration {
    pub amount: u32,
    pub unit: DurationUnit,
}

impl PunishmentDuration {
    #[must_use]
    pub const fn new(amount: u32, unit: DurationUnit) -> Self {
        Self { amount, unit }
    }

    #[must_use]
    pub const fn to_minutes(self) -> u32 {
        self.amount.saturating_mul(self.unit.minutes())
    }
}

/// Render a duration in minutes using the largest whole unit.
#[must_use]
pub fn format_duration(minutes: u32) -> String {
    if minutes < 60 {
        format!("{minutes} dakika")
    } else if minutes < 1440 {
        format!("{} saat", minutes / 60)
    } else {
        format!("{} gün", minutes / 1440)
    }
}

/// Request to record a punishment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PunishmentRequest {
    #[serde(rename = "type")]
    pub kind: PunishmentKind,
    #[validate(length(min = 1, max = 32, message = "Target username must be 1-32 characters"))]
    pub target_username: String,
    #[validate(length(min = 1, max = 500, message = "Reason must be 1-500 characters"))]
    pub reason: String,
    #[serde(default)]
    pub duration: Option<PunishmentDuration>,
}

impl PunishmentRequest {
    pub fn new(kind: PunishmentKind, target: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            kind,
            target_username: target.into(),
            reason: reason.into(),
            duration: None,
        }
    }

    #[must_use]
    pub const fn with_duration(mut self, duration: PunishmentDuration) -> Self {
        self.duration = Some(duration);
        self
    }
}

/// Comment left on a punishment record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub user_id: String,
    pub username: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// A recorded punishment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PunishmentRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: PunishmentKind,
    pub target_username: String,
    pub staff_username: String,
    pub staff_id: String,
    pub reason: String,
    /// Length in minutes. `None` is permanent, or a kick.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    pub timestamp: DateTime<Utc>,
    pub is_active: bool,
    /// Ids of users who liked the record.
    #[serde(default)]
    pub likes: Vec<String>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl PunishmentRecord {
    /// Rendered duration, or `None` for permanent punishments and kicks.
    #[must_use]
    pub fn duration_label(&self) -> Option<String> {
        self.duration.map(format_duration)
    }
}
