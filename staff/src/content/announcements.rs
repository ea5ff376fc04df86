//! Staff announcement board.

use std::path::Path;

use cc_common::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use super::{load_snapshot, save_snapshot, ContentError};
use crate::permissions::{Permission, StaffContext};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author_id: String,
    pub author_name: String,
    pub timestamp: DateTime<Utc>,
    /// Pinned with a highlight on the board.
    pub is_important: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementDraft {
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 2000, message = "Content must be 1-2000 characters"))]
    pub content: String,
    #[serde(default)]
    pub is_important: bool,
}

impl AnnouncementDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            is_important: false,
        }
    }

    #[must_use]
    pub const fn important(mut self) -> Self {
        self.is_important = true;
        self
    }
}

/// Announcements, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnouncementBoard {
    announcements: Vec<Announcement>,
}

impl AnnouncementBoard {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            announcements: Vec::new(),
        }
    }

    #[must_use]
    pub fn from_announcements(mut announcements: Vec<Announcement>) -> Self {
        announcements.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Self { announcements }
    }

    #[must_use]
    pub fn announcements(&self) -> &[Announcement] {
        &self.announcements
    }

    /// Important announcements, newest first.
    pub fn important(&self) -> impl Iterator<Item = &Announcement> {
        self.announcements.iter().filter(|a| a.is_important)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Announcement> {
        self.announcements.iter().find(|a| a.id == id)
    }

    pub fn load(path: &Path) -> Result<Self, ContentError> {
        Ok(Self::from_announcements(load_snapshot(path)?))
    }

    pub fn save(&self, path: &Path) -> Result<(), ContentError> {
        save_snapshot(path, &self.announcements)
    }

    /// Publish an announcement. Needs `create_announcements`.
    pub fn post(
        &mut self,
        author: &User,
        draft: AnnouncementDraft,
    ) -> Result<&Announcement, ContentError> {
        StaffContext::for_active_user(author)?
            .require_permission(Permission::CreateAnnouncements)?;

        let draft = AnnouncementDraft {
            title: draft.title.trim().to_string(),
            content: draft.content.trim().to_string(),
            ..draft
        };
        draft.validate()?;

        let announcement = Announcement {
            id: Uuid::now_v7().to_string(),
            title: draft.title,
            content: draft.content,
            author_id: author.id.clone(),
            author_name: author.display_label().to_string(),
            timestamp: Utc::now(),
            is_important: draft.is_important,
        };

        info!(
            announcement_id = %announcement.id,
            author_id = %author.id,
            important = announcement.is_important,
            "Posted announcement"
        );
        self.announcements.insert(0, announcement);
        Ok(&self.announcements[0])
    }

    /// Remove an announcement. Needs `create_announcements`.
    pub fn delete(&mut self, actor: &User, id: &str) -> Result<Announcement, ContentError> {
        StaffContext::for_active_user(actor)?
            .require_permission(Permission::CreateAnnouncements)?;

        let idx = self
            .announcements
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| ContentError::not_found("Announcement", id))?;

        info!(announcement_id = id, actor_id = %actor.id, "Deleted announcement");
        Ok(self.announcements.remove(idx))
    }
}
