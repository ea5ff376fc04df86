//! The punishment log and its filters.

use std::path::Path;

use cc_common::User;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use super::error::PunishmentError;
use super::types::{Comment, PunishmentKind, PunishmentRecord, PunishmentRequest};
use crate::permissions::StaffContext;

/// Active/inactive filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

/// Time window measured back from "now".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateRange {
    #[default]
    All,
    /// Same calendar day (UTC).
    Today,
    Week,
    Month,
}

impl DateRange {
    fn contains(self, timestamp: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match self {
            Self::All => true,
            Self::Today => timestamp.date_naive() == now.date_naive(),
            Self::Week => timestamp >= now - Duration::days(7),
            Self::Month => timestamp >= now - Duration::days(30),
        }
    }
}

/// Criteria for [`PunishmentLog::filter`]. The default matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PunishmentFilter {
    /// Case-insensitive substring of target username or reason. Surrounding
    /// whitespace is ignored, so a blank search matches everything.
    pub search: String,
    pub kind: Option<PunishmentKind>,
    pub status: StatusFilter,
    pub staff_id: Option<String>,
    pub date_range: DateRange,
}

impl PunishmentFilter {
    fn matches(&self, record: &PunishmentRecord, now: DateTime<Utc>) -> bool {
        let search = self.search.trim().to_lowercase();
        if !search.is_empty()
            && !record.target_username.to_lowercase().contains(&search)
            && !record.reason.to_lowercase().contains(&search)
        {
            return false;
        }

        if self.kind.is_some_and(|kind| kind != record.kind) {
            return false;
        }

        let status_ok = match self.status {
            StatusFilter::All => true,
            StatusFilter::Active => record.is_active,
            StatusFilter::Inactive => !record.is_active,
        };
        if !status_ok {
            return false;
        }

        if self
            .staff_id
            .as_deref()
            .is_some_and(|id| id != record.staff_id)
        {
            return false;
        }

        self.date_range.contains(record.timestamp, now)
    }
}

/// Punishment records, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PunishmentLog {
    records: Vec<PunishmentRecord>,
}

impl PunishmentLog {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Wrap existing records. They are re-sorted newest first.
    #[must_use]
    pub fn from_records(mut records: Vec<PunishmentRecord>) -> Self {
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Self { records }
    }

    #[must_use]
    pub fn records(&self) -> &[PunishmentRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&PunishmentRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut PunishmentRecord, PunishmentError> {
        self.records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| PunishmentError::NotFound(id.to_string()))
    }

    // === Snapshots ===

    pub fn from_json(json: &str) -> Result<Self, PunishmentError> {
        Ok(Self::from_records(serde_json::from_str(json)?))
    }

    pub fn to_json(&self) -> Result<String, PunishmentError> {
        Ok(serde_json::to_string_pretty(&self.records)?)
    }

    /// Load a snapshot file. A missing file yields an empty log.
    pub fn load(path: &Path) -> Result<Self, PunishmentError> {
        match std::fs::read_to_string(path) {
            Ok(json) => Self::from_json(&json),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::new()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), PunishmentError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    // === Mutations ===

    /// Record a punishment issued by `actor`.
    ///
    /// The actor must be approved and not banned, and their rank must grant
    /// the kind's permission. Target and reason are trimmed; a kick drops
    /// any duration it was given.
    pub fn record(
        &mut self,
        actor: &User,
        request: PunishmentRequest,
    ) -> Result<&PunishmentRecord, PunishmentError> {
        StaffContext::for_active_user(actor)?
            .require_permission(request.kind.required_permission())?;

        let request = PunishmentRequest {
            target_username: request.target_username.trim().to_string(),
            reason: request.reason.trim().to_string(),
            ..request
        };
        request
            .validate()
            .map_err(|e| PunishmentError::Validation(e.to_string()))?;

        let duration = request
            .duration
            .filter(|_| request.kind.takes_duration())
            .map(|d| d.to_minutes());

        let record = PunishmentRecord {
            id: Uuid::now_v7().to_string(),
            kind: request.kind,
            target_username: request.target_username,
            staff_username: actor.display_label().to_string(),
            staff_id: actor.id.clone(),
            reason: request.reason,
            duration,
            timestamp: Utc::now(),
            is_active: true,
            likes: Vec::new(),
            comments: Vec::new(),
        };

        info!(
            punishment_id = %record.id,
            staff_id = %record.staff_id,
            kind = ?record.kind,
            target = %record.target_username,
            "Recorded punishment"
        );
        self.records.insert(0, record);
        Ok(&self.records[0])
    }

    /// Like or unlike a record. Returns whether `user_id` now likes it.
    pub fn toggle_like(&mut self, id: &str, user_id: &str) -> Result<bool, PunishmentError> {
        let record = self.get_mut(id)?;
        if let Some(pos) = record.likes.iter().position(|u| u == user_id) {
            record.likes.remove(pos);
            Ok(false)
        } else {
            record.likes.push(user_id.to_string());
            Ok(true)
        }
    }

    pub fn add_comment(
        &mut self,
        id: &str,
        author: &User,
        content: &str,
    ) -> Result<&Comment, PunishmentError> {
        StaffContext::for_active_user(author)?;
        let content = content.trim();
        if content.is_empty() {
            return Err(PunishmentError::EmptyComment);
        }

        let record = self.get_mut(id)?;
        record.comments.push(Comment {
            id: Uuid::now_v7().to_string(),
            user_id: author.id.clone(),
            username: author.display_label().to_string(),
            content: content.to_string(),
            timestamp: Utc::now(),
        });

        let index = record.comments.len() - 1;
        Ok(&record.comments[index])
    }

    /// Activate or lift a punishment. Needs the same permission as issuing it.
    pub fn set_active(
        &mut self,
        actor: &User,
        id: &str,
        active: bool,
    ) -> Result<&PunishmentRecord, PunishmentError> {
        let record = self.get_mut(id)?;
        StaffContext::for_active_user(actor)?
            .require_permission(record.kind.required_permission())?;

        record.is_active = active;
        info!(punishment_id = id, actor_id = %actor.id, active, "Updated punishment status");
        Ok(&*record)
    }

    // === Queries ===

    /// Records matching `filter`, newest first.
    #[must_use]
    pub fn filter(&self, filter: &PunishmentFilter, now: DateTime<Utc>) -> Vec<&PunishmentRecord> {
        self.records
            .iter()
            .filter(|r| filter.matches(r, now))
            .collect()
    }

    /// Records issued by one staff member.
    pub fn by_staff<'a>(&'a self, staff_id: &'a str) -> impl Iterator<Item = &'a PunishmentRecord> {
        self.records.iter().filter(move |r| r.staff_id == staff_id)
    }

    pub fn active(&self) -> impl Iterator<Item = &PunishmentRecord> {
        self.records.iter().filter(|r| r.is_active)
    }
}
