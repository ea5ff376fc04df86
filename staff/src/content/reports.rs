//! Player complaints, bug reports and suggestions filed by staff.

use std::collections::BTreeMap;
use std::path::Path;

use cc_common::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use super::{load_snapshot, save_snapshot, ContentError};
use crate::permissions::{Permission, StaffContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    PlayerComplaint,
    BugReport,
    Suggestion,
    StaffComplaint,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    #[default]
    Pending,
    Investigating,
    Resolved,
    Rejected,
}

impl ReportStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Investigating => "investigating",
            Self::Resolved => "resolved",
            Self::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReportStatus {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "investigating" => Ok(Self::Investigating),
            "resolved" => Ok(Self::Resolved),
            "rejected" => Ok(Self::Rejected),
            other => Err(ContentError::Validation(format!(
                "Unknown report status: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ReportKind,
    pub title: String,
    pub description: String,
    /// Display label of the filing staff member.
    pub reported_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reported_user: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub status: ReportStatus,
    /// Display label of whoever last changed the status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    pub priority: ReportPriority,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    #[serde(rename = "type")]
    pub kind: ReportKind,
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 2000, message = "Description must be 1-2000 characters"))]
    pub description: String,
    #[serde(default)]
    pub reported_user: Option<String>,
    #[serde(default)]
    pub priority: ReportPriority,
}

impl ReportRequest {
    pub fn new(kind: ReportKind, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            description: description.into(),
            reported_user: None,
            priority: ReportPriority::default(),
        }
    }

    #[must_use]
    pub fn against(mut self, username: impl Into<String>) -> Self {
        self.reported_user = Some(username.into());
        self
    }

    #[must_use]
    pub const fn with_priority(mut self, priority: ReportPriority) -> Self {
        self.priority = priority;
        self
    }
}

/// Criteria for [`ReportBook::filter`]. The default matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportFilter {
    /// Case-insensitive substring of title or description.
    pub search: String,
    pub kind: Option<ReportKind>,
    pub status: Option<ReportStatus>,
}

impl ReportFilter {
    fn matches(&self, report: &Report) -> bool {
        let search = self.search.trim().to_lowercase();
        if !search.is_empty()
            && !report.title.to_lowercase().contains(&search)
            && !report.description.to_lowercase().contains(&search)
        {
            return false;
        }
        self.kind.is_none_or(|kind| kind == report.kind)
            && self.status.is_none_or(|status| status == report.status)
    }
}

/// Reports, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportBook {
    reports: Vec<Report>,
}

impl ReportBook {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            reports: Vec::new(),
        }
    }

    #[must_use]
    pub fn from_reports(mut reports: Vec<Report>) -> Self {
        reports.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Self { reports }
    }

    #[must_use]
    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Report> {
        self.reports.iter().find(|r| r.id == id)
    }

    pub fn filter<'a>(&'a self, filter: &'a ReportFilter) -> impl Iterator<Item = &'a Report> + 'a {
        self.reports.iter().filter(move |r| filter.matches(r))
    }

    /// Report totals per status. Statuses with no reports are listed as zero.
    #[must_use]
    pub fn count_by_status(&self) -> BTreeMap<ReportStatus, usize> {
        let mut counts: BTreeMap<ReportStatus, usize> = [
            ReportStatus::Pending,
            ReportStatus::Investigating,
            ReportStatus::Resolved,
            ReportStatus::Rejected,
        ]
        .into_iter()
        .map(|status| (status, 0))
        .collect();
        for report in &self.reports {
            *counts.entry(report.status).or_default() += 1;
        }
        counts
    }

    pub fn load(path: &Path) -> Result<Self, ContentError> {
        Ok(Self::from_reports(load_snapshot(path)?))
    }

    pub fn save(&self, path: &Path) -> Result<(), ContentError> {
        save_snapshot(path, &self.reports)
    }

    /// File a new pending report. Any active staff account may file.
    pub fn file(&mut self, reporter: &User, request: ReportRequest) -> Result<&Report, ContentError> {
        StaffContext::for_active_user(reporter)?;

        let request = ReportRequest {
            title: request.title.trim().to_string(),
            description: request.description.trim().to_string(),
            reported_user: request
                .reported_user
                .as_deref()
                .map(str::trim)
                .filter(|u| !u.is_empty())
                .map(str::to_string),
            ..request
        };
        request.validate()?;

        let report = Report {
            id: Uuid::now_v7().to_string(),
            kind: request.kind,
            title: request.title,
            description: request.description,
            reported_by: reporter.display_label().to_string(),
            reported_user: request.reported_user,
            timestamp: Utc::now(),
            status: ReportStatus::Pending,
            assigned_to: None,
            response: None,
            priority: request.priority,
        };

        info!(
            report_id = %report.id,
            reporter_id = %reporter.id,
            kind = ?report.kind,
            "Filed report"
        );
        self.reports.insert(0, report);
        Ok(&self.reports[0])
    }

    /// Move a report to `status`, assigning it to the actor. Needs `manage_users`.
    ///
    /// A non-blank `response` replaces the stored one; otherwise it is kept.
    pub fn update_status(
        &mut self,
        actor: &User,
        id: &str,
        status: ReportStatus,
        response: Option<&str>,
    ) -> Result<&Report, ContentError> {
        StaffContext::for_active_user(actor)?.require_permission(Permission::ManageUsers)?;

        let report = self
            .reports
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| ContentError::not_found("Report", id))?;

        report.status = status;
        report.assigned_to = Some(actor.display_label().to_string());
        if let Some(response) = response.map(str::trim).filter(|r| !r.is_empty()) {
            report.response = Some(response.to_string());
        }

        info!(report_id = id, actor_id = %actor.id, status = %status, "Updated report status");
        Ok(report)
    }
}
