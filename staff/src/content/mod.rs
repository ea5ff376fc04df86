//! Dashboard Content
//!
//! Server rules, announcements, staff reports and messages. Each store is a
//! plain list with JSON snapshots; every mutation checks the acting account
//! through the permission authority before touching a record.

mod error;
pub mod announcements;
pub mod messages;
pub mod reports;
pub mod rules;

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

pub use announcements::{Announcement, AnnouncementBoard, AnnouncementDraft};
pub use error::ContentError;
pub use messages::{Message, MessageStore, GROUP_CHANNEL};
pub use reports::{Report, ReportBook, ReportFilter, ReportKind, ReportPriority, ReportRequest, ReportStatus};
pub use rules::{Rule, RuleBook, RuleDraft};

/// Read a snapshot file. A missing file yields an empty list.
fn load_snapshot<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, ContentError> {
    match std::fs::read_to_string(path) {
        Ok(json) => Ok(serde_json::from_str(&json)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}

fn save_snapshot<T: Serialize>(path: &Path, items: &[T]) -> Result<(), ContentError> {
    std::fs::write(path, serde_json::to_string_pretty(items)?)?;
    Ok(())
}
