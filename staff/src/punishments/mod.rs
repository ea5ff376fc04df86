//! Punishment Log
//!
//! Mutes, bans, kicks and website bans issued by staff, with likes and
//! comments from other staff members.

mod error;
pub mod log;
pub mod types;

pub use error::PunishmentError;
pub use log::{DateRange, PunishmentFilter, PunishmentLog, StatusFilter};
pub use types::{
    format_duration, Comment, DurationUnit, PunishmentDuration, PunishmentKind, PunishmentRecord,
    PunishmentRequest,
};

use crate::directory::StaffDirectory;

/// Record a punishment for an active staff member and credit it to them.
///
/// Nothing is recorded or credited unless the actor is approved, not banned
/// and holds the kind's permission.
pub fn issue_punishment(
    directory: &mut StaffDirectory,
    log: &mut PunishmentLog,
    actor_id: &str,
    request: PunishmentRequest,
) -> Result<PunishmentRecord, PunishmentError> {
    let actor = directory.active_member(actor_id)?.clone();
    let record = log.record(&actor, request)?.clone();
    directory.credit_action(actor_id)?;
    Ok(record)
}

/// Lift or reinstate a punishment on behalf of an active staff member.
///
/// The actor must be approved, not banned and hold the permission for the
/// record's kind.
pub fn lift_punishment<'a>(
    directory: &StaffDirectory,
    log: &'a mut PunishmentLog,
    actor_id: &str,
    punishment_id: &str,
    active: bool,
) -> Result<&'a PunishmentRecord, PunishmentError> {
    let actor = directory.active_member(actor_id)?;
    log.set_active(actor, punishment_id, active)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::DirectoryError;
    use cc_common::{Rank, User, UserStatus};

    fn directory_with(rank: Rank, status: UserStatus) -> (StaffDirectory, String) {
        let mut user = User::new_pending("mod", "mod@example.com");
        user.rank = rank;
        user.status = status;
        let id = user.id.clone();
        (StaffDirectory::from_users(vec![user]), id)
    }

    #[test]
    fn test_issue_punishment_credits_actor() {
        let (mut directory, id) = directory_with(Rank::Moderator, UserStatus::Approved);
        let mut log = PunishmentLog::new();

        let record = issue_punishment(
            &mut directory,
            &mut log,
            &id,
            PunishmentRequest::new(PunishmentKind::Mute, "Steve", "spam"),
        )
        .unwrap();

        assert_eq!(record.staff_id, id);
        assert_eq!(log.len(), 1);
        let actor = directory.get(&id).unwrap();
        assert_eq!(actor.total_actions, 1);
        assert_eq!(actor.performance, 1);
    }

    #[test]
    fn test_denied_punishment_changes_nothing() {
        let (mut directory, id) = directory_with(Rank::Guide, UserStatus::Approved);
        let mut log = PunishmentLog::new();

        let err = issue_punishment(
            &mut directory,
            &mut log,
            &id,
            PunishmentRequest::new(PunishmentKind::Kick, "Steve", "afk"),
        )
        .unwrap_err();

        assert!(matches!(err, PunishmentError::Permission(_)));
        assert!(log.is_empty());
        assert_eq!(directory.get(&id).unwrap().total_actions, 0);
    }

    #[test]
    fn test_issue_punishment_with_saturated_counters() {
        let (directory, id) = directory_with(Rank::Moderator, UserStatus::Approved);
        let mut users = directory.into_users();
        users[0].performance = u32::MAX;
        let json = StaffDirectory::from_users(users).to_json().unwrap();
        let mut directory = StaffDirectory::from_json(&json).unwrap();
        assert_eq!(directory.get(&id).unwrap().performance, u32::MAX);
        let mut log = PunishmentLog::new();

        issue_punishment(
            &mut directory,
            &mut log,
            &id,
            PunishmentRequest::new(PunishmentKind::Mute, "Steve", "spam"),
        )
        .unwrap();

        assert_eq!(log.len(), 1);
        let actor = directory.get(&id).unwrap();
        assert_eq!(actor.total_actions, 1);
        assert_eq!(actor.performance, crate::directory::MAX_PERFORMANCE);
    }

    #[test]
    fn test_lift_punishment() {
        let (mut directory, id) = directory_with(Rank::Admin, UserStatus::Approved);
        let mut log = PunishmentLog::new();
        let ban = issue_punishment(
            &mut directory,
            &mut log,
            &id,
            PunishmentRequest::new(PunishmentKind::Ban, "Steve", "grief"),
        )
        .unwrap();

        let lifted = lift_punishment(&directory, &mut log, &id, &ban.id, false).unwrap();
        assert!(!lifted.is_active);
        assert!(lift_punishment(&directory, &mut log, &id, "missing", true).is_err());
    }

    #[test]
    fn test_banned_actor_cannot_lift_punishment() {
        let (mut directory, id) = directory_with(Rank::Admin, UserStatus::Approved);
        let mut log = PunishmentLog::new();
        let ban = issue_punishment(
            &mut directory,
            &mut log,
            &id,
            PunishmentRequest::new(PunishmentKind::Ban, "Steve", "grief"),
        )
        .unwrap();

        let mut users = directory.into_users();
        users[0].is_banned = true;
        let directory = StaffDirectory::from_users(users);

        let err = lift_punishment(&directory, &mut log, &id, &ban.id, false).unwrap_err();
        assert!(matches!(
            err,
            PunishmentError::Directory(DirectoryError::InactiveActor(_))
        ));
        assert!(log.get(&ban.id).unwrap().is_active);
    }

    #[test]
    fn test_pending_actor_cannot_punish() {
        let (mut directory, id) = directory_with(Rank::Founder, UserStatus::Pending);
        let mut log = PunishmentLog::new();

        let err = issue_punishment(
            &mut directory,
            &mut log,
            &id,
            PunishmentRequest::new(PunishmentKind::Ban, "Steve", "grief"),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            PunishmentError::Directory(DirectoryError::InactiveActor(_))
        ));
        assert!(log.is_empty());
    }
}
