//! End-to-end staff workflow against an in-memory directory and log.
//!
//! Run with: `cargo test --test staff_workflow_test`

use cc_common::{Rank, User, UserStatus};
use cc_staff::auth::{resolve_screen, verify_access_code, RegisterRequest, Screen};
use cc_staff::content::{
    AnnouncementBoard, AnnouncementDraft, ContentError, MessageStore, ReportBook, ReportKind,
    ReportRequest, ReportStatus,
};
use cc_staff::directory::{DirectoryError, StaffDirectory};
use cc_staff::navigation::{visible_sections, Section};
use cc_staff::permissions::PermissionError;
use cc_staff::punishments::{
    issue_punishment, DurationUnit, PunishmentDuration, PunishmentError, PunishmentFilter,
    PunishmentKind, PunishmentLog, PunishmentRequest, StatusFilter,
};
use chrono::Utc;

fn founder() -> User {
    let mut user = User::new_pending("Founder", "founder@consolecraft.com");
    user.rank = Rank::Founder;
    user.status = UserStatus::Approved;
    user
}

/// Register a newcomer and return their id.
fn register(directory: &mut StaffDirectory, name: &str) -> String {
    let request = RegisterRequest::new(name, &format!("{name}@example.com"), "hunter22");
    directory.register(request).unwrap().id.clone()
}

#[test]
fn test_newcomer_to_moderator() {
    let boss = founder();
    let boss_id = boss.id.clone();
    let mut directory = StaffDirectory::from_users(vec![boss]);
    let mut log = PunishmentLog::new();

    let id = register(&mut directory, "newbie");
    let newbie = directory.get(&id).unwrap();
    assert_eq!(newbie.rank, Rank::Pending);
    assert!(verify_access_code("mami!xiosxl@consolecraft"));
    assert_eq!(resolve_screen(Some(newbie), true), Screen::Pending);
    assert!(visible_sections(Some(newbie)).is_empty());

    // Pending accounts cannot act.
    let err = issue_punishment(
        &mut directory,
        &mut log,
        &id,
        PunishmentRequest::new(PunishmentKind::Kick, "Steve", "afk"),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        PunishmentError::Directory(DirectoryError::InactiveActor(_))
    ));

    directory.approve_user(&boss_id, &id).unwrap();
    let guide = directory.get(&id).unwrap();
    assert_eq!(guide.rank, Rank::Guide);
    assert_eq!(resolve_screen(Some(guide), true), Screen::Dashboard);
    assert!(visible_sections(Some(guide)).contains(&Section::Messages));

    directory.change_rank(&boss_id, &id, Rank::Moderator).unwrap();
    let record = issue_punishment(
        &mut directory,
        &mut log,
        &id,
        PunishmentRequest::new(PunishmentKind::Mute, "Steve", "Spamming chat")
            .with_duration(PunishmentDuration::new(30, DurationUnit::Minutes)),
    )
    .unwrap();
    assert_eq!(record.duration, Some(30));
    assert_eq!(directory.get(&id).unwrap().total_actions, 1);

    // Website bans need an admin.
    let err = issue_punishment(
        &mut directory,
        &mut log,
        &id,
        PunishmentRequest::new(PunishmentKind::WebsiteBan, "Steve", "Abuse"),
    )
    .unwrap_err();
    assert!(matches!(err, PunishmentError::Permission(_)));
    assert_eq!(log.len(), 1);
}

#[test]
fn test_moderator_cannot_touch_admin() {
    let boss = founder();
    let boss_id = boss.id.clone();
    let mut directory = StaffDirectory::from_users(vec![boss]);

    let admin = register(&mut directory, "admin");
    let moderator = register(&mut directory, "moder");
    for id in [&admin, &moderator] {
        directory.approve_user(&boss_id, id).unwrap();
    }
    directory.change_rank(&boss_id, &admin, Rank::Admin).unwrap();
    directory.change_rank(&boss_id, &moderator, Rank::Moderator).unwrap();

    // Moderators lack website_ban altogether.
    let err = directory.toggle_ban(&moderator, &admin, "nope").unwrap_err();
    assert!(matches!(
        err,
        DirectoryError::Permission(PermissionError::MissingPermission(_))
    ));

    // Admins can ban moderators but not promote them.
    directory.toggle_ban(&admin, &moderator, "Abuse of power").unwrap();
    let banned = directory.get(&moderator).unwrap();
    assert!(banned.is_banned);
    assert_eq!(resolve_screen(Some(banned), true), Screen::Banned);
    assert!(directory.change_rank(&admin, &moderator, Rank::Guide).is_err());
}

#[test]
fn test_punishment_feed_filters() {
    let boss = founder();
    let boss_id = boss.id.clone();
    let mut directory = StaffDirectory::from_users(vec![boss]);
    let mut log = PunishmentLog::new();

    for (kind, target) in [
        (PunishmentKind::Mute, "Steve"),
        (PunishmentKind::Ban, "Alex"),
        (PunishmentKind::Kick, "Steve"),
    ] {
        issue_punishment(
            &mut directory,
            &mut log,
            &boss_id,
            PunishmentRequest::new(kind, target, "rule break"),
        )
        .unwrap();
    }
    let ban_id = log.records()[1].id.clone();
    let boss = directory.get(&boss_id).unwrap().clone();
    log.set_active(&boss, &ban_id, false).unwrap();

    let now = Utc::now();
    let steve = PunishmentFilter {
        search: "steve".into(),
        ..PunishmentFilter::default()
    };
    assert_eq!(log.filter(&steve, now).len(), 2);

    let active = PunishmentFilter {
        status: StatusFilter::Active,
        ..PunishmentFilter::default()
    };
    assert_eq!(log.filter(&active, now).len(), 2);
    assert_eq!(directory.get(&boss_id).unwrap().total_actions, 3);
}

#[test]
fn test_banned_guide_loses_dashboard_content() {
    let boss = founder();
    let boss_id = boss.id.clone();
    let mut directory = StaffDirectory::from_users(vec![boss]);
    let id = register(&mut directory, "helper");
    directory.approve_user(&boss_id, &id).unwrap();

    let mut reports = ReportBook::new();
    let mut messages = MessageStore::new();
    let mut board = AnnouncementBoard::new();

    let guide = directory.get(&id).unwrap().clone();
    let boss = directory.get(&boss_id).unwrap().clone();
    let report_id = reports
        .file(
            &guide,
            ReportRequest::new(ReportKind::BugReport, "Lag", "Spawn drops to 5 tps"),
        )
        .unwrap()
        .id
        .clone();
    messages.send_direct(&guide, &boss, "filed a lag report").unwrap();
    board
        .post(&boss, AnnouncementDraft::new("Restart", "Tonight at 03:00"))
        .unwrap();
    assert!(board
        .post(&guide, AnnouncementDraft::new("Party", "Now"))
        .is_err());

    directory.toggle_ban(&boss_id, &id, "leaking logs").unwrap();
    let banned = directory.get(&id).unwrap().clone();
    assert!(matches!(
        messages.send_direct(&banned, &boss, "let me back in"),
        Err(ContentError::Permission(PermissionError::InactiveAccount(_)))
    ));
    assert!(matches!(
        messages.send_direct(&boss, &banned, "no"),
        Err(ContentError::InvalidRecipient(_))
    ));

    let report = reports
        .update_status(&boss, &report_id, ReportStatus::Resolved, Some("Pregenerated chunks"))
        .unwrap();
    assert_eq!(report.assigned_to.as_deref(), Some("Founder"));
    assert_eq!(messages.unread_count(&boss_id, &id), 1);
    assert_eq!(board.announcements().len(), 1);
}
