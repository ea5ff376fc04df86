//! Which top-level screen a session lands on.

use cc_common::{User, UserStatus};
use serde::Serialize;

/// Top-level dashboard screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    /// Login or registration form.
    Login,
    /// Access code prompt.
    CodeVerification,
    /// Account is banned.
    Banned,
    /// Account awaits approval.
    Pending,
    /// Main dashboard.
    Dashboard,
}

/// Resolve the screen for the current session.
///
/// Checked in order: logged in, access code entered, not banned, approved.
#[must_use]
pub fn resolve_screen(user: Option<&User>, code_verified: bool) -> Screen {
    let Some(user) = user else {
        return Screen::Login;
    };

    if !code_verified {
        Screen::CodeVerification
    } else if user.is_banned {
        Screen::Banned
    } else if user.status == UserStatus::Pending {
        Screen::Pending
    } else {
        Screen::Dashboard
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cc_common::Rank;

    fn approved() -> User {
        let mut user = User::new_pending("alex", "alex@example.com");
        user.rank = Rank::Guide;
        user.status = UserStatus::Approved;
        user
    }

    #[test]
    fn test_no_user_goes_to_login() {
        assert_eq!(resolve_screen(None, true), Screen::Login);
        assert_eq!(resolve_screen(None, false), Screen::Login);
    }

    #[test]
    fn test_code_checked_before_ban() {
        let mut user = approved();
        user.is_banned = true;
        assert_eq!(resolve_screen(Some(&user), false), Screen::CodeVerification);
        assert_eq!(resolve_screen(Some(&user), true), Screen::Banned);
    }

    #[test]
    fn test_ban_checked_before_pending() {
        let mut user = User::new_pending("alex", "alex@example.com");
        user.is_banned = true;
        assert_eq!(resolve_screen(Some(&user), true), Screen::Banned);
    }

    #[test]
    fn test_pending_user() {
        let user = User::new_pending("alex", "alex@example.com");
        assert_eq!(resolve_screen(Some(&user), true), Screen::Pending);
    }

    #[test]
    fn test_approved_user_reaches_dashboard() {
        assert_eq!(resolve_screen(Some(&approved()), true), Screen::Dashboard);
    }
}
