//! Staff access codes.
//!
//! After logging in, staff must enter one of two shared access codes before
//! the dashboard opens. The codes are plaintext constants compared exactly.

/// Primary access code.
pub const PRIMARY_ACCESS_CODE: &str = "mami!xiosxl@consolecraft";

/// Backup access code.
pub const BACKUP_ACCESS_CODE: &str = "code@consolecraft.com.12.12";

/// Which of the two codes was entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessCode {
    Primary,
    Backup,
}

/// Identify the access code, if `code` is one. No trimming or case folding.
#[must_use]
pub fn match_access_code(code: &str) -> Option<AccessCode> {
    if code == PRIMARY_ACCESS_CODE {
        Some(AccessCode::Primary)
    } else if code == BACKUP_ACCESS_CODE {
        Some(AccessCode::Backup)
    } else {
        None
    }
}

/// Check an entered access code.
#[must_use]
pub fn verify_access_code(code: &str) -> bool {
    match match_access_code(code) {
        Some(kind) => {
            tracing::info!(?kind, "Access code accepted");
            true
        }
        None => {
            tracing::debug!("Access code rejected");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_code_accepted() {
        assert!(verify_access_code("mami!xiosxl@consolecraft"));
        assert_eq!(
            match_access_code(PRIMARY_ACCESS_CODE),
            Some(AccessCode::Primary)
        );
    }

    #[test]
    fn test_backup_code_accepted() {
        assert!(verify_access_code("code@consolecraft.com.12.12"));
        assert_eq!(match_access_code(BACKUP_ACCESS_CODE), Some(AccessCode::Backup));
    }

    #[test]
    fn test_comparison_is_exact() {
        assert!(!verify_access_code(""));
        assert!(!verify_access_code(" mami!xiosxl@consolecraft"));
        assert!(!verify_access_code("MAMI!XIOSXL@CONSOLECRAFT"));
        assert!(!verify_access_code("code@consolecraft.com.12.1"));
    }
}
