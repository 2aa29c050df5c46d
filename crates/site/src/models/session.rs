//! Session-related types.
//!
//! The Session Record is the in-memory view of who is using the site. It is
//! persisted as plain string values under the keys in [`keys`].

use serde::Serialize;

use intune_partner_core::{Role, SessionToken, SubjectId};

/// Display name used when none was stored.
pub const DEFAULT_DISPLAY_NAME: &str = "User";

/// The current visitor's identity.
///
/// Immutable after creation; a new login replaces the whole record.
/// `Debug` redacts the session token.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct SessionRecord {
    /// Identifier generated at login time.
    pub subject_id: SubjectId,
    /// Bearer value generated at login time. Only ever checked for presence.
    #[serde(skip)]
    pub session_token: SessionToken,
    /// Email address, when one was supplied.
    pub email: Option<String>,
    /// Role deciding access to admin panels.
    pub role: Role,
    /// Name shown in the header and dashboard.
    pub display_name: String,
    /// Job title, only set for admin logins. Not persisted.
    pub title: Option<String>,
}

impl SessionRecord {
    /// Whether this record carries the admin role.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Label used by the dashboard banner.
    #[must_use]
    pub fn banner_label(&self) -> String {
        if self.is_admin() {
            format!("Admin: {}", self.display_name)
        } else {
            format!("User ID: {}", self.subject_id)
        }
    }
}

impl std::fmt::Debug for SessionRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionRecord")
            .field("subject_id", &self.subject_id)
            .field("session_token", &"[REDACTED]")
            .field("email", &self.email)
            .field("role", &self.role)
            .field("display_name", &self.display_name)
            .field("title", &self.title)
            .finish()
    }
}

/// Durable storage keys for session data.
///
/// Values are plain strings.
pub mod keys {
    /// Session token.
    pub const TOKEN: &str = "token";

    /// Subject id.
    pub const USER_ID: &str = "userId";

    /// Email address (optional).
    pub const USER_EMAIL: &str = "userEmail";

    /// `user` or `admin`.
    pub const USER_ROLE: &str = "userRole";

    /// Display name.
    pub const USER_NAME: &str = "userName";

    /// Legacy key written by older clients. Only removed on logout.
    pub const BROWSER_ID: &str = "browserId";

    /// Every key a session may leave behind.
    pub const ALL: [&str; 6] = [TOKEN, USER_ID, BROWSER_ID, USER_EMAIL, USER_ROLE, USER_NAME];
}
