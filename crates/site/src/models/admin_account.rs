//! Statically configured admin accounts.
//!
//! The list is read once at startup from a JSON file:
//!
//! ```json
//! [
//!   {
//!     "email": "admin@yourintunepartner.com",
//!     "password": "...",
//!     "role": "admin",
//!     "name": "Site Administrator",
//!     "title": "Managing Director"
//!   }
//! ]
//! ```
//!
//! Passwords are compared in plaintext. This is a placeholder strategy for a
//! low-stakes site; a real deployment has to verify credentials server-side
//! against hashed passwords instead.

use std::path::Path;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;

use intune_partner_core::{Email, EmailError, Role};

/// Errors loading the admin account list.
#[derive(Debug, Error)]
pub enum AdminAccountsError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid admin accounts JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid email for admin account #{index}: {source}")]
    InvalidEmail {
        index: usize,
        #[source]
        source: EmailError,
    },

    #[error("admin account #{0} has an empty name or password")]
    MissingField(usize),

    #[error("duplicate admin account email: {0}")]
    DuplicateEmail(String),
}

/// One entry of the JSON file.
#[derive(Deserialize)]
struct AdminAccountEntry {
    email: String,
    password: String,
    #[serde(default = "default_role")]
    role: Role,
    name: String,
    #[serde(default)]
    title: Option<String>,
}

const fn default_role() -> Role {
    Role::Admin
}

/// A configured admin credential.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct AdminAccount {
    /// Login email, matched case-insensitively.
    pub email: Email,
    password: SecretString,
    /// Role granted on login.
    pub role: Role,
    /// Display name granted on login.
    pub name: String,
    /// Job title shown on the dashboard.
    pub title: Option<String>,
}

impl AdminAccount {
    /// Create an account entry.
    #[must_use]
    pub fn new(
        email: Email,
        password: impl Into<String>,
        role: Role,
        name: impl Into<String>,
        title: Option<String>,
    ) -> Self {
        Self {
            email,
            password: SecretString::from(password.into()),
            role,
            name: name.into(),
            title,
        }
    }

    /// Case-insensitive email match with exact password match.
    #[must_use]
    pub fn matches(&self, email: &str, password: &str) -> bool {
        self.email.matches(email) && self.password.expose_secret() == password
    }
}

impl std::fmt::Debug for AdminAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminAccount")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("role", &self.role)
            .field("name", &self.name)
            .field("title", &self.title)
            .finish()
    }
}

/// The admin credential list.
#[derive(Debug, Clone, Default)]
pub struct AdminDirectory {
    accounts: Vec<AdminAccount>,
}

impl AdminDirectory {
    /// Build a directory from already-validated accounts.
    #[must_use]
    pub const fn new(accounts: Vec<AdminAccount>) -> Self {
        Self { accounts }
    }

    /// Load and validate the list from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or an entry is invalid.
    pub fn load(path: &Path) -> Result<Self, AdminAccountsError> {
        let raw = std::fs::read_to_string(path).map_err(|source| AdminAccountsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Parse and validate the list from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error on malformed JSON, an invalid email, an empty name or
    /// password, or two entries sharing an email (ignoring case).
    pub fn from_json(raw: &str) -> Result<Self, AdminAccountsError> {
        let entries: Vec<AdminAccountEntry> = serde_json::from_str(raw)?;
        let mut accounts: Vec<AdminAccount> = Vec::with_capacity(entries.len());

        for (index, entry) in entries.into_iter().enumerate() {
            let email = Email::parse(&entry.email)
                .map_err(|source| AdminAccountsError::InvalidEmail { index, source })?;

            if entry.name.trim().is_empty() || entry.password.is_empty() {
                return Err(AdminAccountsError::MissingField(index));
            }

            if accounts.iter().any(|a| a.email.matches(email.as_str())) {
                return Err(AdminAccountsError::DuplicateEmail(email.into_inner()));
            }

            accounts.push(AdminAccount::new(
                email,
                entry.password,
                entry.role,
                entry.name,
                entry.title.filter(|t| !t.trim().is_empty()),
            ));
        }

        Ok(Self { accounts })
    }

    /// Find the account matching an email (any casing) and exact password.
    #[must_use]
    pub fn find(&self, email: &str, password: &str) -> Option<&AdminAccount> {
        self.accounts.iter().find(|a| a.matches(email, password))
    }

    /// Number of configured accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether no accounts are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Iterate over the configured accounts.
    pub fn iter(&self) -> impl Iterator<Item = &AdminAccount> {
        self.accounts.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const ACCOUNTS: &str = r#"[
        {"email": "admin@example.com", "password": "secret", "role": "admin", "name": "Ada"},
        {"email": "ops@example.com", "password": "Hunter2", "name": "Grace", "title": "Operations Lead"},
        {"email": "josé@example.com", "password": "Olé-2024", "name": " José Ortega "}
    ]"#;

    #[test]
    fn test_from_json() {
        let directory = AdminDirectory::from_json(ACCOUNTS).unwrap();
        assert_eq!(directory.len(), 3);

        let grace = directory.find("ops@example.com", "Hunter2").unwrap();
        assert_eq!(grace.role, Role::Admin);
        assert_eq!(grace.title.as_deref(), Some("Operations Lead"));
    }

    #[test]
    fn test_find_ignores_email_case() {
        let directory = AdminDirectory::from_json(ACCOUNTS).unwrap();
        let ada = directory.find("Admin@Example.com", "secret").unwrap();
        assert_eq!(ada.name, "Ada");

        let jose = directory.find("JOSÉ@EXAMPLE.COM", "Olé-2024").unwrap();
        assert!(jose.email.matches("josé@example.com"));
    }

    #[test]
    fn test_name_kept_verbatim() {
        let directory = AdminDirectory::from_json(ACCOUNTS).unwrap();
        let jose = directory.find("josé@example.com", "Olé-2024").unwrap();
        assert_eq!(jose.name, " José Ortega ");
    }

    #[test]
    fn test_duplicate_non_ascii_email_rejected() {
        let result = AdminDirectory::from_json(
            r#"[
                {"email": "josé@example.com", "password": "x", "name": "A"},
                {"email": "JOSÉ@example.com", "password": "y", "name": "B"}
            ]"#,
        );
        assert!(matches!(result, Err(AdminAccountsError::DuplicateEmail(_))));
    }

    #[test]
    fn test_find_password_is_case_sensitive() {
        let directory = AdminDirectory::from_json(ACCOUNTS).unwrap();
        assert!(directory.find("admin@example.com", "Secret").is_none());
        assert!(directory.find("ops@example.com", "hunter2").is_none());
    }

    #[test]
    fn test_find_unknown_email() {
        let directory = AdminDirectory::from_json(ACCOUNTS).unwrap();
        assert!(directory.find("nobody@example.com", "secret").is_none());
    }

    #[test]
    fn test_invalid_email_rejected() {
        let result = AdminDirectory::from_json(
            r#"[{"email": "not-an-email", "password": "x", "name": "X"}]"#,
        );
        assert!(matches!(
            result,
            Err(AdminAccountsError::InvalidEmail { index: 0, .. })
        ));
    }

    #[test]
    fn test_empty_password_rejected() {
        let result =
            AdminDirectory::from_json(r#"[{"email": "a@example.com", "password": "", "name": "A"}]"#);
        assert!(matches!(result, Err(AdminAccountsError::MissingField(0))));
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let result = AdminDirectory::from_json(
            r#"[
                {"email": "a@example.com", "password": "x", "name": "A"},
                {"email": "A@EXAMPLE.com", "password": "y", "name": "B"}
            ]"#,
        );
        assert!(matches!(result, Err(AdminAccountsError::DuplicateEmail(_))));
    }

    #[test]
    fn test_debug_redacts_password() {
        let directory = AdminDirectory::from_json(ACCOUNTS).unwrap();
        let output = format!("{directory:?}");
        assert!(output.contains("[REDACTED]"));
        assert!(!output.contains("Hunter2"));
    }
}
