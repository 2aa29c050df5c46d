//! Session store and authorization.
//!
//! A [`SessionStore`] owns the current visitor's [`SessionRecord`] and keeps
//! it in sync with a [`DurableStorage`] backend. Each request builds its own
//! store over the visitor's server-side session, so there is no shared
//! global state.
//!
//! Credentials are matched in plaintext against [`AdminDirectory`] and the
//! session token is never verified. Both are placeholders for a low-stakes
//! site; see `DESIGN.md`.

mod error;
mod gate;
mod storage;

pub use error::AuthError;
pub use gate::{AccessDecision, authorize};
pub use storage::{DurableStorage, MemoryStorage, StorageError};

use tracing::{debug, warn};

use intune_partner_core::{Role, SessionToken, SubjectId};

use crate::models::session::{DEFAULT_DISPLAY_NAME, SessionRecord, keys};
use crate::models::AdminDirectory;

/// Prefix of subject ids minted by admin login.
const ADMIN_SUBJECT_PREFIX: &str = "admin";

/// Prefix of session tokens minted by admin login.
const ADMIN_TOKEN_PREFIX: &str = "admin_token";

/// Where the store is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// `initialize` has not run yet.
    Pending,
    /// Ready, nobody signed in.
    Anonymous,
    /// Ready, signed in.
    Authenticated(SessionRecord),
}

/// Holds the current session and mirrors it to durable storage.
///
/// Every mutation writes storage first and updates memory only once all
/// writes succeeded.
#[derive(Debug)]
pub struct SessionStore<S> {
    storage: S,
    state: SessionState,
}

impl<S: DurableStorage> SessionStore<S> {
    /// Create a store that has not read storage yet.
    #[must_use]
    pub const fn new(storage: S) -> Self {
        Self {
            storage,
            state: SessionState::Pending,
        }
    }

    /// Create a store and run [`initialize`](Self::initialize).
    pub async fn load(storage: S) -> Self {
        let mut store = Self::new(storage);
        store.initialize().await;
        store
    }

    /// Rebuild the in-memory record from durable storage.
    ///
    /// A session exists only if both a token and a subject id are stored and
    /// non-empty. Missing role or name fall back to defaults. Never fails:
    /// read errors are logged and treated as no session.
    pub async fn initialize(&mut self) {
        self.state = match self.read_record().await {
            Ok(Some(record)) => SessionState::Authenticated(record),
            Ok(None) => SessionState::Anonymous,
            Err(e) => {
                warn!(error = %e, "Failed to read session storage, treating as signed out");
                SessionState::Anonymous
            }
        };
    }

    async fn read_record(&self) -> Result<Option<SessionRecord>, StorageError> {
        let token = non_empty(self.storage.get(keys::TOKEN).await?);
        let subject = non_empty(self.storage.get(keys::USER_ID).await?);

        let (Some(token), Some(subject)) = (token, subject) else {
            return Ok(None);
        };

        let role = self
            .storage
            .get(keys::USER_ROLE)
            .await?
            .and_then(|raw| raw.parse::<Role>().ok())
            .unwrap_or_default();

        let display_name = non_empty(self.storage.get(keys::USER_NAME).await?)
            .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_owned());

        let email = non_empty(self.storage.get(keys::USER_EMAIL).await?);

        Ok(Some(SessionRecord {
            subject_id: SubjectId::new(subject),
            session_token: SessionToken::new(token),
            email,
            role,
            display_name,
            title: None,
        }))
    }

    /// Sign in with a configured admin account.
    ///
    /// The email matches in any casing, the password exactly. A fresh subject
    /// id and token are minted on every success.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` when nothing matches; storage
    /// and memory are left untouched. Returns `AuthError::Storage` if a write
    /// fails.
    pub async fn login_as_admin(
        &mut self,
        directory: &AdminDirectory,
        email: &str,
        password: &str,
    ) -> Result<SessionRecord, AuthError> {
        let account = directory
            .find(email, password)
            .ok_or(AuthError::InvalidCredentials)?;

        let record = SessionRecord {
            subject_id: SubjectId::generate(ADMIN_SUBJECT_PREFIX),
            session_token: SessionToken::generate(ADMIN_TOKEN_PREFIX),
            email: Some(account.email.as_str().to_owned()),
            role: account.role,
            display_name: account.name.clone(),
            title: account.title.clone(),
        };

        self.persist(&record).await?;
        debug!(subject_id = %record.subject_id, role = %record.role, "Admin session created");
        self.state = SessionState::Authenticated(record.clone());
        Ok(record)
    }

    /// Sign in with identifiers supplied by an external identity provider.
    ///
    /// The caller is trusted to have validated the visitor. The session always
    /// gets `Role::User` and the default display name.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if a write fails.
    pub async fn login_as_user(
        &mut self,
        subject_id: SubjectId,
        session_token: SessionToken,
        email: Option<String>,
    ) -> Result<SessionRecord, AuthError> {
        let record = SessionRecord {
            subject_id,
            session_token,
            email: non_empty(email),
            role: Role::User,
            display_name: DEFAULT_DISPLAY_NAME.to_owned(),
            title: None,
        };

        self.persist(&record).await?;
        debug!(subject_id = %record.subject_id, "User session created");
        self.state = SessionState::Authenticated(record.clone());
        Ok(record)
    }

    async fn persist(&self, record: &SessionRecord) -> Result<(), StorageError> {
        self.storage
            .set(keys::TOKEN, record.session_token.as_str())
            .await?;
        self.storage
            .set(keys::USER_ID, record.subject_id.as_str())
            .await?;
        match &record.email {
            Some(email) => self.storage.set(keys::USER_EMAIL, email).await?,
            None => self.storage.remove(keys::USER_EMAIL).await?,
        }
        self.storage
            .set(keys::USER_ROLE, record.role.as_str())
            .await?;
        self.storage
            .set(keys::USER_NAME, &record.display_name)
            .await?;
        Ok(())
    }

    /// Remove every session key and forget the record.
    ///
    /// Calling it without a session is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` if a removal fails. Memory is only cleared
    /// once every key is gone.
    pub async fn logout(&mut self) -> Result<(), AuthError> {
        for key in keys::ALL {
            self.storage.remove(key).await?;
        }
        self.state = SessionState::Anonymous;
        Ok(())
    }

    /// Evaluate the authorization gate against the current state.
    #[must_use]
    pub const fn authorize(&self, required_role: Option<Role>) -> AccessDecision {
        authorize(&self.state, required_role)
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    /// The signed-in record, if any.
    #[must_use]
    pub const fn record(&self) -> Option<&SessionRecord> {
        match &self.state {
            SessionState::Authenticated(record) => Some(record),
            SessionState::Pending | SessionState::Anonymous => None,
        }
    }

    /// Whether someone is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.record().is_some()
    }

    /// Whether the signed-in record is an admin.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        match self.record() {
            Some(record) => record.is_admin(),
            None => false,
        }
    }

    /// The backing storage.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
