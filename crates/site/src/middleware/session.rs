//! Session middleware configuration.
//!
//! Server-side sessions via tower-sessions. Production uses the
//! `PostgreSQL` store; tests plug in `MemoryStore`. The visitor's session is
//! the durable storage behind [`SessionStore`](crate::services::SessionStore).

use tower_sessions::{Expiry, Session, SessionManagerLayer, SessionStore as SessionBackend};

use crate::config::SiteConfig;
use crate::services::auth::{DurableStorage, StorageError};

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "iyp_session";

/// Session expiry time in seconds (30 days of inactivity).
const SESSION_EXPIRY_SECONDS: i64 = 30 * 24 * 60 * 60;

/// Create the session manager layer over any tower-sessions backend.
///
/// # Arguments
///
/// * `store` - Session backend (`PostgresStore` in production)
/// * `config` - Site configuration (for the secure-cookie decision)
#[must_use]
pub fn create_session_layer<B: SessionBackend + Clone>(
    store: B,
    config: &SiteConfig,
) -> SessionManagerLayer<B> {
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

impl From<tower_sessions::session::Error> for StorageError {
    fn from(err: tower_sessions::session::Error) -> Self {
        Self(err.to_string())
    }
}

impl DurableStorage for Session {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(Self::get::<String>(self, key).await?)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Ok(self.insert(key, value).await?)
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.remove_value(key).await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use intune_partner_core::{SessionToken, SubjectId};
    use tower_sessions::MemoryStore;

    use super::*;
    use crate::models::session_keys;
    use crate::services::SessionStore;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_session_round_trip() {
        let session = session();
        DurableStorage::set(&session, session_keys::USER_NAME, "Ada")
            .await
            .unwrap();
        assert_eq!(
            DurableStorage::get(&session, session_keys::USER_NAME)
                .await
                .unwrap()
                .as_deref(),
            Some("Ada")
        );

        DurableStorage::remove(&session, session_keys::USER_NAME)
            .await
            .unwrap();
        assert!(
            DurableStorage::get(&session, session_keys::USER_NAME)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_store_over_session() {
        let session = session();
        let mut store = SessionStore::load(session.clone()).await;
        store
            .login_as_user(SubjectId::new("sub_1"), SessionToken::new("tok_1"), None)
            .await
            .unwrap();

        let reloaded = SessionStore::load(session).await;
        assert_eq!(
            reloaded.record().map(|r| r.subject_id.as_str().to_owned()),
            Some("sub_1".to_owned())
        );
    }
}
