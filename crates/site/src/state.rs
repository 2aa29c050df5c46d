//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::SiteConfig;
use crate::content::{ContentError, ContentStore};
use crate::models::{AdminAccountsError, AdminDirectory};
use crate::services::{EmailRelayClient, EmailRelayError};

/// Error building application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("failed to load content: {0}")]
    Content(#[from] ContentError),
    #[error("failed to load admin accounts: {0}")]
    AdminAccounts(#[from] AdminAccountsError),
    #[error("failed to build email relay client: {0}")]
    EmailRelay(#[from] EmailRelayError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. It holds no per-visitor data;
/// sessions live in the session layer.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SiteConfig,
    pool: PgPool,
    content: ContentStore,
    admins: AdminDirectory,
    email_relay: Option<EmailRelayClient>,
}

impl AppState {
    /// Create application state from its parts.
    ///
    /// Builds the email relay client when the relay is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the relay HTTP client cannot be built.
    pub fn new(
        config: SiteConfig,
        pool: PgPool,
        content: ContentStore,
        admins: AdminDirectory,
    ) -> Result<Self, StateError> {
        let email_relay = config
            .email_relay
            .clone()
            .map(EmailRelayClient::new)
            .transpose()?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                content,
                admins,
                email_relay,
            }),
        })
    }

    /// Load content and admin accounts from the paths in the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if content or the admin account file cannot be loaded.
    pub fn load(config: SiteConfig, pool: PgPool) -> Result<Self, StateError> {
        let content = ContentStore::load(&config.content_dir)?;
        let admins = AdminDirectory::load(&config.admin_accounts_file)?;
        Self::new(config, pool, content, admins)
    }

    /// Get a reference to the site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the content store.
    #[must_use]
    pub fn content(&self) -> &ContentStore {
        &self.inner.content
    }

    /// Get the configured admin accounts.
    #[must_use]
    pub fn admins(&self) -> &AdminDirectory {
        &self.inner.admins
    }

    /// Get the email relay client, if the relay is configured.
    #[must_use]
    pub fn email_relay(&self) -> Option<&EmailRelayClient> {
        self.inner.email_relay.as_ref()
    }
}
