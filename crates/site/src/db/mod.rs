//! `PostgreSQL` access for the site.
//!
//! # Database: `iyp_site`
//!
//! The site keeps no business data of its own. The database only backs the
//! durable session storage:
//!
//! ## Tables
//!
//! - `tower_sessions.session` - Visitor sessions (created by
//!   [`PostgresStore::migrate`](tower_sessions_sqlx_store::PostgresStore::migrate)
//!   on startup)

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Maximum pooled connections. Session reads and writes are the only queries.
const MAX_CONNECTIONS: u32 = 5;

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Create a pool that connects on first use.
///
/// Used by tests and tooling that build the router without touching the
/// database.
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL cannot be parsed.
pub fn create_lazy_pool(database_url: &SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(Duration::from_secs(2))
        .connect_lazy(database_url.expose_secret())
}

/// Check that the database answers a trivial query.
pub async fn is_reachable(pool: &PgPool) -> bool {
    sqlx::query("SELECT 1").fetch_one(pool).await.is_ok()
}
