//! Domain models for the site.
//!
//! - [`session`] - The Session Record and its durable storage keys
//! - [`admin_account`] - Statically configured admin credentials

pub mod admin_account;
pub mod session;

pub use admin_account::{AdminAccount, AdminAccountsError, AdminDirectory};
pub use session::{DEFAULT_DISPLAY_NAME, SessionRecord, keys as session_keys};
