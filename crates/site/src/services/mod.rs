//! Business logic services for the site.
//!
//! # Services
//!
//! - `auth` - Session store and authorization gate
//! - `email_relay` - Contact and newsletter mail through the transactional relay

pub mod auth;
pub mod email_relay;

pub use auth::{AccessDecision, AuthError, DurableStorage, SessionState, SessionStore};
pub use email_relay::{ContactMessage, EmailRelayClient, EmailRelayError};
