//! HTTP middleware stack for the site.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Session layer (tower-sessions with `PostgreSQL` store)
//! 5. Security headers (CSP, frame options, etc.)
//!
//! Authorization is not a layer: handlers opt in with the extractors in
//! [`auth`].

pub mod auth;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use auth::{CurrentSession, OptionalAuth, RequireAdmin, RequireAuth};
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
