//! HTTP route handlers for the site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                          - Home page
//! GET  /health                    - Liveness check
//! GET  /health/ready              - Readiness check (database)
//!
//! # Marketing pages
//! GET  /about                     - About page
//! GET  /advisory-services         - Advisory services page
//! GET  /services/:slug            - Service detail
//! GET  /projects/:slug            - Project detail
//!
//! # Blog
//! GET  /blog                      - Post listing with categories
//! GET  /blog/category/:slug       - Posts in a category
//! GET  /blog/:slug                - Post detail
//!
//! # Forms (email relay)
//! GET  /contact                   - Contact form
//! POST /contact                   - Send contact message (PRG)
//! POST /newsletter/subscribe      - Newsletter signup (HTMX fragment or page)
//!
//! # Auth
//! GET  /auth/login                - Login page
//! POST /auth/login                - Admin login
//! POST /auth/logout               - Logout
//! POST /api/auth/callback         - Widget hand-off (JSON)
//!
//! # Signed in (any role)
//! GET  /dashboard                 - Dashboard
//! GET  /onboarding                - Onboarding questionnaire
//! POST /onboarding                - Submit answers
//!
//! # Admin role
//! GET  /admin/system-administration - System administration
//! GET  /admin/global-policies     - Global policies
//! GET  /admin/security-overview   - Security overview
//! ```

pub mod admin;
pub mod auth;
pub mod blog;
pub mod contact;
pub mod dashboard;
pub mod home;
pub mod layout;
pub mod newsletter;
pub mod onboarding;
pub mod pages;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    middleware::from_fn,
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tower_sessions::SessionStore as SessionBackend;

use crate::db;
use crate::middleware::{
    create_session_layer, request_id_middleware, security_headers_middleware,
};
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create the admin panel routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/system-administration", get(admin::system))
        .route("/global-policies", get(admin::policies))
        .route("/security-overview", get(admin::security))
}

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .merge(pages::router())
        .nest("/blog", blog::router())
        .route("/contact", get(contact::show).post(contact::submit))
        .route("/newsletter/subscribe", post(newsletter::subscribe))
        .nest("/auth", auth_routes())
        .route("/api/auth/callback", post(auth::callback))
        .route("/dashboard", get(dashboard::show))
        .route("/onboarding", get(onboarding::show).post(onboarding::submit))
        .nest("/admin", admin_routes())
}

/// Build the full application router.
///
/// `session_store` is any tower-sessions backend: `PostgresStore` in
/// production, `MemoryStore` in tests. Sentry layers are added by the binary.
pub fn build_router<B: SessionBackend + Clone>(state: AppState, session_store: B) -> Router {
    let session_layer = create_session_layer(session_store, state.config());
    let static_dir = state.config().static_dir.clone();

    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes())
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(from_fn(security_headers_middleware))
        .layer(session_layer)
        .layer(from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    if db::is_reachable(state.pool()).await {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}
