//! Authentication middleware and extractors.
//!
//! Each extractor builds a [`SessionStore`] over the visitor's server-side
//! session and runs the authorization gate. The gate is evaluated on every
//! request; nothing is cached between navigations.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use intune_partner_core::Role;

use crate::filters;
use crate::models::SessionRecord;
use crate::routes::layout::Nav;
use crate::services::{AccessDecision, SessionStore};
use crate::state::AppState;

/// Login page that gated routes redirect to.
pub const LOGIN_PATH: &str = "/auth/login";

/// In-place denial shown to signed-in visitors without the required role.
#[derive(Template, WebTemplate)]
#[template(path = "admin/access_denied.html")]
pub struct AccessDeniedTemplate {
    pub nav: Nav,
    pub display_name: String,
}

/// Neutral page shown while the session has not been read yet.
#[derive(Template, WebTemplate)]
#[template(path = "loading.html")]
pub struct LoadingTemplate {
    pub nav: Nav,
}

/// Error returned when the gate does not allow the request.
pub enum AuthRejection {
    /// Session layer missing from the stack.
    NoSession,
    /// Session not initialized yet.
    Pending(LoadingTemplate),
    /// Redirect to the login page.
    RedirectToLogin,
    /// Signed in without the required role.
    AccessDenied(AccessDeniedTemplate),
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::NoSession => {
                tracing::error!("Session layer missing from the middleware stack");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
            Self::Pending(page) => page.into_response(),
            Self::RedirectToLogin => Redirect::to(LOGIN_PATH).into_response(),
            Self::AccessDenied(page) => (StatusCode::FORBIDDEN, page).into_response(),
        }
    }
}

/// The visitor's session store, initialized from their session.
///
/// Use this in handlers that mutate the session (login, logout).
pub struct CurrentSession(pub SessionStore<Session>);

impl<S> FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or(AuthRejection::NoSession)?;

        Ok(Self(SessionStore::load(session).await))
    }
}

/// Extractor that optionally gets the signed-in record.
///
/// Never rejects. Used by public pages to render the header.
pub struct OptionalAuth(pub Option<SessionRecord>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let record = match CurrentSession::from_request_parts(parts, state).await {
            Ok(CurrentSession(store)) => store.record().cloned(),
            Err(_) => None,
        };

        Ok(Self(record))
    }
}

/// Extractor that requires a signed-in visitor of any role.
///
/// # Example
///
/// ```rust,ignore
/// async fn dashboard(RequireAuth(record): RequireAuth) -> impl IntoResponse {
///     format!("Welcome back, {}", record.display_name)
/// }
/// ```
pub struct RequireAuth(pub SessionRecord);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        gate(parts, state, None).await.map(Self)
    }
}

/// Extractor that requires a signed-in admin.
///
/// Anonymous visitors are redirected to login; signed-in non-admins get an
/// in-place 403 page.
pub struct RequireAdmin(pub SessionRecord);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        gate(parts, state, Some(Role::Admin)).await.map(Self)
    }
}

async fn gate(
    parts: &mut Parts,
    state: &AppState,
    required_role: Option<Role>,
) -> Result<SessionRecord, AuthRejection> {
    let CurrentSession(store) = CurrentSession::from_request_parts(parts, state).await?;
    let decision = store.authorize(required_role);

    match (decision, store.record()) {
        (AccessDecision::Allow, Some(record)) => Ok(record.clone()),
        (AccessDecision::Pending, _) => Err(AuthRejection::Pending(LoadingTemplate {
            nav: Nav::build(state, None),
        })),
        (AccessDecision::DenyInPlace, Some(record)) => {
            tracing::info!(
                subject_id = %record.subject_id,
                path = %parts.uri.path(),
                "Access denied: admin role required"
            );
            Err(AuthRejection::AccessDenied(AccessDeniedTemplate {
                nav: Nav::build(state, Some(record)),
                display_name: record.display_name.clone(),
            }))
        }
        _ => Err(AuthRejection::RedirectToLogin),
    }
}
