//! Authentication route handlers.
//!
//! Admin login against the configured account list, logout, and the
//! callback used by the onboarding widget to hand over a validated visitor.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use intune_partner_core::{SessionToken, SubjectId};

use crate::error::{AppError, add_breadcrumb, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::CurrentSession;
use crate::routes::layout::Nav;
use crate::services::AuthError;
use crate::state::AppState;

/// Where visitors land after signing in.
const DASHBOARD_PATH: &str = "/dashboard";

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Query parameters for error/success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Payload posted by the onboarding widget once it has validated a visitor.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallbackPayload {
    pub user_id: String,
    pub token: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub new_user: bool,
}

/// Callback response.
#[derive(Debug, Serialize)]
pub struct CallbackResponse {
    /// Echo of the widget's flag; the client goes to onboarding when set.
    pub new_user: bool,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub nav: Nav,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Map an error code from the query string to a message.
fn error_message(code: &str) -> &'static str {
    match code {
        "missing" => "Please enter both email and password",
        "credentials" => "Invalid credentials. Please check your email and password.",
        _ => "An error occurred. Please try again.",
    }
}

/// Map a success code from the query string to a message.
fn success_message(code: &str) -> Option<&'static str> {
    match code {
        "logged_out" => Some("You have been signed out."),
        _ => None,
    }
}

// =============================================================================
// Routes
// =============================================================================

/// Display the login page.
///
/// Visitors who are already signed in go straight to the dashboard.
#[instrument(skip(state, session))]
pub async fn login_page(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Query(query): Query<MessageQuery>,
) -> Response {
    if session.is_authenticated() {
        return Redirect::to(DASHBOARD_PATH).into_response();
    }

    LoginTemplate {
        nav: Nav::build(&state, None),
        error: query.error.as_deref().map(|c| error_message(c).to_string()),
        success: query
            .success
            .as_deref()
            .and_then(success_message)
            .map(String::from),
    }
    .into_response()
}

/// Handle login form submission.
///
/// Empty fields are rejected before any credential check.
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    CurrentSession(mut session): CurrentSession,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    if form.email.trim().is_empty() || form.password.is_empty() {
        return Ok(Redirect::to("/auth/login?error=missing").into_response());
    }

    match session
        .login_as_admin(state.admins(), &form.email, &form.password)
        .await
    {
        Ok(record) => {
            tracing::info!(subject_id = %record.subject_id, role = %record.role, "Admin signed in");
            set_sentry_user(&record.subject_id, record.email.as_deref());
            add_breadcrumb("auth", "Admin login", Some(&[("role", record.role.as_str())]));
            Ok(Redirect::to(DASHBOARD_PATH).into_response())
        }
        Err(AuthError::InvalidCredentials) => {
            tracing::warn!("Admin login failed: invalid credentials");
            Ok(Redirect::to("/auth/login?error=credentials").into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// Handle logout.
///
/// Safe to call without a session.
#[instrument(skip(session))]
pub async fn logout(CurrentSession(mut session): CurrentSession) -> Result<Response, AppError> {
    let was_signed_in = session.is_authenticated();
    session.logout().await?;

    if was_signed_in {
        tracing::info!("Visitor signed out");
        add_breadcrumb("auth", "Logout", None);
    }
    clear_sentry_user();

    Ok(Redirect::to("/auth/login?success=logged_out").into_response())
}

/// Accept a visitor validated by the onboarding widget.
///
/// The identifiers are trusted as given and the session gets the `user` role.
///
/// # Errors
///
/// Returns 400 if the subject id or token is blank.
#[instrument(skip(session, payload), fields(new_user = payload.new_user))]
pub async fn callback(
    CurrentSession(mut session): CurrentSession,
    Json(payload): Json<CallbackPayload>,
) -> Result<Response, AppError> {
    let subject_id = SubjectId::new(payload.user_id);
    let token = SessionToken::new(payload.token);
    if subject_id.is_blank() || token.is_blank() {
        return Err(AppError::BadRequest(
            "userId and token are required".to_string(),
        ));
    }

    let record = session
        .login_as_user(subject_id, token, payload.email)
        .await?;

    tracing::info!(subject_id = %record.subject_id, "Widget user signed in");
    set_sentry_user(&record.subject_id, record.email.as_deref());

    Ok((
        StatusCode::OK,
        Json(CallbackResponse {
            new_user: payload.new_user,
        }),
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(error_message("missing"), "Please enter both email and password");
        assert_eq!(
            error_message("credentials"),
            "Invalid credentials. Please check your email and password."
        );
        assert_eq!(error_message("???"), "An error occurred. Please try again.");
    }

    #[test]
    fn test_success_messages() {
        assert!(success_message("logged_out").is_some());
        assert!(success_message("<script>").is_none());
    }

    #[test]
    fn test_callback_payload_field_names() {
        let payload: CallbackPayload = serde_json::from_str(
            r#"{"userId": "u-1", "token": "t-1", "newUser": true, "email": "a@example.com"}"#,
        )
        .unwrap_or_else(|e| panic!("payload should parse: {e}"));
        assert_eq!(payload.user_id, "u-1");
        assert!(payload.new_user);
    }
}
