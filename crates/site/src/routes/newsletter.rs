//! Newsletter subscription route handlers.
//!
//! Signups are forwarded to the site inbox through the email relay. HTMX
//! requests get a fragment that replaces the form; plain form posts get a
//! full page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use intune_partner_core::Email;

use crate::error::add_breadcrumb;
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::routes::layout::Nav;
use crate::state::AppState;

/// Newsletter subscription form data.
#[derive(Debug, Deserialize)]
pub struct SubscribeForm {
    pub email: String,
}

/// Success fragment template (replaces the form via HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "newsletter/subscribe_success.html")]
pub struct SubscribeSuccessTemplate {
    pub email: String,
}

/// Error fragment template (replaces the form via HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "newsletter/subscribe_error.html")]
pub struct SubscribeErrorTemplate {
    pub message: String,
    pub email: String,
}

/// Full-page result for non-HTMX posts.
#[derive(Template, WebTemplate)]
#[template(path = "newsletter/result.html")]
pub struct SubscribeResultTemplate {
    pub nav: Nav,
    pub success: bool,
    pub message: String,
    pub email: String,
}

/// Outcome of a signup attempt.
enum Outcome {
    Subscribed(String),
    Failed {
        status: StatusCode,
        message: &'static str,
        email: String,
    },
}

/// Subscribe to the newsletter.
#[instrument(skip(state, session, headers), fields(email = %form.email))]
pub async fn subscribe(
    State(state): State<AppState>,
    OptionalAuth(session): OptionalAuth,
    headers: HeaderMap,
    Form(form): Form<SubscribeForm>,
) -> Response {
    let outcome = process(&state, form.email).await;

    if headers.contains_key("hx-request") {
        return match outcome {
            Outcome::Subscribed(email) => SubscribeSuccessTemplate { email }.into_response(),
            Outcome::Failed {
                status,
                message,
                email,
            } => (
                status,
                SubscribeErrorTemplate {
                    message: message.to_string(),
                    email,
                },
            )
                .into_response(),
        };
    }

    let nav = Nav::build(&state, session.as_ref());
    match outcome {
        Outcome::Subscribed(email) => SubscribeResultTemplate {
            nav,
            success: true,
            message: "Successfully subscribed to our newsletter!".to_string(),
            email,
        }
        .into_response(),
        Outcome::Failed {
            status,
            message,
            email,
        } => (
            status,
            SubscribeResultTemplate {
                nav,
                success: false,
                message: message.to_string(),
                email,
            },
        )
            .into_response(),
    }
}

async fn process(state: &AppState, raw_email: String) -> Outcome {
    let email = match Email::parse(&raw_email) {
        Ok(email) => email.normalized(),
        Err(_) => {
            return Outcome::Failed {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message: "Please enter a valid email address.",
                email: raw_email.trim().to_string(),
            };
        }
    };

    let Some(relay) = state.email_relay() else {
        tracing::warn!("Newsletter signup received but the email relay is not configured");
        return Outcome::Failed {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: "Newsletter signup is temporarily unavailable. Please try again later.",
            email,
        };
    };

    let today = chrono::Local::now().date_naive();
    match relay.send_newsletter_subscription(&email, today).await {
        Ok(()) => {
            tracing::info!(email = %email, "Newsletter subscription forwarded");
            add_breadcrumb("newsletter", "Subscribed", None);
            Outcome::Subscribed(email)
        }
        Err(e) => {
            tracing::warn!(email = %email, error = %e, "Newsletter subscription failed");
            Outcome::Failed {
                status: StatusCode::BAD_GATEWAY,
                message: "Failed to subscribe. Please try again.",
                email,
            }
        }
    }
}
