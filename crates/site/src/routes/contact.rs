//! Contact form route handlers.
//!
//! Submissions are validated and forwarded to the site inbox through the
//! email relay. A successful post redirects back to the form (PRG).

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use intune_partner_core::Email;

use crate::error::add_breadcrumb;
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::routes::layout::Nav;
use crate::services::ContactMessage;
use crate::state::AppState;

/// Services offered in the form's dropdown.
pub const SERVICE_OPTIONS: [&str; 8] = [
    "Intune Management",
    "Purview Services",
    "Endpoint Security",
    "Compliance Management",
    "Device Management",
    "Cloud Migration",
    "Advisory Services",
    "Other",
];

/// Longest accepted message body.
const MAX_MESSAGE_LEN: usize = 5000;

const SEND_FAILED: &str = "Failed to send email. Please try again or contact us directly.";

/// Contact form data.
#[derive(Debug, Default, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub service: String,
    pub message: String,
}

impl ContactForm {
    /// Check required fields and the email shape.
    fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() || self.message.trim().is_empty() {
            return Err("Name, email and message are required.");
        }
        if Email::parse(&self.email).is_err() {
            return Err("Please enter a valid email address.");
        }
        if self.message.len() > MAX_MESSAGE_LEN {
            return Err("Message is too long.");
        }
        if !self.service.is_empty() && !SERVICE_OPTIONS.contains(&self.service.as_str()) {
            return Err("Please pick a service from the list.");
        }
        Ok(())
    }

    fn into_message(self) -> ContactMessage {
        let optional = |value: String| Some(value.trim().to_string()).filter(|v| !v.is_empty());
        ContactMessage {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            company: optional(self.company),
            phone: optional(self.phone),
            service: optional(self.service),
            message: self.message.trim().to_string(),
        }
    }
}

/// Query parameters for the success banner.
#[derive(Debug, Deserialize)]
pub struct ContactQuery {
    pub sent: Option<String>,
}

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub nav: Nav,
    pub form: ContactForm,
    pub services: &'static [&'static str],
    pub error: Option<String>,
    pub sent: bool,
}

/// Display the contact page.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    OptionalAuth(session): OptionalAuth,
    Query(query): Query<ContactQuery>,
) -> impl IntoResponse {
    ContactTemplate {
        nav: Nav::build(&state, session.as_ref()),
        form: ContactForm::default(),
        services: &SERVICE_OPTIONS,
        error: None,
        sent: query.sent.is_some(),
    }
}

/// Handle contact form submission.
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn submit(
    State(state): State<AppState>,
    OptionalAuth(session): OptionalAuth,
    Form(form): Form<ContactForm>,
) -> Response {
    let nav = Nav::build(&state, session.as_ref());
    let rerender = |status: StatusCode, form: ContactForm, error: &str| {
        (
            status,
            ContactTemplate {
                nav: nav.clone(),
                form,
                services: &SERVICE_OPTIONS,
                error: Some(error.to_string()),
                sent: false,
            },
        )
            .into_response()
    };

    if let Err(message) = form.validate() {
        return rerender(StatusCode::UNPROCESSABLE_ENTITY, form, message);
    }

    let Some(relay) = state.email_relay() else {
        tracing::warn!("Contact form received but the email relay is not configured");
        return rerender(StatusCode::SERVICE_UNAVAILABLE, form, SEND_FAILED);
    };

    let message = form.into_message();
    match relay.send_contact(&message).await {
        Ok(()) => {
            tracing::info!(email = %message.email, "Contact message forwarded");
            add_breadcrumb("contact", "Contact form sent", None);
            Redirect::to("/contact?sent=1").into_response()
        }
        Err(e) => {
            tracing::error!(email = %message.email, error = %e, "Failed to forward contact message");
            let form = ContactForm {
                name: message.name,
                email: message.email,
                company: message.company.unwrap_or_default(),
                phone: message.phone.unwrap_or_default(),
                service: message.service.unwrap_or_default(),
                message: message.message,
            };
            rerender(StatusCode::BAD_GATEWAY, form, SEND_FAILED)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ContactForm {
        ContactForm {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            message: "We need help enrolling 200 laptops.".to_string(),
            ..ContactForm::default()
        }
    }

    #[test]
    fn test_valid_form() {
        assert!(form().validate().is_ok());
    }

    #[test]
    fn test_required_fields() {
        let mut missing_name = form();
        missing_name.name = "  ".to_string();
        assert!(missing_name.validate().is_err());

        let mut missing_message = form();
        missing_message.message = String::new();
        assert!(missing_message.validate().is_err());
    }

    #[test]
    fn test_invalid_email() {
        let mut bad = form();
        bad.email = "ada.example.com".to_string();
        assert_eq!(bad.validate(), Err("Please enter a valid email address."));
    }

    #[test]
    fn test_unknown_service_rejected() {
        let mut bad = form();
        bad.service = "Crypto Mining".to_string();
        assert!(bad.validate().is_err());

        let mut good = form();
        good.service = "Device Management".to_string();
        assert!(good.validate().is_ok());
    }

    #[test]
    fn test_blank_optionals_dropped() {
        let mut filled = form();
        filled.company = "   ".to_string();
        filled.phone = "(404) 480-3547".to_string();
        let message = filled.into_message();
        assert!(message.company.is_none());
        assert_eq!(message.phone.as_deref(), Some("(404) 480-3547"));
    }
}
