//! Transactional email relay client.
//!
//! Speaks the EmailJS REST protocol: one `POST` with a service id, a template
//! id, the account's public key and a flat map of template parameters. The
//! relay answers `200 OK` on success. There is no retry.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;
use tracing::instrument;

use crate::config::EmailRelayConfig;

/// Shown for optional contact fields left blank.
const NOT_PROVIDED: &str = "Not provided";

/// Shown when no service was picked on the contact form.
const NOT_SPECIFIED: &str = "Not specified";

/// Errors that can occur when sending through the relay.
#[derive(Debug, Error)]
pub enum EmailRelayError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Relay rejected the message.
    #[error("relay error: {status} - {message}")]
    Api { status: u16, message: String },
}

/// A contact form submission.
#[derive(Debug, Clone, Default)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub service: Option<String>,
    pub message: String,
}

impl ContactMessage {
    fn template_params(&self, to_email: &str) -> BTreeMap<&'static str, String> {
        BTreeMap::from([
            ("from_name", self.name.clone()),
            ("from_email", self.email.clone()),
            ("company", or_default(self.company.as_deref(), NOT_PROVIDED)),
            ("phone", or_default(self.phone.as_deref(), NOT_PROVIDED)),
            ("service", or_default(self.service.as_deref(), NOT_SPECIFIED)),
            ("message", self.message.clone()),
            ("to_email", to_email.to_owned()),
            ("reply_to", self.email.clone()),
        ])
    }
}

fn or_default(value: Option<&str>, default: &str) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
        .to_owned()
}

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: BTreeMap<&'static str, String>,
}

/// Relay client for contact and newsletter mail.
#[derive(Clone)]
pub struct EmailRelayClient {
    client: reqwest::Client,
    config: EmailRelayConfig,
}

impl EmailRelayClient {
    /// Create a new relay client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: EmailRelayConfig) -> Result<Self, EmailRelayError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .build()?;

        Ok(Self { client, config })
    }

    /// Forward a contact form submission to the site inbox.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the relay rejects it.
    #[instrument(skip(self, message), fields(from = %message.email))]
    pub async fn send_contact(&self, message: &ContactMessage) -> Result<(), EmailRelayError> {
        let params = message.template_params(&self.config.to_email);
        self.send(&self.config.contact_template_id, params).await
    }

    /// Notify the site inbox of a newsletter signup.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the relay rejects it.
    #[instrument(skip(self))]
    pub async fn send_newsletter_subscription(
        &self,
        subscriber_email: &str,
        subscribed_on: NaiveDate,
    ) -> Result<(), EmailRelayError> {
        let params = BTreeMap::from([
            ("subscriber_email", subscriber_email.to_owned()),
            ("to_email", self.config.to_email.clone()),
            ("subscription_date", subscribed_on.format("%-m/%-d/%Y").to_string()),
        ]);
        self.send(&self.config.newsletter_template_id, params)
            .await
    }

    async fn send(
        &self,
        template_id: &str,
        template_params: BTreeMap<&'static str, String>,
    ) -> Result<(), EmailRelayError> {
        let body = SendRequest {
            service_id: &self.config.service_id,
            template_id,
            user_id: self.config.public_key(),
            template_params,
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&body)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(EmailRelayError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }
}
