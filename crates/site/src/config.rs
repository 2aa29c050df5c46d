//! Site configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SITE_DATABASE_URL` - `PostgreSQL` connection string for session storage
//!   (falls back to `DATABASE_URL`)
//! - `SITE_BASE_URL` - Public URL for the site
//!
//! ## Optional
//! - `SITE_HOST` - Bind address (default: 127.0.0.1)
//! - `SITE_PORT` - Listen port (default: 3000)
//! - `SITE_ADMIN_ACCOUNTS_FILE` - JSON file with the admin credential list
//!   (default: `crates/site/config/admin_accounts.json`)
//! - `SITE_CONTENT_DIR` - Markdown content root (default: `crates/site/content`)
//! - `SITE_STATIC_DIR` - Static assets root (default: `crates/site/static`)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Performance trace sample rate (default: 0.1)
//!
//! ## Email relay (all of service id, public key and recipient enable it)
//! - `EMAIL_RELAY_SERVICE_ID` - Relay service identifier
//! - `EMAIL_RELAY_PUBLIC_KEY` - Relay public key
//! - `EMAIL_RELAY_TO` - Inbox that receives contact and newsletter mail
//! - `EMAIL_RELAY_CONTACT_TEMPLATE` - Contact template (default: `template_contact`)
//! - `EMAIL_RELAY_NEWSLETTER_TEMPLATE` - Newsletter template (default: `template_newsletter`)
//! - `EMAIL_RELAY_URL` - Send endpoint (default: the `EmailJS` REST endpoint)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use url::Url;

/// Default send endpoint of the email relay.
pub const DEFAULT_EMAIL_RELAY_URL: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "your_",
    "changeme",
    "replace",
    "placeholder",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Site application configuration.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the site
    pub base_url: String,
    /// JSON file holding the admin credential list
    pub admin_accounts_file: PathBuf,
    /// Root directory of the markdown content
    pub content_dir: PathBuf,
    /// Root directory of the static assets
    pub static_dir: PathBuf,
    /// Outbound email relay, when configured
    pub email_relay: Option<EmailRelayConfig>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Fraction of errors sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of requests traced in Sentry
    pub sentry_traces_sample_rate: f32,
}

/// Email relay configuration.
///
/// Implements `Debug` manually to redact the public key.
#[derive(Clone)]
pub struct EmailRelayConfig {
    /// Send endpoint URL
    pub endpoint: String,
    /// Relay service identifier
    pub service_id: String,
    /// Relay public key (sent as `user_id`)
    pub public_key: SecretString,
    /// Inbox that receives the forwarded mail
    pub to_email: String,
    /// Template used by the contact form
    pub contact_template_id: String,
    /// Template used by the newsletter signup
    pub newsletter_template_id: String,
}

impl std::fmt::Debug for EmailRelayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailRelayConfig")
            .field("endpoint", &self.endpoint)
            .field("service_id", &self.service_id)
            .field("public_key", &"[REDACTED]")
            .field("to_email", &self.to_email)
            .field("contact_template_id", &self.contact_template_id)
            .field("newsletter_template_id", &self.newsletter_template_id)
            .finish()
    }
}

impl SiteConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid, or
    /// if the email relay key is a placeholder.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("SITE_DATABASE_URL")?;
        let host = get_env_or_default("SITE_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("SITE_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("SITE_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("SITE_PORT".to_string(), e.to_string()))?;
        let base_url = validate_base_url(&get_required_env("SITE_BASE_URL")?)?;

        let email_relay = EmailRelayConfig::from_lookup(get_optional_env)?;

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            admin_accounts_file: get_env_or_default(
                "SITE_ADMIN_ACCOUNTS_FILE",
                "crates/site/config/admin_accounts.json",
            )
            .into(),
            content_dir: get_env_or_default("SITE_CONTENT_DIR", "crates/site/content").into(),
            static_dir: get_env_or_default("SITE_STATIC_DIR", "crates/site/static").into(),
            email_relay,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: get_rate("SENTRY_SAMPLE_RATE", 1.0)?,
            sentry_traces_sample_rate: get_rate("SENTRY_TRACES_SAMPLE_RATE", 0.1)?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the site is served over HTTPS (secure cookies).
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl EmailRelayConfig {
    /// Build the relay configuration from a variable lookup.
    ///
    /// Returns `Ok(None)` unless service id, public key and recipient are all
    /// present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InsecureSecret` if the public key is a
    /// placeholder, or `ConfigError::InvalidEnvVar` for a bad endpoint URL.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Option<Self>, ConfigError> {
        let (Some(service_id), Some(public_key), Some(to_email)) = (
            lookup("EMAIL_RELAY_SERVICE_ID"),
            lookup("EMAIL_RELAY_PUBLIC_KEY"),
            lookup("EMAIL_RELAY_TO"),
        ) else {
            return Ok(None);
        };

        validate_not_placeholder(&public_key, "EMAIL_RELAY_PUBLIC_KEY")?;

        let endpoint = lookup("EMAIL_RELAY_URL")
            .unwrap_or_else(|| DEFAULT_EMAIL_RELAY_URL.to_string());
        Url::parse(&endpoint).map_err(|e| {
            ConfigError::InvalidEnvVar("EMAIL_RELAY_URL".to_string(), e.to_string())
        })?;

        Ok(Some(Self {
            endpoint,
            service_id,
            public_key: SecretString::from(public_key),
            to_email,
            contact_template_id: lookup("EMAIL_RELAY_CONTACT_TEMPLATE")
                .unwrap_or_else(|| "template_contact".to_string()),
            newsletter_template_id: lookup("EMAIL_RELAY_NEWSLETTER_TEMPLATE")
                .unwrap_or_else(|| "template_newsletter".to_string()),
        }))
    }

    /// The public key value for the request body.
    #[must_use]
    pub fn public_key(&self) -> &str {
        self.public_key.expose_secret()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get a sample rate in `0.0..=1.0`.
fn get_rate(key: &str, default: f32) -> Result<f32, ConfigError> {
    let Some(raw) = get_optional_env(key) else {
        return Ok(default);
    };
    parse_rate(&raw).map_err(|msg| ConfigError::InvalidEnvVar(key.to_string(), msg))
}

fn parse_rate(raw: &str) -> Result<f32, String> {
    let rate = raw.trim().parse::<f32>().map_err(|e| e.to_string())?;
    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(format!("must be between 0.0 and 1.0 (got {rate})"))
    }
}

/// Validate that the base URL is an absolute http(s) URL without a trailing slash.
fn validate_base_url(raw: &str) -> Result<String, ConfigError> {
    let url = Url::parse(raw)
        .map_err(|e| ConfigError::InvalidEnvVar("SITE_BASE_URL".to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            "SITE_BASE_URL".to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(raw.trim_end_matches('/').to_string())
}

/// Validate that a secret is not a placeholder.
fn validate_not_placeholder(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_placeholder_rejected() {
        let result = validate_not_placeholder("your_public_key_here", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_changeme_rejected() {
        assert!(validate_not_placeholder("CHANGEME-123", "TEST_VAR").is_err());
    }

    #[test]
    fn test_real_key_accepted() {
        assert!(validate_not_placeholder("Jq8vR2mXkL0pZt4Wd", "TEST_VAR").is_ok());
    }

    #[test]
    fn test_parse_rate() {
        assert!((parse_rate("0.25").unwrap() - 0.25).abs() < f32::EPSILON);
        assert!(parse_rate("1.5").is_err());
        assert!(parse_rate("-0.1").is_err());
        assert!(parse_rate("abc").is_err());
    }

    #[test]
    fn test_validate_base_url() {
        assert_eq!(
            validate_base_url("https://yourintunepartner.com/").unwrap(),
            "https://yourintunepartner.com"
        );
        assert!(validate_base_url("ftp://example.com").is_err());
        assert!(validate_base_url("not a url").is_err());
    }

    #[test]
    fn test_email_relay_disabled_when_incomplete() {
        let lookup = lookup_from(&[("EMAIL_RELAY_SERVICE_ID", "service_iyp")]);
        assert!(EmailRelayConfig::from_lookup(lookup).unwrap().is_none());
    }

    #[test]
    fn test_email_relay_defaults() {
        let lookup = lookup_from(&[
            ("EMAIL_RELAY_SERVICE_ID", "service_iyp"),
            ("EMAIL_RELAY_PUBLIC_KEY", "Jq8vR2mXkL0pZt4Wd"),
            ("EMAIL_RELAY_TO", "sales@yourintunepartner.com"),
        ]);
        let config = EmailRelayConfig::from_lookup(lookup).unwrap().unwrap();

        assert_eq!(config.endpoint, DEFAULT_EMAIL_RELAY_URL);
        assert_eq!(config.contact_template_id, "template_contact");
        assert_eq!(config.newsletter_template_id, "template_newsletter");
        assert_eq!(config.public_key(), "Jq8vR2mXkL0pZt4Wd");
    }

    #[test]
    fn test_email_relay_rejects_placeholder_key() {
        let lookup = lookup_from(&[
            ("EMAIL_RELAY_SERVICE_ID", "service_yourintune"),
            ("EMAIL_RELAY_PUBLIC_KEY", "your_public_key_here"),
            ("EMAIL_RELAY_TO", "sales@yourintunepartner.com"),
        ]);
        assert!(EmailRelayConfig::from_lookup(lookup).is_err());
    }

    #[test]
    fn test_email_relay_debug_redacts_key() {
        let config = EmailRelayConfig {
            endpoint: DEFAULT_EMAIL_RELAY_URL.to_string(),
            service_id: "service_iyp".to_string(),
            public_key: SecretString::from("super_secret_public_key"),
            to_email: "sales@yourintunepartner.com".to_string(),
            contact_template_id: "template_contact".to_string(),
            newsletter_template_id: "template_newsletter".to_string(),
        };

        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("service_iyp"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_public_key"));
    }

    #[test]
    fn test_socket_addr() {
        let config = SiteConfig {
            database_url: SecretString::from("postgres://localhost/test"),
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            admin_accounts_file: PathBuf::from("config/admin_accounts.json"),
            content_dir: PathBuf::from("content"),
            static_dir: PathBuf::from("static"),
            email_relay: None,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
        assert!(!config.is_secure());
    }
}
