//! # Email Notifications
//!
//! Welcome and admin-alert mails rendered from the account and handed to a
//! [`Mailer`]. SMTP delivery goes through `lettre`; without SMTP settings the
//! log-only mailer records what would have been sent.

use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use super::errors::{NotifyError, NotifyResult};
use super::port::NotificationPort;
use crate::account::Account;

/// SMTP transport settings
#[derive(Debug, Clone, Deserialize)]
pub struct SmtpConfig {
    pub host: String,

    #[serde(default = "default_smtp_port")]
    pub port: u16,

    /// Empty means no authentication (local development relays)
    #[serde(default)]
    pub username: String,

    /// SMTP password (should come from secrets)
    #[serde(default)]
    pub password: String,

    #[serde(default = "default_from_email")]
    pub from_email: String,

    #[serde(default = "default_platform_name")]
    pub from_name: String,
}

/// Notification settings
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationConfig {
    /// Platform name used in subjects and signatures
    #[serde(default = "default_platform_name")]
    pub platform_name: String,

    /// Recipient of new-registration alerts
    #[serde(default = "default_admin_email")]
    pub admin_email: String,

    /// Upper bound the registration waits for both notifications
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// SMTP delivery; log-only when absent
    #[serde(default)]
    pub smtp: Option<SmtpConfig>,
}

fn default_smtp_port() -> u16 {
    587
}
fn default_from_email() -> String {
    "noreply@ourplatform.com".to_string()
}
fn default_platform_name() -> String {
    "OurPlatform".to_string()
}
fn default_admin_email() -> String {
    "admin@ourplatform.com".to_string()
}
fn default_timeout_ms() -> u64 {
    5000
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            platform_name: default_platform_name(),
            admin_email: default_admin_email(),
            timeout_ms: default_timeout_ms(),
            smtp: None,
        }
    }
}

/// Mail transport abstraction
pub trait Mailer: Send + Sync {
    fn send(&self, to: &str, subject: &str, body: &str) -> NotifyResult<()>;
}

/// Mailer that only logs the message
#[derive(Debug, Default)]
pub struct LogMailer;

impl Mailer for LogMailer {
    fn send(&self, to: &str, subject: &str, body: &str) -> NotifyResult<()> {
        let preview: String = body.chars().take(100).collect();
        info!(to = %to, subject = %subject, body_preview = %preview, "EMAIL_SENT");
        Ok(())
    }
}

/// SMTP mailer
pub struct SmtpMailer {
    config: SmtpConfig,
}

impl SmtpMailer {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }
}

impl Mailer for SmtpMailer {
    fn send(&self, to: &str, subject: &str, body: &str) -> NotifyResult<()> {
        use lettre::{
            message::header::ContentType, transport::smtp::authentication::Credentials, Message,
            SmtpTransport, Transport,
        };

        let email = Message::builder()
            .from(
                format!("{} <{}>", self.config.from_name, self.config.from_email)
                    .parse()
                    .map_err(|e| NotifyError::InvalidAddress(format!("from: {}", e)))?,
            )
            .to(to
                .parse()
                .map_err(|e| NotifyError::InvalidAddress(format!("to: {}", e)))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| NotifyError::Transport(format!("Failed to build email: {}", e)))?;

        let mailer = if self.config.username.is_empty() {
            SmtpTransport::builder_dangerous(&self.config.host)
                .port(self.config.port)
                .build()
        } else {
            let creds = Credentials::new(
                self.config.username.clone(),
                self.config.password.clone(),
            );

            SmtpTransport::relay(&self.config.host)
                .map_err(|e| NotifyError::Transport(format!("SMTP relay error: {}", e)))?
                .credentials(creds)
                .port(self.config.port)
                .build()
        };

        mailer
            .send(&email)
            .map_err(|e| NotifyError::Transport(format!("Failed to send email: {}", e)))?;

        Ok(())
    }
}

/// Renders registration mails and sends them through a [`Mailer`]
pub struct EmailNotifier {
    config: NotificationConfig,
    mailer: Arc<dyn Mailer>,
}

impl EmailNotifier {
    pub fn new(config: NotificationConfig, mailer: Arc<dyn Mailer>) -> Self {
        Self { config, mailer }
    }

    /// SMTP mailer when configured, log-only otherwise
    pub fn from_config(config: NotificationConfig) -> Self {
        let mailer: Arc<dyn Mailer> = match config.smtp.clone() {
            Some(smtp) => Arc::new(SmtpMailer::new(smtp)),
            None => Arc::new(LogMailer),
        };
        Self::new(config, mailer)
    }

    fn render_welcome(&self, account: &Account) -> (String, String) {
        let platform = &self.config.platform_name;
        let subject = format!("Welcome to {}!", platform);
        let body = format!(
            "Hi {},\n\n\
            Welcome to {}! We are glad to have you.\n\n\
            Your account details:\n\
            Email: {}\n\
            Registered: {}\n\n\
            Best regards,\n\
            {} Team",
            sanitize(account.name()),
            platform,
            account.email(),
            account.registered_at_display(),
            platform
        );
        (subject, body)
    }

    fn render_admin_alert(&self, account: &Account) -> (String, String) {
        let subject = "New User Registration".to_string();
        let body = format!(
            "A new user has registered:\n\n\
            Name: {}\n\
            Email: {}\n\
            Registration Time: {}",
            sanitize(account.name()),
            account.email(),
            account.registered_at_display()
        );
        (subject, body)
    }
}

impl NotificationPort for EmailNotifier {
    fn send_welcome(&self, account: &Account) -> NotifyResult<()> {
        let (subject, body) = self.render_welcome(account);
        self.mailer.send(account.email(), &subject, &body)?;
        info!(recipient = %account.email(), subject = %subject, "Welcome email sent");
        Ok(())
    }

    fn send_admin_alert(&self, account: &Account) -> NotifyResult<()> {
        let (subject, body) = self.render_admin_alert(account);
        self.mailer.send(&self.config.admin_email, &subject, &body)?;
        info!(
            recipient = %self.config.admin_email,
            new_account = %account.email(),
            "Admin notification sent"
        );
        Ok(())
    }
}

/// Strip characters that could break out of a mail body line or header.
fn sanitize(text: &str) -> String {
    text.replace(['\r', '\n', '\t'], " ")
}
