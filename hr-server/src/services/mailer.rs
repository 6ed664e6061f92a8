//! Mail transport
//!
//! [`Mailer`] hides the relay behind a trait so the server can run against
//! a recording double.

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use parking_lot::Mutex;
use thiserror::Error;

use crate::db::models::EmailSettings;

const SMTP_TIMEOUT: Duration = Duration::from_secs(20);

/// Implicit TLS port; every other port upgrades with STARTTLS
const SMTPS_PORT: u16 = 465;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Invalid address: {0}")]
    Address(String),

    #[error("Failed to build message: {0}")]
    Build(String),

    #[error("SMTP transport error: {0}")]
    Transport(String),
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, settings: &EmailSettings, message: &EmailMessage) -> Result<(), MailError>;
}

/// Authenticated, TLS-encrypted SMTP relay
#[derive(Debug, Clone, Copy, Default)]
pub struct SmtpMailer;

impl SmtpMailer {
    fn transport(settings: &EmailSettings) -> Result<AsyncSmtpTransport<Tokio1Executor>, MailError> {
        let builder = if settings.smtp_port == SMTPS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.smtp_host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.smtp_host)
        }
        .map_err(|e| MailError::Transport(e.to_string()))?;

        Ok(builder
            .port(settings.smtp_port)
            .credentials(Credentials::new(
                settings.smtp_username.clone(),
                settings.smtp_password.clone(),
            ))
            .timeout(Some(SMTP_TIMEOUT))
            .build())
    }
}

fn build_message(settings: &EmailSettings, message: &EmailMessage) -> Result<Message, MailError> {
    let from_email: Address = settings
        .from_email
        .parse()
        .map_err(|e: lettre::address::AddressError| MailError::Address(e.to_string()))?;
    let from = Mailbox::new(Some(settings.from_name.clone()), from_email);
    let to: Mailbox = message
        .to
        .parse()
        .map_err(|e: lettre::address::AddressError| MailError::Address(e.to_string()))?;

    Message::builder()
        .from(from)
        .to(to)
        .subject(message.subject.clone())
        .header(ContentType::TEXT_PLAIN)
        .body(message.body.clone())
        .map_err(|e| MailError::Build(e.to_string()))
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, settings: &EmailSettings, message: &EmailMessage) -> Result<(), MailError> {
        let email = build_message(settings, message)?;
        Self::transport(settings)?
            .send(email)
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;
        Ok(())
    }
}

/// In-memory mailer that records every message
///
/// `fail_with` makes every send fail, for exercising retry paths.
#[derive(Debug, Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<EmailMessage>>,
    failure: Mutex<Option<String>>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_with(&self, error: impl Into<String>) {
        *self.failure.lock() = Some(error.into());
    }

    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, _settings: &EmailSettings, message: &EmailMessage) -> Result<(), MailError> {
        if let Some(err) = self.failure.lock().clone() {
            return Err(MailError::Transport(err));
        }
        self.sent.lock().push(message.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> EmailSettings {
        EmailSettings {
            id: String::new(),
            smtp_host: "smtp.example.com".into(),
            smtp_port: 587,
            smtp_username: "mailer".into(),
            smtp_password: "secret".into(),
            from_email: "hr@example.com".into(),
            from_name: "Acme HR".into(),
            updated_at: None,
        }
    }

    #[test]
    fn test_build_message() {
        let msg = EmailMessage {
            to: "jane@example.com".into(),
            subject: "Hello".into(),
            body: "Hi Jane".into(),
        };
        assert!(build_message(&settings(), &msg).is_ok());
    }

    #[test]
    fn test_sender_name_with_punctuation() {
        let msg = EmailMessage {
            to: "jane@example.com".into(),
            subject: "Hello".into(),
            body: "Hi Jane".into(),
        };
        for name in ["Acme, Inc.", "Dept. (HR)", "O'Brien <People>"] {
            let settings = EmailSettings {
                from_name: name.into(),
                ..settings()
            };
            let built = build_message(&settings, &msg).unwrap();
            assert_eq!(
                built.envelope().from().map(|a| a.to_string()),
                Some("hr@example.com".to_string())
            );
        }
    }

    #[test]
    fn test_bad_recipient_is_rejected() {
        let msg = EmailMessage {
            to: "not an address".into(),
            subject: "Hello".into(),
            body: "Hi".into(),
        };
        assert!(matches!(
            build_message(&settings(), &msg),
            Err(MailError::Address(_))
        ));
    }

    #[tokio::test]
    async fn test_recording_mailer() {
        let mailer = RecordingMailer::new();
        let msg = EmailMessage {
            to: "a@b.com".into(),
            subject: "s".into(),
            body: "b".into(),
        };
        mailer.send(&settings(), &msg).await.unwrap();
        assert_eq!(mailer.sent(), vec![msg.clone()]);

        mailer.fail_with("relay down");
        assert!(mailer.send(&settings(), &msg).await.is_err());
        assert_eq!(mailer.sent().len(), 1);
    }
}
