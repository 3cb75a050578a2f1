// src/digest/mailer.rs
//! Delivery of the digest email.

use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials as SmtpCredentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{error, info};

use super::email::EmailMessage;
use crate::core::config_manager::Credentials;
use crate::error::{DigestError, Result};

/// Gmail relay, implicit TLS.
pub const SMTP_HOST: &str = "smtp.gmail.com";
pub const SMTP_PORT: u16 = 465;

#[allow(async_fn_in_trait)]
pub trait Mailer {
    async fn send(&self, message: &EmailMessage) -> Result<()>;
}

/// Sends over one authenticated SMTP session per message.
pub struct SmtpMailer {
    credentials: Credentials,
    host: String,
    port: u16,
}

impl SmtpMailer {
    pub fn new(credentials: Credentials, host: &str, port: u16) -> Self {
        Self {
            credentials,
            host: host.to_string(),
            port,
        }
    }

    pub fn gmail(credentials: Credentials) -> Self {
        Self::new(credentials, SMTP_HOST, SMTP_PORT)
    }

    pub fn build_message(&self, message: &EmailMessage) -> Result<Message> {
        let from: Mailbox = self
            .credentials
            .sender_address
            .parse()
            .map_err(|e| DigestError::Send(format!("invalid sender address: {}", e)))?;

        let to: Mailbox = message
            .recipient
            .parse()
            .map_err(|e| DigestError::Send(format!("invalid recipient address: {}", e)))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(message.subject.as_str())
            .header(ContentType::TEXT_HTML)
            .body(message.html_body.clone())
            .map_err(|e| DigestError::Send(format!("failed to build email message: {}", e)))
    }

    async fn deliver(&self, message: &EmailMessage) -> Result<()> {
        let email = self.build_message(message)?;

        let creds = SmtpCredentials::new(
            self.credentials.sender_address.clone(),
            self.credentials.sender_secret.clone(),
        );

        // Without the pool feature the connection is closed when `send` returns,
        // whether or not it succeeded.
        let transport: AsyncSmtpTransport<Tokio1Executor> =
            AsyncSmtpTransport::<Tokio1Executor>::relay(&self.host)
                .map_err(|e| DigestError::Send(format!("failed to create SMTP transport: {}", e)))?
                .port(self.port)
                .credentials(creds)
                .build();

        transport
            .send(email)
            .await
            .map_err(|e| DigestError::Send(format!("SMTP delivery failed: {}", e)))?;

        Ok(())
    }
}

impl Mailer for SmtpMailer {
    async fn send(&self, message: &EmailMessage) -> Result<()> {
        match self.deliver(message).await {
            Ok(()) => {
                info!(
                    to = %message.recipient,
                    subject = %message.subject,
                    "Email sent successfully"
                );
                Ok(())
            }
            Err(e) => {
                error!(to = %message.recipient, "Failed to send digest email: {}", e);
                Err(e)
            }
        }
    }
}

/// Logs the digest instead of sending it.
pub struct LogMailer;

impl Mailer for LogMailer {
    async fn send(&self, message: &EmailMessage) -> Result<()> {
        info!(
            to = %message.recipient,
            subject = %message.subject,
            "Dry run, digest not sent"
        );
        info!("{}", message.html_body);
        Ok(())
    }
}
