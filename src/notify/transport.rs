// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Mail transport port and its SMTP implementation.

use crate::config::MailConfig;
use async_trait::async_trait;
use lettre::{
    message::{Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
    Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use thiserror::Error;
use tracing::debug;

/// A rendered notification ready for a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    /// Display name shown on the From header
    pub from_name: String,
    /// Envelope and header sender address
    pub from: String,
    pub to: String,
    pub reply_to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("Mail server refused the connection check")]
    Unreachable,
}

/// Outbound mail collaborator.
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Connectivity check run before every send.
    async fn verify(&self) -> Result<(), TransportError>;

    async fn send(&self, mail: OutgoingMail) -> Result<(), TransportError>;
}

/// SMTP relay over lettre.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    /// Build a TLS relay transport authenticated with the mail account.
    pub fn new(config: &MailConfig) -> Result<Self, TransportError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)?
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .timeout(Some(config.timeout()))
            .build();
        Ok(Self { transport })
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn verify(&self) -> Result<(), TransportError> {
        if self.transport.test_connection().await? {
            Ok(())
        } else {
            Err(TransportError::Unreachable)
        }
    }

    async fn send(&self, mail: OutgoingMail) -> Result<(), TransportError> {
        let from = Mailbox::new(Some(mail.from_name), mail.from.parse::<Address>()?);
        let message = Message::builder()
            .from(from)
            .reply_to(Mailbox::new(None, mail.reply_to.parse::<Address>()?))
            .to(Mailbox::new(None, mail.to.parse::<Address>()?))
            .subject(mail.subject)
            .multipart(MultiPart::alternative_plain_html(mail.text, mail.html))?;

        let response = self.transport.send(message).await?;
        debug!(code = %response.code(), "SMTP relay accepted message");
        Ok(())
    }
}
