// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Operator notification for accepted submissions.

pub mod template;
pub mod transport;

pub use transport::{MailTransport, OutgoingMail, SmtpMailer, TransportError};

use crate::config::MailConfig;
use crate::submission::Submission;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Mail transport check failed: {0}")]
    Verify(#[source] TransportError),

    #[error("Mail send failed: {0}")]
    Send(#[source] TransportError),

    #[error("Mail delivery timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}

/// Renders submissions and hands them to a [`MailTransport`].
pub struct Notifier {
    transport: Arc<dyn MailTransport>,
    sender: String,
    recipient: String,
    timeout: Duration,
}

impl Notifier {
    pub fn new(transport: Arc<dyn MailTransport>, config: &MailConfig) -> Self {
        Self {
            transport,
            sender: config.username.clone(),
            recipient: config.recipient_address().to_string(),
            timeout: config.timeout(),
        }
    }

    /// Override the bound on verify plus send.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the notification for a submission.
    pub fn compose(&self, submission: &Submission, received_at: DateTime<Utc>) -> OutgoingMail {
        OutgoingMail {
            from_name: submission.name.clone(),
            from: self.sender.clone(),
            to: self.recipient.clone(),
            reply_to: submission.email.clone(),
            subject: template::subject(submission),
            text: template::render_text(submission, received_at),
            html: template::render_html(submission, received_at),
        }
    }

    /// Verify the transport and send the notification, bounded by the
    /// configured timeout. Failure detail is logged here and never returned
    /// to the submitter.
    pub async fn dispatch(
        &self,
        submission: &Submission,
        received_at: DateTime<Utc>,
    ) -> Result<(), DispatchError> {
        let mail = self.compose(submission, received_at);
        let delivery = async {
            self.transport.verify().await.map_err(DispatchError::Verify)?;
            self.transport.send(mail).await.map_err(DispatchError::Send)
        };

        let result = match tokio::time::timeout(self.timeout, delivery).await {
            Ok(result) => result,
            Err(_) => Err(DispatchError::Timeout(self.timeout)),
        };

        match &result {
            Ok(()) => info!(recipient = %self.recipient, "Notification sent"),
            Err(e) => error!(error = %e, recipient = %self.recipient, "Notification failed"),
        }
        result
    }
}
