// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Rejections produced by the submission pipeline.
//!
//! Every stage short-circuits with a [`Rejection`]. The `Display` text is for
//! logs; callers only ever see [`Rejection::public_message`], which stays
//! vague for policy rejections so it cannot be used to tune spam.

use crate::access::AccessError;
use crate::config::Environment;
use crate::notify::DispatchError;
use crate::validator::ValidationError;
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Why a submission was not relayed.
#[derive(Debug, Error)]
pub enum Rejection {
    #[error("Rate limit exceeded, retry after {}s", retry_after.as_secs())]
    RateLimited { retry_after: Duration },

    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("Honeypot field populated")]
    BotTrap,

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("Spam score {score} reached threshold")]
    Spam { score: u32, reasons: Vec<String> },

    #[error(transparent)]
    Delivery(#[from] DispatchError),
}

/// JSON envelope shared by every response of the send endpoint.
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<SpamDebug>,
}

/// Classifier diagnostics, only returned outside production.
#[derive(Debug, Serialize)]
pub struct SpamDebug {
    pub score: u32,
    pub reasons: Vec<String>,
}

impl ApiResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            debug: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            debug: None,
        }
    }
}

impl Rejection {
    /// HTTP status for this rejection.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::MalformedBody(_) | Self::Invalid(_) => StatusCode::BAD_REQUEST,
            Self::BotTrap | Self::Spam { .. } => StatusCode::FORBIDDEN,
            Self::Access(AccessError::Missing) => StatusCode::UNAUTHORIZED,
            Self::Access(AccessError::Invalid) => StatusCode::FORBIDDEN,
            Self::Delivery(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to return to the caller.
    pub fn public_message(&self) -> String {
        match self {
            Self::RateLimited { .. } => "Too many requests. Please try again later.".to_string(),
            Self::MalformedBody(_) => "Invalid request body.".to_string(),
            Self::Invalid(err) => err.to_string(),
            Self::BotTrap => "Please try again.".to_string(),
            Self::Access(AccessError::Missing) => "API key missing".to_string(),
            Self::Access(AccessError::Invalid) => "Invalid API key".to_string(),
            Self::Spam { .. } => "Message detected as spam or inappropriate content.".to_string(),
            Self::Delivery(_) => "Something went wrong while sending the email.".to_string(),
        }
    }

    /// Outcome label used for metrics.
    pub fn outcome(&self) -> &'static str {
        match self {
            Self::RateLimited { .. } => "rate_limited",
            Self::MalformedBody(_) | Self::Invalid(_) => "invalid",
            Self::BotTrap => "bot",
            Self::Access(_) => "unauthorized",
            Self::Spam { .. } => "spam",
            Self::Delivery(_) => "delivery_failed",
        }
    }

    /// Render the rejection, attaching spam diagnostics only in development.
    pub fn into_response_for(self, environment: Environment) -> Response {
        let status = self.status();
        let mut body = ApiResponse::failed(self.public_message());

        let retry_after = match &self {
            Self::RateLimited { retry_after } => Some(retry_after.as_secs().max(1)),
            _ => None,
        };

        if let Self::Spam { score, reasons } = self {
            if environment.exposes_debug() {
                body.debug = Some(SpamDebug { score, reasons });
            }
        }

        match retry_after {
            Some(secs) => (
                status,
                [(header::RETRY_AFTER, secs.to_string())],
                Json(body),
            )
                .into_response(),
            None => (status, Json(body)).into_response(),
        }
    }
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        self.into_response_for(Environment::Production)
    }
}
