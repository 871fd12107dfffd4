// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Contact Relay
//!
//! Backend for a public contact form. Each submission passes through a
//! fixed pipeline before it is mailed to the site operator:
//!
//! - Per-client fixed-window rate limiting (5 per 15 minutes default)
//! - Field validation (email, phone, message length)
//! - Honeypot bot trap
//! - Shared-secret `x-api-key` gate
//! - Heuristic spam scoring over a weighted rule table
//! - Notification by SMTP with HTML and plain-text parts

pub mod access;
pub mod classifier;
pub mod clock;
pub mod config;
pub mod error;
pub mod handlers;
pub mod limiter;
pub mod metrics;
pub mod notify;
pub mod submission;
pub mod trap;
pub mod validator;

pub use classifier::{Classification, SpamClassifier};
pub use config::Config;
pub use error::Rejection;
pub use handlers::{router, AppState};
pub use limiter::{RateLimitResult, RateLimiter};
pub use notify::{MailTransport, Notifier, SmtpMailer};
pub use submission::{Submission, SubmissionForm};
pub use validator::{FieldValidator, ValidationResult};
