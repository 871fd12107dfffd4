// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Contact-form field validator.
//!
//! Implements the structural checks run before any content analysis:
//! - Required field presence
//! - Email address syntax
//! - Phone number format, digit count and obviously fake sequences
//! - Minimum message length

use crate::config::ValidationConfig;
use crate::submission::{Submission, SubmissionForm};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::debug;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    // Non-ASCII letters are allowed in the local part and in domain labels.
    let local = r"[A-Za-z0-9!#$%&'*+/=?^_`{|}~\x{A1}-\x{D7FF}\x{F900}-\x{FDCF}\x{FDF0}-\x{FFEF}-]+";
    let label = r"[A-Za-z0-9\x{A1}-\x{FFFF}](?:[A-Za-z0-9\x{A1}-\x{FFFF}-]{0,61}[A-Za-z0-9\x{A1}-\x{FFFF}])?";
    let tld = r"(?:[A-Za-z\x{A1}-\x{A8}\x{AA}-\x{D7FF}\x{F900}-\x{FDCF}\x{FDF0}-\x{FFEF}]{2,}|xn--[A-Za-z0-9-]{2,})";
    Regex::new(&format!(r"^{local}(?:\.{local})*@(?:{label}\.)+{tld}$"))
        .expect("email regex is valid")
});

/// Longest address accepted (RFC 5321 path limit minus brackets).
const MAX_EMAIL_LEN: usize = 254;

/// Validation error types. The message is shown to the submitter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("All fields are required.")]
    MissingFields,

    #[error("Invalid email format.")]
    InvalidEmail,

    #[error("Invalid phone number format.")]
    InvalidPhoneFormat,

    #[error("Phone number must be between {min}-{max} digits.")]
    PhoneLength { min: usize, max: usize },

    #[error("Please provide a valid phone number.")]
    FakePhone,

    #[error("Message must be at least {min} characters long.")]
    MessageTooShort { min: usize },
}

/// Result of a single validation step.
#[derive(Debug, Clone)]
pub enum ValidationResult {
    /// Field is valid
    Valid,
    /// Field is invalid
    Invalid(ValidationError),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid(e) => Some(e),
        }
    }

    fn into_result(self) -> Result<(), ValidationError> {
        match self {
            ValidationResult::Valid => Ok(()),
            ValidationResult::Invalid(e) => Err(e),
        }
    }
}

/// Contact-form field validator.
pub struct FieldValidator {
    config: ValidationConfig,
}

impl FieldValidator {
    /// Create a new validator with the given configuration.
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate the email address syntax. Surrounding whitespace is invalid.
    pub fn validate_email(&self, email: &str) -> ValidationResult {
        if email.len() <= MAX_EMAIL_LEN && EMAIL_REGEX.is_match(email) {
            ValidationResult::Valid
        } else {
            debug!(email = %email, "Email syntax invalid");
            ValidationResult::Invalid(ValidationError::InvalidEmail)
        }
    }

    /// Validate a phone number.
    ///
    /// Accepts digits with common separators and an optional leading `+`.
    /// After stripping non-digits the number must have a plausible length and
    /// must not be a repeated digit or a counting sequence.
    pub fn validate_phone(&self, phone: &str) -> ValidationResult {
        let phone = phone.trim();
        let well_formed = phone.chars().enumerate().all(|(i, c)| {
            c.is_ascii_digit() || matches!(c, ' ' | '-' | '.' | '(' | ')') || (c == '+' && i == 0)
        });
        if !well_formed {
            debug!(phone = %phone, "Phone contains invalid characters");
            return ValidationResult::Invalid(ValidationError::InvalidPhoneFormat);
        }

        let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.len() < self.config.phone_min_digits || digits.len() > self.config.phone_max_digits
        {
            debug!(digits = digits.len(), "Phone digit count out of range");
            return ValidationResult::Invalid(ValidationError::PhoneLength {
                min: self.config.phone_min_digits,
                max: self.config.phone_max_digits,
            });
        }

        if is_fake_phone(&digits) {
            debug!(phone = %phone, "Phone looks fabricated");
            return ValidationResult::Invalid(ValidationError::FakePhone);
        }

        ValidationResult::Valid
    }

    /// Validate the message length.
    pub fn validate_message(&self, message: &str) -> ValidationResult {
        if message.trim().chars().count() < self.config.min_message_chars {
            debug!("Message too short");
            ValidationResult::Invalid(ValidationError::MessageTooShort {
                min: self.config.min_message_chars,
            })
        } else {
            ValidationResult::Valid
        }
    }

    /// Validate a complete form and produce a [`Submission`].
    pub fn validate(&self, form: &SubmissionForm) -> Result<Submission, ValidationError> {
        let (Some(name), Some(email), Some(phone), Some(institution), Some(domain), Some(message)) = (
            required(&form.name),
            required(&form.email),
            required(&form.phone),
            required(&form.college_name),
            required(&form.domain),
            required(&form.message),
        ) else {
            debug!("Missing required field");
            return Err(ValidationError::MissingFields);
        };

        self.validate_email(email).into_result()?;
        self.validate_phone(phone).into_result()?;
        self.validate_message(message).into_result()?;

        Ok(Submission {
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            institution: institution.to_string(),
            domain: domain.to_string(),
            message: message.to_string(),
            honeypot: form.honeypot.clone(),
        })
    }
}

/// A present, non-blank field value.
fn required(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|v| !v.trim().is_empty())
}

/// Ten or more of one digit, or a number that starts by counting up.
fn is_fake_phone(digits: &str) -> bool {
    let bytes = digits.as_bytes();
    let repeated = bytes.len() >= 10 && bytes.iter().all(|b| *b == bytes[0]);
    repeated || digits.starts_with("0123456789") || digits.starts_with("1234567890")
}
