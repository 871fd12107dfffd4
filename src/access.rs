// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Shared-secret access gate.

use axum::http::HeaderMap;
use subtle::ConstantTimeEq;
use thiserror::Error;
use tracing::debug;

/// Header carrying the shared secret.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Access failures.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AccessError {
    #[error("API key header missing")]
    Missing,

    #[error("API key does not match")]
    Invalid,
}

/// Checks the `x-api-key` header against the configured secret.
pub struct AccessGate {
    secret: Vec<u8>,
}

impl AccessGate {
    /// Create a gate for `secret`. An empty secret rejects every key.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into().into_bytes(),
        }
    }

    /// Whether a secret has been configured.
    pub fn is_configured(&self) -> bool {
        !self.secret.is_empty()
    }

    /// Check a presented key.
    pub fn check(&self, presented: Option<&str>) -> Result<(), AccessError> {
        let presented = match presented {
            Some(key) if !key.is_empty() => key,
            _ => {
                debug!("API key missing");
                return Err(AccessError::Missing);
            }
        };

        if self.is_configured() && bool::from(presented.as_bytes().ct_eq(&self.secret)) {
            Ok(())
        } else {
            debug!("API key mismatch");
            Err(AccessError::Invalid)
        }
    }

    /// Check the key carried by request headers.
    pub fn check_headers(&self, headers: &HeaderMap) -> Result<(), AccessError> {
        match headers.get(API_KEY_HEADER) {
            None => self.check(None),
            Some(value) if value.is_empty() => self.check(None),
            Some(value) => match value.to_str() {
                Ok(key) => self.check(Some(key)),
                // opaque bytes never match a configured secret
                Err(_) => Err(AccessError::Invalid),
            },
        }
    }
}
