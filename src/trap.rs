// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Honeypot bot trap.
//!
//! The public form renders a `honeypot` input that is hidden from people.
//! Scripts that fill every field populate it and are turned away.

use crate::submission::Submission;
use tracing::debug;

/// Name of the hidden form field.
pub const HONEYPOT_FIELD: &str = "honeypot";

/// Whether the submission tripped the honeypot.
pub fn is_trapped(submission: &Submission) -> bool {
    let trapped = submission
        .honeypot
        .as_deref()
        .is_some_and(|v| !v.trim().is_empty());
    if trapped {
        debug!(field = HONEYPOT_FIELD, "Honeypot field populated");
    }
    trapped
}
