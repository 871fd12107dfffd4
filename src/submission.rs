// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Contact-form submission types.

use serde::{Deserialize, Serialize};

/// Raw form body as posted by the client.
///
/// Every field is optional on the wire so a missing field is reported by the
/// validator as a 400 rather than failing deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub college_name: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    /// Hidden field; real users never see it.
    #[serde(default)]
    pub honeypot: Option<String>,
}

/// A submission whose required fields are all present and well formed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub institution: String,
    pub domain: String,
    pub message: String,
    pub honeypot: Option<String>,
}

impl Submission {
    /// Text scanned for literal spam phrases (lowercased).
    pub fn keyword_text(&self) -> String {
        format!(
            "{} {} {} {} {}",
            self.name, self.email, self.message, self.institution, self.domain
        )
        .to_lowercase()
    }

    /// Text scanned by intent and topic patterns; the email is excluded.
    pub fn combined_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.name, self.message, self.institution, self.domain
        )
    }
}
