// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Notification bodies.

use crate::submission::Submission;
use chrono::{DateTime, Utc};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Escape a value for inclusion in HTML text or attribute content.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn subject(submission: &Submission) -> String {
    format!(
        "New Inquiry from {} - {}",
        submission.name, submission.domain
    )
}

fn fields(submission: &Submission) -> [(&'static str, &str); 5] {
    [
        ("Name", submission.name.as_str()),
        ("Email", submission.email.as_str()),
        ("Phone", submission.phone.as_str()),
        ("College/Institution", submission.institution.as_str()),
        ("Domain of Interest", submission.domain.as_str()),
    ]
}

/// Plain-text part. Values are copied verbatim.
pub fn render_text(submission: &Submission, received_at: DateTime<Utc>) -> String {
    let mut body = String::from("New Contact Form Submission\n\n");
    for (label, value) in fields(submission) {
        body.push_str(&format!("{label}: {value}\n"));
    }
    body.push_str(&format!("\nMessage:\n{}\n\n", submission.message));
    body.push_str(&format!(
        "Submitted on {}\n",
        received_at.format(TIMESTAMP_FORMAT)
    ));
    body
}

/// HTML part. Every submitted value is escaped.
pub fn render_html(submission: &Submission, received_at: DateTime<Utc>) -> String {
    let rows: String = fields(submission)
        .iter()
        .map(|(label, value)| {
            format!(
                "<tr><td style=\"padding:6px 12px;font-weight:bold;\">{label}</td>\
                 <td style=\"padding:6px 12px;\">{}</td></tr>",
                escape_html(value)
            )
        })
        .collect();

    format!(
        "<!DOCTYPE html>\
         <html><body style=\"font-family:Arial,sans-serif;color:#333;\">\
         <h2>New Contact Form Submission</h2>\
         <table style=\"border-collapse:collapse;\">{rows}</table>\
         <h3>Message</h3>\
         <div style=\"white-space:pre-wrap;background:#f7f7f7;padding:12px;\">{}</div>\
         <p style=\"font-size:12px;color:#888;\">Submitted on {}</p>\
         </body></html>",
        escape_html(&submission.message),
        received_at.format(TIMESTAMP_FORMAT)
    )
}
