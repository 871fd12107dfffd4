// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Test data generators for abuse simulation.

use serde_json::{json, Value};
use std::net::{IpAddr, Ipv4Addr};

/// Generate a pool of IP addresses for testing.
pub fn generate_ips(count: usize) -> Vec<IpAddr> {
    (0..count)
        .map(|i| {
            // Use 10.x.x.x private range
            let a = ((i >> 16) & 0xFF) as u8;
            let b = ((i >> 8) & 0xFF) as u8;
            let c = (i & 0xFF) as u8;
            IpAddr::V4(Ipv4Addr::new(10, a, b, c))
        })
        .collect()
}

/// A complete, well-formed form body.
pub fn form(message: &str) -> Value {
    json!({
        "name": "Jane Doe",
        "email": "jane@example.com",
        "phone": "9876543210",
        "collegeName": "MIT",
        "domain": "AI",
        "message": message,
    })
}

/// A well-formed body with the hidden field filled in.
pub fn trapped_form(message: &str, honeypot: &str) -> Value {
    let mut body = form(message);
    body["honeypot"] = json!(honeypot);
    body
}

/// Messages a prospective student might send.
pub fn legit_messages() -> Vec<&'static str> {
    vec![
        "I am interested in your AI program and would love to learn more.",
        "Could you share the admission requirements for the data science course?",
        "Hello, I would like to schedule a campus visit for next month.",
        "Does the robotics department offer part time study options for working adults?",
        "We have questions about financial aid for the coming semester.",
    ]
}

/// Messages that must score at or above the default threshold.
pub fn spam_messages() -> Vec<&'static str> {
    vec![
        "FREE MONEY!!! CLICK HERE NOW www.spam1.com www.spam2.com www.spam3.com",
        "Congratulations, you have won a prize! Reply to claim it.",
        "Earn $300 daily from home, no experience required",
        "Guaranteed profit from our crypto trading desk",
        "Join our MLM and build passive income",
        "Cheap loans and credit repair, see https://a.example and https://b.example",
        "asdfgh qwerty zxcvbn",
    ]
}

/// Values bots commonly drop into every input.
pub fn honeypot_values() -> Vec<&'static str> {
    vec!["http://bot.example", "Acme Corp", "x", "  filled  ", "0"]
}

/// Phone numbers that must never pass validation.
pub fn bad_phones() -> Vec<&'static str> {
    vec![
        "1111111111",
        "0000000000",
        "1234567890",
        "0123456789",
        "123456789",
        "1234567890123456",
        "98765 4321x",
        "98+76543210",
        "call me maybe",
    ]
}

/// Email addresses that must never pass validation.
pub fn bad_emails() -> Vec<&'static str> {
    vec![
        "",
        "plainaddress",
        "@example.com",
        "jane@",
        "jane@example",
        "jane@@example.com",
        "jane doe@example.com",
        "jane@example..com",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_ips() {
        let ips = generate_ips(256);
        assert_eq!(ips.len(), 256);
        // All should be unique
        let unique: std::collections::HashSet<_> = ips.iter().collect();
        assert_eq!(unique.len(), 256);
    }

    #[test]
    fn test_trapped_form_keeps_fields() {
        let body = trapped_form("hello there, world", "x");
        assert_eq!(body["honeypot"], "x");
        assert_eq!(body["collegeName"], "MIT");
    }
}
