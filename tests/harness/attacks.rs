// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Abuse patterns for security testing.

/// What each simulated request carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    /// Ordinary enquiries
    Legit,
    /// Messages from the spam corpus
    Spam,
    /// Ordinary enquiries with the hidden field filled
    Honeypot,
}

/// Which credential each request presents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credential {
    Valid,
    Wrong,
    Absent,
}

/// Attack pattern configuration.
#[derive(Debug, Clone)]
pub struct AttackConfig {
    /// Total number of requests to send
    pub total_requests: usize,
    /// Number of unique IPs to simulate
    pub unique_ips: usize,
    pub payload: Payload,
    pub credential: Credential,
}

impl Default for AttackConfig {
    fn default() -> Self {
        Self {
            total_requests: 100,
            unique_ips: 1,
            payload: Payload::Legit,
            credential: Credential::Valid,
        }
    }
}

/// Predefined attack patterns.
impl AttackConfig {
    /// Single IP flood - one client hammering the form.
    pub fn single_ip_flood() -> Self {
        Self {
            total_requests: 100,
            unique_ips: 1,
            ..Default::default()
        }
    }

    /// Distributed flood - many IPs, each exceeding its own window.
    pub fn distributed_flood() -> Self {
        Self {
            total_requests: 1000,
            unique_ips: 100,
            ..Default::default()
        }
    }

    /// Form-filling bots that populate every input.
    pub fn honeypot_bots() -> Self {
        Self {
            total_requests: 50,
            unique_ips: 50,
            payload: Payload::Honeypot,
            ..Default::default()
        }
    }

    /// Spam campaign spread across addresses to stay under the rate limit.
    pub fn spam_campaign() -> Self {
        Self {
            total_requests: 70,
            unique_ips: 70,
            payload: Payload::Spam,
            ..Default::default()
        }
    }

    /// Direct posts that bypass the site and never send the key.
    pub fn keyless_scraper() -> Self {
        Self {
            total_requests: 30,
            unique_ips: 30,
            credential: Credential::Absent,
            ..Default::default()
        }
    }

    /// Guessing the shared secret.
    pub fn key_guessing() -> Self {
        Self {
            total_requests: 30,
            unique_ips: 30,
            credential: Credential::Wrong,
            ..Default::default()
        }
    }

    /// Ordinary traffic well inside every limit.
    pub fn legit_traffic() -> Self {
        Self {
            total_requests: 40,
            unique_ips: 40,
            ..Default::default()
        }
    }
}

/// Expected outcomes for different attack types.
pub struct AttackExpectations {
    /// Maximum requests that may reach the operator's inbox
    pub max_delivered: usize,
    /// Description of expected behavior
    pub description: &'static str,
}

impl AttackConfig {
    /// Get expected outcomes for this attack pattern, given the per-client
    /// request limit.
    pub fn expectations(&self, max_requests: usize) -> AttackExpectations {
        if self.credential != Credential::Valid {
            AttackExpectations {
                max_delivered: 0,
                description: "Every request should fail the access gate",
            }
        } else if self.payload == Payload::Honeypot {
            AttackExpectations {
                max_delivered: 0,
                description: "Every request should trip the honeypot",
            }
        } else if self.payload == Payload::Spam {
            AttackExpectations {
                max_delivered: 0,
                description: "Every message should be classified as spam",
            }
        } else {
            AttackExpectations {
                max_delivered: (self.unique_ips * max_requests).min(self.total_requests),
                description: "Each client should be capped at its window limit",
            }
        }
    }
}
