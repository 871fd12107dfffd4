// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Prometheus counters for submission outcomes.

use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

pub const ACCEPTED: &str = "accepted";

/// Submission counters, keyed by pipeline outcome.
pub struct Metrics {
    registry: Registry,
    submissions: IntCounterVec,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();
        let submissions = IntCounterVec::new(
            Opts::new(
                "contact_submissions_total",
                "Contact form submissions by pipeline outcome",
            ),
            &["outcome"],
        )?;
        registry.register(Box::new(submissions.clone()))?;
        Ok(Self {
            registry,
            submissions,
        })
    }

    pub fn record(&self, outcome: &str) {
        self.submissions.with_label_values(&[outcome]).inc();
    }

    /// Current count for one outcome.
    pub fn count(&self, outcome: &str) -> u64 {
        self.submissions.with_label_values(&[outcome]).get()
    }

    /// Render every registered metric in the Prometheus text format.
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
