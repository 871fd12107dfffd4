// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Heuristic spam classifier.
//!
//! Scores a submission against a table of weighted rules and rejects it
//! when the total reaches the threshold. Weak signals add up: a message
//! that avoids every strong phrase can still be rejected on a combination
//! of capitals, links and gibberish.

pub mod gibberish;
pub mod rules;

pub use rules::{default_rules, Check, Hit, Rule, ScanInput};

use crate::config::SpamConfig;
use crate::submission::Submission;
use tracing::debug;

/// Outcome of classifying one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Sum of the weights of every rule that fired
    pub score: u32,
    /// Labels of the fired rules, in table order
    pub reasons: Vec<String>,
    /// Whether the score stayed below the threshold
    pub accepted: bool,
}

/// Rule-table spam classifier.
pub struct SpamClassifier {
    rules: Vec<Rule>,
    threshold: u32,
}

impl SpamClassifier {
    /// Classifier with the built-in rule table.
    pub fn new(config: &SpamConfig) -> Self {
        Self::with_rules(default_rules(config.threshold), config.threshold)
    }

    /// Classifier with an explicit rule table.
    pub fn with_rules(rules: Vec<Rule>, threshold: u32) -> Self {
        Self { rules, threshold }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Score a submission.
    pub fn classify(&self, submission: &Submission) -> Classification {
        let input = ScanInput {
            keyword_text: submission.keyword_text(),
            combined: submission.combined_text(),
            message: &submission.message,
        };

        let hits: Vec<Hit> = self
            .rules
            .iter()
            .filter_map(|rule| rule.evaluate(&input))
            .collect();

        let score = hits.iter().map(|h| h.weight).sum();
        let classification = Classification {
            score,
            reasons: hits.into_iter().map(|h| h.reason).collect(),
            accepted: score < self.threshold,
        };

        debug!(
            score = classification.score,
            threshold = self.threshold,
            accepted = classification.accepted,
            "Classified submission"
        );
        classification
    }
}
