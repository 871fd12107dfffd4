// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Weighted spam rules.
//!
//! A rule is a `(check, weight, label)` record. Every rule is evaluated on
//! every submission and contributes independently, so the table order never
//! changes the score.

use super::gibberish;
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

static URL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://\S+").expect("URL regex is valid"));

/// Literal phrases that reject a submission on their own.
pub const SPAM_KEYWORDS: &[&str] = &[
    "viagra",
    "buy now",
    "free money",
    "click here",
    "win big",
    "make money fast",
    "get rich quick",
    "guaranteed income",
    "work from home",
    "lose weight fast",
    "miracle cure",
    "limited time offer",
    "act now",
    "call now",
    "order now",
    "risk free",
    "100% free",
    "no questions asked",
    "satisfaction guaranteed",
    "double your income",
    "eliminate debt",
    "refinance",
    "weight loss",
    "as seen on tv",
    "congratulations",
    "you have won",
    "claim your prize",
];

/// Intent patterns: (pattern, weight, label). Digits are ASCII only.
const INTENT_PATTERNS: &[(&str, u32, &str)] = &[
    (r"\$[0-9]+|[0-9]+\s*dollars?|[0-9]+\s*USD", 3, "Money amounts detected"),
    (r"earn.*\$.*daily|daily.*income|passive.*income", 4, "Money earning claims"),
    (r"make.*money.*online|online.*money|money.*making", 4, "Online money making"),
    (r"work.*from.*home|home.*based.*work|remote.*work.*\$", 3, "Work from home with money"),
    (r"guaranteed.*income|guaranteed.*money|guaranteed.*profit", 5, "Guaranteed income claims"),
    (r"no.*experience.*required|no.*skills.*needed", 3, "No experience required"),
    (r"click.*here|visit.*now|act.*now|limited.*time", 2, "Urgent action words"),
    (r"free.*money|free.*cash|free.*gift", 4, "Free money claims"),
    (r"investment.*opportunity|business.*opportunity", 3, "Investment opportunities"),
    (r"lose.*weight.*fast|miracle.*cure|amazing.*results", 3, "Health/miracle claims"),
    (r"congratulations.*won|you.*have.*won|claim.*prize", 5, "Fake prize claims"),
    (r"urgent.*response|immediate.*action|respond.*immediately", 3, "Urgency tactics"),
    (r"call.*now|order.*now|buy.*now", 2, "Sales pressure"),
    (r"risk.*free|no.*risk|100%.*guarantee", 2, "Risk-free claims"),
    (r"multi.*level.*marketing|MLM|pyramid.*scheme", 5, "MLM/Pyramid schemes"),
];

/// Finance, crypto and gambling topics; each matching category adds weight.
const TOPIC_PATTERNS: &[&str] = &[
    r"cryptocurrency|crypto|bitcoin|ethereum|trading",
    r"loan|credit|debt|finance.*help",
    r"casino|gambling|poker|bet",
];

const EMAIL_IN_TEXT: &str = r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b";
const PHONE_IN_TEXT: &str =
    r"(\+?[0-9]{1,3}[-.\s]?)?\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}";

const SPECIAL_CHARS: &str = "!@#$%^&*()_+=[]{};':\"\\|,.<>?";

/// The text views a rule may inspect.
#[derive(Debug, Clone)]
pub struct ScanInput<'a> {
    /// Name, email, message, institution and domain, lowercased
    pub keyword_text: String,
    /// Name, message, institution and domain
    pub combined: String,
    /// The free-text message
    pub message: &'a str,
}

/// What a rule looks for.
#[derive(Debug, Clone)]
pub enum Check {
    /// Any of the phrases occurs in the keyword text.
    Keywords(Vec<String>),
    /// Pattern matches the combined text.
    Combined(Regex),
    /// Pattern matches the message alone.
    Message(Regex),
    /// Share of special characters in the message exceeds `above`.
    SpecialCharRatio { above: f64 },
    /// Share of uppercase letters exceeds `above` for messages longer than `min_chars`.
    UppercaseRatio { above: f64, min_chars: usize },
    /// A character repeated `run` or more times in a row.
    RepeatedChar { run: usize },
    /// Trimmed message shorter than `below` characters.
    ShortMessage { below: usize },
    /// More than `more_than` URLs; the weight applies per URL.
    UrlCount { more_than: usize },
    /// Per-word gibberish analysis; weights come from the word findings.
    Gibberish,
}

/// A weighted rule.
#[derive(Debug, Clone)]
pub struct Rule {
    pub label: String,
    pub weight: u32,
    pub check: Check,
}

/// A rule that fired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub weight: u32,
    pub reason: String,
}

impl Rule {
    pub fn new(label: impl Into<String>, weight: u32, check: Check) -> Self {
        Self {
            label: label.into(),
            weight,
            check,
        }
    }

    /// Case-insensitive pattern over the combined text.
    pub fn pattern(
        label: impl Into<String>,
        weight: u32,
        pattern: &str,
    ) -> Result<Self, regex::Error> {
        Ok(Self::new(label, weight, Check::Combined(case_insensitive(pattern)?)))
    }

    /// Case-insensitive pattern over the message only.
    pub fn message_pattern(
        label: impl Into<String>,
        weight: u32,
        pattern: &str,
    ) -> Result<Self, regex::Error> {
        Ok(Self::new(label, weight, Check::Message(case_insensitive(pattern)?)))
    }

    /// Evaluate the rule; `None` when it does not fire.
    pub fn evaluate(&self, input: &ScanInput<'_>) -> Option<Hit> {
        let message = input.message;
        let fixed = |hit: bool| {
            hit.then(|| Hit {
                weight: self.weight,
                reason: self.label.clone(),
            })
        };

        match &self.check {
            Check::Keywords(phrases) => fixed(
                phrases
                    .iter()
                    .any(|phrase| input.keyword_text.contains(phrase.as_str())),
            ),
            Check::Combined(regex) => fixed(regex.is_match(&input.combined)),
            Check::Message(regex) => fixed(regex.is_match(message)),
            Check::SpecialCharRatio { above } => {
                let special = message.chars().filter(|c| SPECIAL_CHARS.contains(*c)).count();
                fixed(ratio(special, message) > *above)
            }
            Check::UppercaseRatio { above, min_chars } => {
                let upper = message.chars().filter(|c| c.is_ascii_uppercase()).count();
                fixed(message.chars().count() > *min_chars && ratio(upper, message) > *above)
            }
            Check::RepeatedChar { run } => fixed(longest_run(message) >= *run),
            Check::ShortMessage { below } => fixed(message.trim().chars().count() < *below),
            Check::UrlCount { more_than } => {
                let urls = URL_REGEX.find_iter(message).count();
                (urls > *more_than).then(|| Hit {
                    weight: self.weight * urls as u32,
                    reason: format!("{} ({})", self.label, urls),
                })
            }
            Check::Gibberish => {
                let findings = gibberish::scan(message);
                let weight: u32 = findings.iter().map(|f| f.weight).sum();
                (weight > 0).then(|| Hit {
                    weight,
                    reason: format!(
                        "{}: {}",
                        self.label,
                        findings
                            .iter()
                            .map(ToString::to_string)
                            .collect::<Vec<_>>()
                            .join(", ")
                    ),
                })
            }
        }
    }
}

/// The built-in rule table. Keyword hits weigh `keyword_weight`, normally
/// the rejection threshold so a single phrase rejects on its own.
pub fn default_rules(keyword_weight: u32) -> Vec<Rule> {
    let mut rules = vec![Rule::new(
        "Spam keyword detected",
        keyword_weight,
        Check::Keywords(SPAM_KEYWORDS.iter().map(|k| k.to_string()).collect()),
    )];

    rules.extend(INTENT_PATTERNS.iter().map(|(pattern, weight, label)| {
        Rule::pattern(*label, *weight, pattern).expect("built-in intent pattern is valid")
    }));

    rules.extend([
        Rule::new(
            "Excessive special characters",
            2,
            Check::SpecialCharRatio { above: 0.15 },
        ),
        Rule::new(
            "Excessive capitalization",
            3,
            Check::UppercaseRatio {
                above: 0.5,
                min_chars: 10,
            },
        ),
        Rule::new("Repeated characters", 2, Check::RepeatedChar { run: 5 }),
        Rule::new("Multiple URLs", 2, Check::UrlCount { more_than: 1 }),
        Rule::message_pattern("Email addresses in message", 3, EMAIL_IN_TEXT)
            .expect("built-in email pattern is valid"),
        Rule::message_pattern("Phone numbers in message", 2, PHONE_IN_TEXT)
            .expect("built-in phone pattern is valid"),
        Rule::new("Gibberish detected", 0, Check::Gibberish),
        Rule::new("Message too short", 3, Check::ShortMessage { below: 5 }),
    ]);

    rules.extend(TOPIC_PATTERNS.iter().map(|pattern| {
        Rule::pattern("Suspicious domain content", 2, pattern)
            .expect("built-in topic pattern is valid")
    }));

    rules
}

fn case_insensitive(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

fn ratio(count: usize, text: &str) -> f64 {
    let total = text.chars().count();
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

/// Length of the longest run of one UTF-16 code unit, ignoring line
/// terminators. Characters outside the BMP are surrogate pairs and never
/// form a run.
fn longest_run(text: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;
    let mut previous = None;
    for unit in text.encode_utf16() {
        if matches!(unit, 0x0A | 0x0D | 0x2028 | 0x2029) {
            previous = None;
            current = 0;
            continue;
        }
        current = if previous == Some(unit) { current + 1 } else { 1 };
        previous = Some(unit);
        longest = longest.max(current);
    }
    longest
}
