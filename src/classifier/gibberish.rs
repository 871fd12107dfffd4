// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Lexical gibberish detection.
//!
//! Words are reduced to their ASCII letters and lowercased. Each word is
//! scored by several independent sub-rules; a word may trip more than one.

const MIN_WORD_LEN: usize = 3;

const KEYBOARD_WALKS: &[&str] = &[
    "qwerty", "asdf", "zxcv", "hjkl", "uiop", "dfgh", "cvbn", "tyui", "fghj", "vbnm", "abcdef",
    "fedcba",
];

const COMMON_BIGRAMS: &[&str] = &["th", "he", "in", "er", "an", "re", "ed", "nd", "on", "en"];

/// A word flagged as gibberish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordFinding {
    /// The token as it appeared in the message
    pub word: String,
    /// Sum of the sub-rule weights it tripped
    pub weight: u32,
    /// Names of the tripped sub-rules
    pub reasons: Vec<&'static str>,
}

impl std::fmt::Display for WordFinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.word, self.reasons.join(","))
    }
}

/// Score one whitespace-delimited token.
pub fn analyze_word(token: &str) -> Option<WordFinding> {
    let clean: String = token
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    let len = clean.len();
    if len < MIN_WORD_LEN {
        return None;
    }

    let vowels = clean.chars().filter(|c| "aeiou".contains(*c)).count();
    let consonants = len - vowels;

    let mut weight = 0;
    let mut reasons = Vec::new();
    let mut flag = |hit: bool, w: u32, reason: &'static str| {
        if hit {
            weight += w;
            reasons.push(reason);
        }
    };

    flag(len > 15, 3, "very long");
    flag(len > 6 && vowels == 0, 4, "no vowels");
    flag(len > 5 && consonants as f64 > vowels as f64 * 2.5, 2, "consonant heavy");
    flag(
        KEYBOARD_WALKS.iter().any(|walk| clean.contains(walk)),
        3,
        "keyboard pattern",
    );
    flag(has_repeating_block(clean.as_bytes()), 3, "repeating pattern");
    flag(
        len > 8 && !COMMON_BIGRAMS.iter().any(|bigram| clean.contains(bigram)),
        2,
        "no common patterns",
    );

    (weight > 0).then(|| WordFinding {
        word: token.to_string(),
        weight,
        reasons,
    })
}

/// Score every token of a message.
pub fn scan(message: &str) -> Vec<WordFinding> {
    message.split_whitespace().filter_map(analyze_word).collect()
}

/// A block of 2 to 4 bytes occurring three or more times back to back.
fn has_repeating_block(word: &[u8]) -> bool {
    (0..word.len()).any(|start| {
        (2..=4).any(|block| {
            let end = start + block * 3;
            end <= word.len() && {
                let first = &word[start..start + block];
                word[start + block..end].chunks(block).all(|c| c == first)
            }
        })
    })
}
