// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Script-aware tokenization.
//!
//! A token is a maximal run of word characters from one script. Two patterns
//! are supported and can be switched independently:
//!
//! - **Latin**: ASCII letters, digits and `_`, letters from Latin-1 Supplement
//!   and Latin Extended-A/B/Additional, and the IAST transliteration letters
//!   (ā ī ū ṛ ṝ ḷ ḹ ṅ ñ ṭ ḍ ṇ ś ṣ ṃ ṁ ḥ)
//! - **Devanagari**: the U+0900..U+097F block minus the danda punctuation
//!
//! A run ends when the script changes, so "agniअग्नि" yields two tokens.
//!
//! # Algorithm
//!
//! 1. NFC-compose (with the `unicode-normalization` feature) so "ā" typed as
//!    `a + U+0304` and as `U+0101` tokenize identically
//! 2. Lowercase
//! 3. Split into same-script runs
//!
//! Term frequency for scoring is deliberately *not* token-based: see
//! [`count_occurrences`].

#[cfg(feature = "unicode-normalization")]
use unicode_normalization::UnicodeNormalization;

use crate::config::TokenizerConfig;

/// IAST letters accepted by the Latin pattern (lower case).
pub const IAST_LETTERS: &[char] = &[
    'ā', 'ī', 'ū', 'ṛ', 'ṝ', 'ḷ', 'ḹ', 'ṅ', 'ñ', 'ṭ', 'ḍ', 'ṇ', 'ś', 'ṣ', 'ṃ', 'ṁ', 'ḥ',
];

/// Which token pattern a character belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    Latin,
    Devanagari,
}

/// Lowercase (and NFC-compose) text the way every scoring path expects it.
#[cfg(feature = "unicode-normalization")]
pub fn prepare(text: &str) -> String {
    text.nfc().collect::<String>().to_lowercase()
}

/// Lowercase only. Assumes input is already composed.
#[cfg(not(feature = "unicode-normalization"))]
pub fn prepare(text: &str) -> String {
    text.to_lowercase()
}

/// Non-overlapping substring occurrences of `term` in `haystack`.
///
/// Not token-boundary aware: "as" matches inside "agnasya". Both arguments
/// are expected to be [`prepare`]d already.
pub fn count_occurrences(haystack: &str, term: &str) -> usize {
    if term.is_empty() {
        return 0;
    }
    haystack.matches(term).count()
}

fn is_latin_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || c == '_'
        || IAST_LETTERS.contains(&c)
        || matches!(c, '\u{0300}'..='\u{036F}')
        || (matches!(c, '\u{00C0}'..='\u{024F}' | '\u{1E00}'..='\u{1EFF}') && c.is_alphabetic())
}

fn is_devanagari_word_char(c: char) -> bool {
    matches!(c, '\u{0900}'..='\u{097F}') && !matches!(c, '\u{0964}' | '\u{0965}' | '\u{0970}')
}

/// Splits prepared text into terms according to the enabled patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tokenizer {
    latin: bool,
    devanagari: bool,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(TokenizerConfig::default())
    }
}

impl Tokenizer {
    pub fn new(config: TokenizerConfig) -> Self {
        Self {
            latin: config.latin,
            devanagari: config.devanagari,
        }
    }

    pub fn script_of(&self, c: char) -> Option<Script> {
        if self.latin && is_latin_word_char(c) {
            Some(Script::Latin)
        } else if self.devanagari && is_devanagari_word_char(c) {
            Some(Script::Devanagari)
        } else {
            None
        }
    }

    /// All tokens of `text` in order, repeats included.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.tokenize_prepared(&prepare(text))
    }

    /// Tokenize text that already went through [`prepare`].
    pub fn tokenize_prepared(&self, prepared: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        let mut current = String::new();
        let mut current_script = None;

        for c in prepared.chars() {
            let script = self.script_of(c);
            if script != current_script && !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            if script.is_some() {
                current.push(c);
            }
            current_script = script;
        }
        if !current.is_empty() {
            tokens.push(current);
        }
        tokens
    }

    /// Distinct tokens in first-seen order.
    pub fn unique_terms(&self, text: &str) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        self.tokenize(text)
            .into_iter()
            .filter(|t| seen.insert(t.clone()))
            .collect()
    }
}
