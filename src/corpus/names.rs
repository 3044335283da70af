// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Label normalization.
//!
//! Labels arrive in many shapes: "RV 1.1", "RV RV 1.1", "rv1.1", "1.1". They
//! all mean the same verse. [`NameNormalizer::clean`] folds them into one
//! canonical display form and [`NameNormalizer::key`] into a comparison key.

use regex::Regex;

/// Canonicalizes labels that carry a (possibly repeated) prefix.
#[derive(Debug, Clone)]
pub struct NameNormalizer {
    prefix: String,
    leading: Regex,
    repeated: Regex,
}

impl NameNormalizer {
    pub fn new(prefix: &str) -> Self {
        let escaped = regex::escape(prefix);
        // Escaped input always yields a valid pattern.
        let leading = Regex::new(&format!(r"(?i)^(?:{}\s*)+", escaped))
            .unwrap_or_else(|_| unreachable!("escaped prefix pattern"));
        let repeated = Regex::new(&format!(r"(?:{}\s+)+", escaped))
            .unwrap_or_else(|_| unreachable!("escaped prefix pattern"));
        Self {
            prefix: prefix.to_string(),
            leading,
            repeated,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Canonical display form: exactly one leading `"{prefix} "`.
    ///
    /// An empty prefix disables normalization beyond trimming.
    pub fn clean(&self, name: &str) -> String {
        let trimmed = name.trim();
        if self.prefix.is_empty() {
            return trimmed.to_string();
        }

        let lead = format!("{} ", self.prefix);
        let mut clean = self.leading.replace(trimmed, lead.as_str()).trim().to_string();
        if !clean.starts_with(&lead) {
            clean = format!("{}{}", lead, clean);
        }
        self.repeated
            .replace_all(&clean, lead.as_str())
            .trim()
            .to_string()
    }

    /// Comparison key: cleaned, lower-cased, whitespace removed.
    pub fn key(&self, name: &str) -> String {
        self.clean(name)
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect()
    }
}

impl Default for NameNormalizer {
    fn default() -> Self {
        Self::new("RV")
    }
}
