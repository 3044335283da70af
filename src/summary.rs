// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Key-phrase summary of a verse's connections.
//!
//! Collects bigrams (and, around deity names, trigrams) from the texts of
//! every directly connected verse, weights phrases containing an emphasized
//! term double, and reports the top three in title case. Dandas (। ॥) are
//! deleted first, joining whatever touches them. Words are then runs of
//! ASCII letters, apostrophes and Devanagari letters अ-ह; everything else
//! separates them.

use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::corpus::Corpus;

const STOP_WORDS: &[&str] = &[
    "the", "and", "with", "their", "this", "that", "for", "are", "has", "have", "वै", "च", "हि",
    "तु", "एव", "इति", "न", "वा", "यद्", "किम्", "अथ", "स्म",
];

const EMPHASIS_TERMS: &[&str] = &[
    "agni", "indra", "soma", "varuna", "ushas", "vayu", "surya", "ऋषि", "देव", "यज्ञ", "मंत्र",
    "ब्रह्म", "ऋक्", "साम",
];

const MAX_PHRASES: usize = 3;
const DANDAS: [char; 2] = ['।', '॥'];
const DEFAULT_SUBJECT: &str = "These verses";

static WORD_PATTERN: OnceLock<Regex> = OnceLock::new();

fn word_pattern() -> &'static Regex {
    WORD_PATTERN.get_or_init(|| {
        Regex::new(r"[a-z'\x{0905}-\x{0939}]+")
            .unwrap_or_else(|e| unreachable!("word pattern is a valid regex: {e}"))
    })
}

/// Top phrases for one set of texts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionSummary {
    pub subject: String,
    /// Title-cased, best first. At most three.
    pub phrases: Vec<String>,
    /// Number of non-empty texts that went in.
    pub sources: usize,
}

impl fmt::Display for ConnectionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sources == 0 {
            return f.write_str("No summary available");
        }
        if self.phrases.is_empty() {
            return write!(f, "{} share profound Vedic knowledge.", self.subject);
        }
        writeln!(f, "{} focus on:", self.subject)?;
        for phrase in &self.phrases {
            writeln!(f, "• {}", phrase)?;
        }
        f.write_str("Showing interconnected Vedic wisdom.")
    }
}

/// Summarize arbitrary texts under a subject label.
pub fn summarize_texts<S: AsRef<str>>(texts: &[S], subject: Option<&str>) -> ConnectionSummary {
    let subject = subject
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(DEFAULT_SUBJECT)
        .to_string();
    let texts: Vec<&str> = texts
        .iter()
        .map(AsRef::as_ref)
        .filter(|t| !t.is_empty())
        .collect();

    let stop: HashSet<&str> = STOP_WORDS.iter().copied().collect();
    let emphasis: HashSet<&str> = EMPHASIS_TERMS.iter().copied().collect();

    let mut phrases: VecDeque<String> = VecDeque::new();
    for text in &texts {
        let lowered = text.to_lowercase().replace(DANDAS, "");
        let words: Vec<&str> = word_pattern()
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .collect();

        for i in 0..words.len().saturating_sub(1) {
            if stop.contains(words[i]) {
                continue;
            }
            if !stop.contains(words[i + 1]) {
                let phrase = format!("{} {}", words[i], words[i + 1]);
                if emphasis.contains(words[i]) || emphasis.contains(words[i + 1]) {
                    phrases.push_front(phrase);
                } else {
                    phrases.push_back(phrase);
                }
            }
            if i + 2 < words.len()
                && !stop.contains(words[i + 2])
                && words[i..i + 3].iter().any(|w| emphasis.contains(w))
            {
                phrases.push_front(words[i..i + 3].join(" "));
            }
        }
    }

    // Accumulate weights in first-seen order so the stable sort breaks ties by it.
    let mut order: Vec<(String, usize)> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();
    for phrase in phrases {
        let weight = if phrase.split(' ').any(|w| emphasis.contains(w)) {
            2
        } else {
            1
        };
        match slots.get(&phrase) {
            Some(&slot) => order[slot].1 += weight,
            None => {
                slots.insert(phrase.clone(), order.len());
                order.push((phrase, weight));
            }
        }
    }
    order.sort_by(|a, b| {
        b.1.cmp(&a.1)
            .then_with(|| b.0.chars().count().cmp(&a.0.chars().count()))
    });

    ConnectionSummary {
        subject,
        phrases: order
            .into_iter()
            .take(MAX_PHRASES)
            .map(|(phrase, _)| title_case(&phrase))
            .collect(),
        sources: texts.len(),
    }
}

/// Summarize the texts of every verse directly connected to `id`.
///
/// `None` when `id` is not in the corpus.
pub fn summarize_connections(corpus: &Corpus, id: &str) -> Option<ConnectionSummary> {
    let doc = corpus.by_id(id)?;
    let texts: Vec<&str> = corpus
        .connections(id)
        .iter()
        .filter_map(|c| corpus.get(c.doc))
        .map(|d| d.text.as_str())
        .collect();
    let subject = (!doc.name.trim().is_empty()).then(|| corpus.names().clean(&doc.name));
    Some(summarize_texts(&texts, subject.as_deref()))
}

fn title_case(phrase: &str) -> String {
    phrase
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
