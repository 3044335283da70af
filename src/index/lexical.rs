// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Lexical statistics for BM25 and TF-IDF.
//!
//! Built once per corpus load. Holds, per document, the prepared (composed,
//! lower-cased) text used for substring term frequency, the raw character
//! length, and the set of distinct tokens used for hybrid matching. Globally
//! it holds the document frequency of every token and the average length.
//!
//! Document frequency counts a term once per document. Term frequency at
//! query time is a substring count instead (see
//! [`crate::util::count_occurrences`]), so a query term can have `tf > 0` in
//! a document while its `df` is 0; idf handles that fine.

use std::collections::{HashMap, HashSet};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::debug;

use crate::corpus::{Corpus, Document};
use crate::scoring::{bm25_idf, bm25_term_score, tfidf_idf, Bm25Params};
use crate::types::DocIdx;
use crate::util::{count_occurrences, prepare, Tokenizer};

/// Corpus-wide statistics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LexicalStats {
    /// Mean raw text length in characters.
    pub avg_doc_length: f64,
    /// Number of documents containing each token at least once.
    pub doc_frequency: HashMap<String, usize>,
    pub total_docs: usize,
}

impl LexicalStats {
    pub fn df(&self, term: &str) -> usize {
        self.doc_frequency.get(term).copied().unwrap_or(0)
    }
}

/// Precomputed view of one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocEntry {
    /// Prepared `text`.
    pub text: String,
    /// Prepared `content`, when present.
    pub content: Option<String>,
    /// Raw `text` length in characters.
    pub length: usize,
    /// Distinct tokens of `text`.
    pub terms: HashSet<String>,
}

impl DocEntry {
    fn build(doc: &Document, tokenizer: &Tokenizer) -> Self {
        let text = prepare(&doc.text);
        let terms = tokenizer.tokenize_prepared(&text).into_iter().collect();
        Self {
            length: doc.text.chars().count(),
            content: doc.content.as_deref().map(prepare),
            text,
            terms,
        }
    }
}

/// Compute the corpus statistics without keeping per-document entries.
pub fn build_statistics(docs: &[Document], tokenizer: &Tokenizer) -> LexicalStats {
    let entries: Vec<DocEntry> = docs.iter().map(|d| DocEntry::build(d, tokenizer)).collect();
    stats_from_entries(&entries)
}

fn stats_from_entries(entries: &[DocEntry]) -> LexicalStats {
    let total_docs = entries.len();
    let mut doc_frequency: HashMap<String, usize> = HashMap::new();
    let mut total_length = 0usize;
    for entry in entries {
        total_length += entry.length;
        for term in &entry.terms {
            *doc_frequency.entry(term.clone()).or_insert(0) += 1;
        }
    }
    let avg_doc_length = if total_docs > 0 {
        total_length as f64 / total_docs as f64
    } else {
        0.0
    };
    LexicalStats {
        avg_doc_length,
        doc_frequency,
        total_docs,
    }
}

/// Statistics plus per-document entries, aligned with corpus positions.
#[derive(Debug, Clone, Default)]
pub struct LexicalIndex {
    stats: LexicalStats,
    entries: Vec<DocEntry>,
    tokenizer: Tokenizer,
}

impl LexicalIndex {
    pub fn build(corpus: &Corpus, tokenizer: Tokenizer) -> Self {
        #[cfg(feature = "parallel")]
        let entries: Vec<DocEntry> = corpus
            .docs()
            .par_iter()
            .map(|d| DocEntry::build(d, &tokenizer))
            .collect();
        #[cfg(not(feature = "parallel"))]
        let entries: Vec<DocEntry> = corpus
            .docs()
            .iter()
            .map(|d| DocEntry::build(d, &tokenizer))
            .collect();

        let stats = stats_from_entries(&entries);
        debug!(
            documents = stats.total_docs,
            vocabulary = stats.doc_frequency.len(),
            avg_doc_length = stats.avg_doc_length,
            "built lexical index"
        );
        Self {
            stats,
            entries,
            tokenizer,
        }
    }

    pub fn stats(&self) -> &LexicalStats {
        &self.stats
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    pub fn entries(&self) -> &[DocEntry] {
        &self.entries
    }

    pub fn entry(&self, idx: DocIdx) -> Option<&DocEntry> {
        self.entries.get(idx.get())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct query tokens in first-seen order.
    pub fn query_terms(&self, query: &str) -> Vec<String> {
        self.tokenizer.unique_terms(query)
    }

    /// BM25 score of every document for the given terms (zeros included).
    pub fn bm25_scores(&self, terms: &[String], params: Bm25Params) -> Vec<f64> {
        let n = self.stats.total_docs;
        let idfs: Vec<f64> = terms
            .iter()
            .map(|t| bm25_idf(n, self.stats.df(t)))
            .collect();
        let avg = self.stats.avg_doc_length;

        self.entries
            .iter()
            .map(|entry| {
                terms
                    .iter()
                    .zip(&idfs)
                    .map(|(term, &idf)| {
                        let tf = count_occurrences(&entry.text, term);
                        bm25_term_score(idf, tf, entry.length, avg, params)
                    })
                    .sum()
            })
            .collect()
    }

    /// TF-IDF score of every document for the given terms (zeros included).
    pub fn tfidf_scores(&self, terms: &[String]) -> Vec<f64> {
        let n = self.stats.total_docs;
        let idfs: Vec<f64> = terms
            .iter()
            .map(|t| tfidf_idf(n, self.stats.df(t)))
            .collect();

        self.entries
            .iter()
            .map(|entry| {
                terms
                    .iter()
                    .zip(&idfs)
                    .map(|(term, &idf)| count_occurrences(&entry.text, term) as f64 * idf)
                    .sum()
            })
            .collect()
    }

    /// Total substring matches of `terms` in one document's text.
    pub fn frequency(&self, idx: DocIdx, terms: &[String]) -> usize {
        self.entry(idx).map_or(0, |entry| {
            terms
                .iter()
                .map(|t| count_occurrences(&entry.text, t))
                .sum()
        })
    }
}
