// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query-side types shared by every ranking strategy.
//!
//! A search produces [`SearchHit`]s. Each hit carries its final score plus a
//! [`ScoreBreakdown`] explaining where the number came from, and the whole
//! list travels inside a [`SearchOutcome`] that records which path produced it
//! (local strategy, exact label, remote backend, or a fallback after the
//! backend failed).
//!
//! # Invariants
//!
//! - **SearchHit**: `doc.get() < corpus.len()` for the corpus it was produced from.
//! - **SearchOutcome**: hits are sorted by descending score, except remote
//!   outcomes which keep the backend's order.

use serde::{Deserialize, Serialize};

// =============================================================================
// NEWTYPES
// =============================================================================

/// Position of a document inside its [`crate::Corpus`].
///
/// Stable for the lifetime of a corpus snapshot; meaningless across reloads.
/// External callers should use the string id in [`SearchHit::id`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct DocIdx(pub u32);

impl DocIdx {
    /// Create a new DocIdx, validating it's within bounds.
    #[inline]
    pub fn new(idx: usize, num_docs: usize) -> Option<Self> {
        if idx < num_docs {
            Some(DocIdx(idx as u32))
        } else {
            None
        }
    }

    #[inline]
    pub fn get(self) -> usize {
        self.0 as usize
    }
}

impl From<usize> for DocIdx {
    fn from(idx: usize) -> Self {
        DocIdx(idx as u32)
    }
}

// =============================================================================
// STRATEGIES
// =============================================================================

/// Ranking strategy selector for the query surface.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// `tf * ln(N / (df + 1))` summed over query terms.
    Tfidf,
    /// Okapi BM25 with substring term frequency.
    Bm25,
    /// BM25 + cluster bonus + graph proximity among matches.
    #[default]
    Hybrid,
    /// Whole-query substring filter ordered by static importance.
    Importance,
}

impl Strategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Tfidf => "tfidf",
            Strategy::Bm25 => "bm25",
            Strategy::Hybrid => "hybrid",
            Strategy::Importance => "importance",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// RESULTS
// =============================================================================

/// Per-hit explanation of the score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoreBreakdown {
    /// TF-IDF or plain BM25: the raw summed score.
    Lexical { raw: f64, frequency: usize },
    /// `score = bm25_component + semantic_bonus + graph_score`.
    Hybrid {
        bm25_component: f64,
        semantic_bonus: f64,
        graph_score: f64,
        /// Total substring matches of the raw query terms. Display only.
        frequency: usize,
    },
    /// Substring filter ordered by importance.
    Importance { importance: f64 },
    /// Score as reported by the remote backend, if any.
    Remote { score: Option<f64> },
    /// Exact label match short-circuit.
    ExactLabel,
}

/// A single ranked document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub doc: DocIdx,
    pub id: String,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
    /// Expanded term that made a hybrid hit match (longest first).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_term: Option<String>,
}

/// Which path produced a result list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "path", rename_all = "snake_case")]
pub enum Provenance {
    Local { strategy: Strategy },
    ExactLabel,
    Remote,
    /// The backend failed, timed out or returned nothing usable.
    LocalFallback { strategy: Strategy, reason: String },
}

/// Result of a search that may have involved the remote backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub hits: Vec<SearchHit>,
    pub provenance: Provenance,
    /// Passed through from the backend when it supplied one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rag_summary: Option<String>,
}

impl SearchOutcome {
    pub fn local(hits: Vec<SearchHit>, strategy: Strategy) -> Self {
        Self {
            hits,
            provenance: Provenance::Local { strategy },
            rag_summary: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}
