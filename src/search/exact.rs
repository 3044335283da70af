// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Exact label lookup ("RV 1.1", "rv1.1", "1.1" all name the same verse).

use crate::corpus::Corpus;
use crate::types::{ScoreBreakdown, SearchHit};

/// The single document whose normalized label equals the query's, if any.
pub fn exact_label_hit(corpus: &Corpus, query: &str) -> Option<SearchHit> {
    let idx = corpus.find_by_label(query)?;
    let doc = corpus.get(idx)?;
    Some(SearchHit {
        doc: idx,
        id: doc.id.clone(),
        score: 1.0,
        breakdown: ScoreBreakdown::ExactLabel,
        matched_term: None,
    })
}
