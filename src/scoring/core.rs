// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The math behind lexical ranking.
//!
//! # BM25
//!
//! ```text
//! idf(t)   = ln((N - df + 0.5) / (df + 0.5) + 1)
//! score(d) = Σ idf(t) · tf·(k1 + 1) / (tf + k1·(1 - b + b·|d| / avg|d|))
//! ```
//!
//! The `+ 1` inside the logarithm keeps idf strictly positive even for terms
//! present in every document, so a document that contains a query term always
//! scores above one that doesn't.
//!
//! # TF-IDF
//!
//! ```text
//! idf(t)   = ln(N / (df + 1))
//! score(d) = Σ tf · idf(t)
//! ```
//!
//! This one goes to zero or below for common terms; callers drop non-positive
//! totals.
//!
//! # Lengths
//!
//! `|d|` and `avg|d|` are character counts of the raw text, not token counts.
//! Scores keep the magnitudes the hybrid weights were tuned against.

use serde::{Deserialize, Serialize};

/// Default term-frequency saturation.
pub const DEFAULT_K1: f64 = 1.2;

/// Default length normalization strength.
pub const DEFAULT_B: f64 = 0.75;

/// BM25 tuning knobs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bm25Params {
    pub k1: f64,
    pub b: f64,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Self {
            k1: DEFAULT_K1,
            b: DEFAULT_B,
        }
    }
}

/// BM25 inverse document frequency. Zero for an empty corpus.
pub fn bm25_idf(total_docs: usize, doc_freq: usize) -> f64 {
    if total_docs == 0 {
        return 0.0;
    }
    let n = total_docs as f64;
    let df = doc_freq as f64;
    ((n - df + 0.5) / (df + 0.5) + 1.0).ln()
}

/// One term's BM25 contribution for one document.
///
/// `avg_len == 0` only happens when every text is empty, in which case the
/// length ratio is treated as zero.
pub fn bm25_term_score(idf: f64, tf: usize, doc_len: usize, avg_len: f64, params: Bm25Params) -> f64 {
    if tf == 0 {
        return 0.0;
    }
    let tf = tf as f64;
    let ratio = if avg_len > 0.0 {
        doc_len as f64 / avg_len
    } else {
        0.0
    };
    let norm = params.k1 * (1.0 - params.b + params.b * ratio);
    idf * tf * (params.k1 + 1.0) / (tf + norm)
}

/// TF-IDF inverse document frequency. Zero for an empty corpus.
pub fn tfidf_idf(total_docs: usize, doc_freq: usize) -> f64 {
    if total_docs == 0 {
        return 0.0;
    }
    (total_docs as f64 / (doc_freq as f64 + 1.0)).ln()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bm25_idf_positive_below_saturation() {
        assert!(bm25_idf(3, 1) > 0.0);
        assert!(bm25_idf(3, 2) > 0.0);
        // Even a term in every document keeps a small positive idf.
        assert!(bm25_idf(3, 3) > 0.0);
    }

    #[test]
    fn test_bm25_idf_rarer_terms_weigh_more() {
        assert!(bm25_idf(100, 1) > bm25_idf(100, 50));
    }

    #[test]
    fn test_bm25_idf_empty_corpus() {
        assert_eq!(bm25_idf(0, 0), 0.0);
    }

    #[test]
    fn test_bm25_term_score_zero_tf() {
        assert_eq!(bm25_term_score(1.0, 0, 10, 10.0, Bm25Params::default()), 0.0);
    }

    #[test]
    fn test_bm25_term_score_average_length() {
        // At average length the denominator is tf + k1.
        let params = Bm25Params::default();
        let score = bm25_term_score(1.0, 1, 10, 10.0, params);
        let expected = 1.0 * (params.k1 + 1.0) / (1.0 + params.k1);
        assert!((score - expected).abs() < 1e-12);
    }

    #[test]
    fn test_bm25_term_score_saturates() {
        let params = Bm25Params::default();
        let s1 = bm25_term_score(1.0, 1, 10, 10.0, params);
        let s10 = bm25_term_score(1.0, 10, 10, 10.0, params);
        let s100 = bm25_term_score(1.0, 100, 10, 10.0, params);
        assert!(s10 > s1);
        assert!(s100 > s10);
        assert!(s100 < params.k1 + 1.0);
    }

    #[test]
    fn test_bm25_longer_documents_score_lower() {
        let params = Bm25Params::default();
        assert!(bm25_term_score(1.0, 2, 5, 10.0, params) > bm25_term_score(1.0, 2, 50, 10.0, params));
    }

    #[test]
    fn test_bm25_zero_average_length() {
        let score = bm25_term_score(1.0, 1, 0, 0.0, Bm25Params::default());
        assert!(score.is_finite());
        assert!(score > 0.0);
    }

    #[test]
    fn test_tfidf_idf() {
        assert!((tfidf_idf(3, 1) - (1.5f64).ln()).abs() < 1e-12);
        assert_eq!(tfidf_idf(3, 2), 0.0);
        assert!(tfidf_idf(3, 3) < 0.0);
        assert_eq!(tfidf_idf(0, 0), 0.0);
    }
}
