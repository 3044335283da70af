// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Single-signal strategies: TF-IDF, BM25 and importance.

use super::SearchContext;
use crate::scoring::sort_hits;
use crate::types::{DocIdx, ScoreBreakdown, SearchHit};
use crate::util::prepare;

/// BM25 over the query's terms. Zero-score documents are left out.
pub fn search_bm25(ctx: &SearchContext<'_>, query: &str) -> Vec<SearchHit> {
    let terms = ctx.lexical.query_terms(query);
    if terms.is_empty() || ctx.lexical.is_empty() {
        return Vec::new();
    }
    let scores = ctx.lexical.bm25_scores(&terms, ctx.config.bm25);
    collect_lexical(ctx, &terms, scores)
}

/// TF-IDF over the query's terms. Only strictly positive totals are kept;
/// a term found in nearly every document has a negative idf.
pub fn search_tfidf(ctx: &SearchContext<'_>, query: &str) -> Vec<SearchHit> {
    let terms = ctx.lexical.query_terms(query);
    if terms.is_empty() || ctx.lexical.is_empty() {
        return Vec::new();
    }
    let scores = ctx.lexical.tfidf_scores(&terms);
    collect_lexical(ctx, &terms, scores)
}

fn collect_lexical(ctx: &SearchContext<'_>, terms: &[String], scores: Vec<f64>) -> Vec<SearchHit> {
    let mut hits: Vec<SearchHit> = scores
        .into_iter()
        .enumerate()
        .filter(|&(_, score)| score > 0.0)
        .filter_map(|(i, score)| {
            let idx = DocIdx::from(i);
            let doc = ctx.corpus.get(idx)?;
            Some(SearchHit {
                doc: idx,
                id: doc.id.clone(),
                score,
                breakdown: ScoreBreakdown::Lexical {
                    raw: score,
                    frequency: ctx.lexical.frequency(idx, terms),
                },
                matched_term: None,
            })
        })
        .collect();
    sort_hits(&mut hits);
    hits
}

/// Documents whose text or secondary content contains the whole query,
/// most important first.
pub fn search_importance(ctx: &SearchContext<'_>, query: &str) -> Vec<SearchHit> {
    let needle = prepare(query.trim());
    if needle.is_empty() {
        return Vec::new();
    }

    let mut hits: Vec<SearchHit> = ctx
        .lexical
        .entries()
        .iter()
        .enumerate()
        .filter(|(_, entry)| {
            entry.text.contains(&needle)
                || entry.content.as_deref().is_some_and(|c| c.contains(&needle))
        })
        .filter_map(|(i, _)| {
            let idx = DocIdx::from(i);
            let doc = ctx.corpus.get(idx)?;
            let importance = ctx.importance.get(idx);
            Some(SearchHit {
                doc: idx,
                id: doc.id.clone(),
                score: importance,
                breakdown: ScoreBreakdown::Importance { importance },
                matched_term: None,
            })
        })
        .collect();
    sort_hits(&mut hits);
    hits
}
