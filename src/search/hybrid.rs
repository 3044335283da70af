// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Hybrid ranking: lexical relevance, cluster semantics and graph proximity.
//!
//! ```text
//! score = bm25 · bm25_scale
//!       + semantic_bonus   if a raw query term is clustered and appears in the text
//!       + graph_scale / w  where w is the lightest edge to another matching verse
//! ```
//!
//! The query is tokenized, then expanded with every term that shares a
//! cluster with one of its tokens. A document matches when its own token set
//! contains any expanded term, so a verse can match through expansion alone
//! with a zero BM25 component.
//!
//! Expanded terms are tried longest first (ties: lexicographic), which fixes
//! the reported `matched_term`. Equal final scores keep corpus order.

use std::collections::BTreeSet;

use super::SearchContext;
use crate::graph::min_edge_weight;
use crate::scoring::sort_hits;
use crate::types::{DocIdx, ScoreBreakdown, SearchHit};

pub fn search_hybrid(ctx: &SearchContext<'_>, query: &str) -> Vec<SearchHit> {
    let raw_terms = ctx.lexical.query_terms(query);
    if raw_terms.is_empty() || ctx.lexical.is_empty() {
        return Vec::new();
    }

    let weights = ctx.config.hybrid;
    let bm25 = ctx.lexical.bm25_scores(&raw_terms, ctx.config.bm25);
    let expanded = expand(ctx, &raw_terms);
    let clustered: Vec<&String> = match ctx.clusters {
        Some(clusters) => raw_terms.iter().filter(|t| clusters.contains(t.as_str())).collect(),
        None => Vec::new(),
    };

    let matched: Vec<Option<&String>> = ctx
        .lexical
        .entries()
        .iter()
        .map(|entry| expanded.iter().find(|t| entry.terms.contains(t.as_str())))
        .collect();
    let members: Vec<bool> = matched.iter().map(Option::is_some).collect();

    let mut hits = Vec::new();
    for (i, term) in matched.iter().enumerate() {
        let Some(term) = term else { continue };
        let idx = DocIdx::from(i);
        let (Some(doc), Some(entry)) = (ctx.corpus.get(idx), ctx.lexical.entry(idx)) else {
            continue;
        };

        let bm25_component = bm25[i] * weights.bm25_scale;
        let semantic_bonus = if clustered.iter().any(|t| entry.text.contains(t.as_str())) {
            weights.semantic_bonus
        } else {
            0.0
        };
        let graph_score =
            min_edge_weight(ctx.corpus, idx, &members).map_or(0.0, |w| weights.graph_scale / w);

        hits.push(SearchHit {
            doc: idx,
            id: doc.id.clone(),
            score: bm25_component + semantic_bonus + graph_score,
            breakdown: ScoreBreakdown::Hybrid {
                bm25_component,
                semantic_bonus,
                graph_score,
                frequency: ctx.lexical.frequency(idx, &raw_terms),
            },
            matched_term: Some((*term).clone()),
        });
    }

    sort_hits(&mut hits);
    hits
}

/// Raw terms plus their cluster mates, longest first.
fn expand(ctx: &SearchContext<'_>, raw_terms: &[String]) -> Vec<String> {
    let mut set: BTreeSet<String> = raw_terms.iter().cloned().collect();
    if let Some(clusters) = ctx.clusters {
        set.extend(clusters.related_terms(raw_terms));
    }
    let mut terms: Vec<String> = set.into_iter().collect();
    // BTreeSet order is lexicographic; the stable sort keeps it within a length.
    terms.sort_by_key(|t| std::cmp::Reverse(t.chars().count()));
    terms
}
