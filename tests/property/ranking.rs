// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Ordering and positivity of ranked results.

use proptest::prelude::*;
use versegraph::{search, search_bm25, search_hybrid, ScoreBreakdown, Strategy as Ranking};

use super::{corpus_strategy, query_strategy};
use crate::common::Indexed;

proptest! {
    #[test]
    fn prop_results_sorted_and_unique(
        corpus in corpus_strategy(),
        query in query_strategy(),
        strategy in prop::sample::select(vec![Ranking::Tfidf, Ranking::Bm25, Ranking::Hybrid, Ranking::Importance]),
    ) {
        let indexed = Indexed::new(corpus);
        let hits = search(&indexed.ctx(), &query, strategy);
        let mut seen = std::collections::HashSet::new();
        for pair in hits.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
        for hit in &hits {
            prop_assert!(seen.insert(hit.doc));
        }
    }

    #[test]
    fn prop_bm25_hits_positive_and_contain_a_term(
        corpus in corpus_strategy(),
        query in query_strategy(),
    ) {
        let indexed = Indexed::new(corpus);
        let terms = indexed.lexical.query_terms(&query);
        for hit in search_bm25(&indexed.ctx(), &query) {
            prop_assert!(hit.score > 0.0);
            let text = &indexed.lexical.entry(hit.doc).unwrap().text;
            prop_assert!(terms.iter().any(|t| text.contains(t.as_str())));
        }
    }

    #[test]
    fn prop_hybrid_score_is_component_sum(
        corpus in corpus_strategy(),
        query in query_strategy(),
    ) {
        let indexed = Indexed::new(corpus);
        for hit in search_hybrid(&indexed.ctx(), &query) {
            match hit.breakdown {
                ScoreBreakdown::Hybrid { bm25_component, semantic_bonus, graph_score, .. } => {
                    prop_assert!(bm25_component >= 0.0 && graph_score >= 0.0);
                    prop_assert!(semantic_bonus == 0.0 || semantic_bonus == 50.0);
                    prop_assert!((hit.score - (bm25_component + semantic_bonus + graph_score)).abs() < 1e-9);
                }
                ref other => prop_assert!(false, "unexpected breakdown {:?}", other),
            }
        }
    }

    #[test]
    fn prop_expansion_is_monotone(
        corpus in corpus_strategy(),
        query in query_strategy(),
    ) {
        let indexed = Indexed::new(corpus);
        let plain = search_hybrid(&indexed.ctx_without_clusters(), &query);
        let expanded = search_hybrid(&indexed.ctx(), &query);
        for hit in &plain {
            let other = expanded.iter().find(|h| h.doc == hit.doc);
            prop_assert!(other.is_some());
            prop_assert!(other.unwrap().score >= hit.score - 1e-9);
        }
    }
}
