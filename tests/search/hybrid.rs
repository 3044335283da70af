// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Hybrid ranking: components, expansion and graph proximity.

use crate::common::{assert_descending, assert_unique, hymns, ids, Indexed};
use versegraph::{search_hybrid, ScoreBreakdown, SearchHit, Tokenizer};

fn components(hit: &SearchHit) -> (f64, f64, f64) {
    match hit.breakdown {
        ScoreBreakdown::Hybrid {
            bm25_component,
            semantic_bonus,
            graph_score,
            ..
        } => (bm25_component, semantic_bonus, graph_score),
        ref other => panic!("expected hybrid breakdown, got {:?}", other),
    }
}

#[test]
fn test_score_is_sum_of_components() {
    let indexed = Indexed::new(hymns());
    let hits = search_hybrid(&indexed.ctx(), "agni soma indra");
    assert!(!hits.is_empty());
    for hit in &hits {
        let (bm25, bonus, graph) = components(hit);
        assert!((hit.score - (bm25 + bonus + graph)).abs() < 1e-9, "{}", hit.id);
    }
    assert_descending(&hits);
    assert_unique(&hits);
}

#[test]
fn test_graph_score_uses_lightest_edge_between_matches() {
    let indexed = Indexed::new(hymns());
    let hits = search_hybrid(&indexed.ctx_without_clusters(), "agni");
    let mut found = ids(&hits);
    found.sort_unstable();
    assert_eq!(found, vec!["1.1", "1.12"]);
    for hit in &hits {
        // 1.1 → 1.12 weighs 2, the reverse edge 1; the lighter one counts.
        let (_, bonus, graph) = components(hit);
        assert_eq!(bonus, 0.0);
        assert!((graph - 10.0).abs() < 1e-12, "{} graph {}", hit.id, graph);
    }
}

#[test]
fn test_isolated_match_has_no_graph_score() {
    let indexed = Indexed::new(hymns());
    let hits = search_hybrid(&indexed.ctx_without_clusters(), "existence");
    assert_eq!(ids(&hits), vec!["10.129"]);
    let (bm25, _, graph) = components(&hits[0]);
    assert!(bm25 > 0.0);
    assert_eq!(graph, 0.0);
}

#[test]
fn test_without_clusters_no_bonus_and_literal_matches_only() {
    let indexed = Indexed::new(hymns());
    let hits = search_hybrid(&indexed.ctx_without_clusters(), "thunderbolt");
    assert_eq!(hits.len(), 2);
    for hit in &hits {
        assert_eq!(components(hit).1, 0.0);
        assert_eq!(hit.matched_term.as_deref(), Some("thunderbolt"));
    }
}

#[test]
fn test_expansion_only_adds_matches_and_score() {
    let indexed = Indexed::new(hymns());
    for query in ["agni", "soma", "indra vritra", "hotar", "existence"] {
        let plain = search_hybrid(&indexed.ctx_without_clusters(), query);
        let expanded = search_hybrid(&indexed.ctx(), query);
        for hit in &plain {
            let other = expanded
                .iter()
                .find(|h| h.doc == hit.doc)
                .unwrap_or_else(|| panic!("{} lost {} after expansion", query, hit.id));
            assert!(other.score >= hit.score - 1e-9, "{} {}", query, hit.id);
        }
    }
}

#[test]
fn test_matched_term_is_a_token_of_the_verse() {
    let indexed = Indexed::new(hymns());
    let tokenizer = Tokenizer::default();
    for hit in search_hybrid(&indexed.ctx(), "agni soma indra") {
        let term = hit.matched_term.clone().expect("hybrid hits carry a term");
        let text = &indexed.corpus.get(hit.doc).unwrap().text;
        assert!(
            tokenizer.tokenize(text).contains(&term),
            "{} does not contain {}",
            hit.id,
            term
        );
    }
}

#[test]
fn test_bonus_requires_clustered_query_term() {
    let indexed = Indexed::new(hymns());
    let hits = search_hybrid(&indexed.ctx(), "existence");
    let clustered = indexed.clusters.contains("existence");
    for hit in &hits {
        let (_, bonus, _) = components(hit);
        if clustered {
            assert!(bonus == 0.0 || bonus == 50.0);
        } else {
            assert_eq!(bonus, 0.0);
        }
    }
}
