// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! TF-IDF, BM25 and importance strategies against the hymn fixture.

use crate::common::{assert_descending, assert_unique, corpus_from, hymns, ids, make_doc, Indexed};
use versegraph::testing::make_doc_with_content;
use versegraph::{search, search_bm25, search_importance, search_tfidf, ScoreBreakdown, Strategy};

#[test]
fn test_bm25_prefers_shorter_verse_at_equal_frequency() {
    let indexed = Indexed::new(hymns());
    let hits = search_bm25(&indexed.ctx(), "thunderbolt");
    // Both mention it once; 1.33 is four characters shorter.
    assert_eq!(ids(&hits), vec!["1.33", "1.32"]);
    assert!(hits.iter().all(|h| h.score > 0.0));
}

#[test]
fn test_bm25_sums_over_query_terms() {
    let indexed = Indexed::new(hymns());
    let hits = search_bm25(&indexed.ctx(), "indra soma");
    assert_eq!(hits[0].id, "9.1", "only 9.1 mentions both");
    assert_descending(&hits);
    assert_unique(&hits);
    assert_eq!(hits.len(), 5);
}

#[test]
fn test_bm25_breakdown_reports_frequency() {
    let indexed = Indexed::new(hymns());
    let hits = search_bm25(&indexed.ctx(), "the");
    let hit = hits.iter().find(|h| h.id == "1.1").unwrap();
    match &hit.breakdown {
        // "the household", "the sacrifice", "the hotar".
        ScoreBreakdown::Lexical { raw, frequency } => {
            assert_eq!(*frequency, 3);
            assert_eq!(*raw, hit.score);
        }
        other => panic!("unexpected breakdown {:?}", other),
    }
}

#[test]
fn test_tfidf_matches_rare_terms() {
    let indexed = Indexed::new(hymns());
    let hits = search_tfidf(&indexed.ctx(), "agni");
    let mut found = ids(&hits);
    found.sort_unstable();
    assert_eq!(found, vec!["1.1", "1.12"]);
    assert!(hits.iter().all(|h| h.score > 0.0));
}

#[test]
fn test_tfidf_drops_terms_present_everywhere() {
    // ln(2 / 3) < 0, so nothing scores above zero.
    let corpus = corpus_from(vec![make_doc("a", "soma"), make_doc("b", "soma soma")], vec![]);
    let indexed = Indexed::new(corpus);
    assert!(search_tfidf(&indexed.ctx(), "soma").is_empty());
}

#[test]
fn test_importance_orders_substring_matches_by_importance() {
    let indexed = Indexed::new(hymns());
    let hits = search_importance(&indexed.ctx(), "thunderbolt");
    // 1.32 passes its rank on to 1.33.
    assert_eq!(ids(&hits), vec!["1.33", "1.32"]);
    for hit in &hits {
        assert_eq!(
            hit.breakdown,
            ScoreBreakdown::Importance {
                importance: indexed.importance.get(hit.doc)
            }
        );
    }
}

#[test]
fn test_importance_needs_whole_query_as_substring() {
    let indexed = Indexed::new(hymns());
    assert!(search_importance(&indexed.ctx(), "indra thunderbolt").is_empty());
    assert_eq!(search_importance(&indexed.ctx(), "the thunderbolt").len(), 2);
    assert_eq!(search_importance(&indexed.ctx(), "THUNDER").len(), 2);
}

#[test]
fn test_importance_consults_secondary_content() {
    let corpus = corpus_from(
        vec![
            make_doc_with_content("a", "hymn to the dawn", "ushas shines"),
            make_doc("b", "hymn to the wind"),
        ],
        vec![],
    );
    let indexed = Indexed::new(corpus);
    assert_eq!(ids(&search_importance(&indexed.ctx(), "ushas")), vec!["a"]);
}

#[test]
fn test_dispatch_matches_direct_calls() {
    let indexed = Indexed::new(hymns());
    let ctx = indexed.ctx();
    assert_eq!(search(&ctx, "agni", Strategy::Bm25), search_bm25(&ctx, "agni"));
    assert_eq!(search(&ctx, "agni", Strategy::Tfidf), search_tfidf(&ctx, "agni"));
    assert_eq!(
        search(&ctx, "agni", Strategy::Importance),
        search_importance(&ctx, "agni")
    );
}
