// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Degenerate queries and corpora never fail; they come back empty.

use crate::common::{corpus_from, hymns, make_doc, Indexed};
use versegraph::{exact_label_hit, search, search_with_backend, Provenance, Strategy};

const ALL: [Strategy; 4] = [
    Strategy::Tfidf,
    Strategy::Bm25,
    Strategy::Hybrid,
    Strategy::Importance,
];

#[test]
fn test_empty_and_blank_queries() {
    let indexed = Indexed::new(hymns());
    for strategy in ALL {
        for query in ["", "   ", "\t\n"] {
            let outcome = search_with_backend(&indexed.ctx(), query, strategy, None);
            assert!(outcome.is_empty(), "{:?} {:?}", strategy, query);
        }
    }
}

#[test]
fn test_punctuation_only_query() {
    let indexed = Indexed::new(hymns());
    for strategy in ALL {
        assert!(search(&indexed.ctx(), "?!…", strategy).is_empty(), "{:?}", strategy);
    }
}

#[test]
fn test_empty_corpus() {
    let indexed = Indexed::new(corpus_from(vec![], vec![]));
    for strategy in ALL {
        assert!(search(&indexed.ctx(), "agni", strategy).is_empty());
    }
}

#[test]
fn test_unknown_term() {
    let indexed = Indexed::new(hymns());
    for strategy in ALL {
        assert!(search(&indexed.ctx(), "zeppelin", strategy).is_empty());
    }
}

#[test]
fn test_exact_label_variants() {
    let corpus = hymns();
    assert_eq!(exact_label_hit(&corpus, "RV 1.32").map(|h| h.id), Some("1.32".into()));
    assert_eq!(exact_label_hit(&corpus, "rv 1.32").map(|h| h.id), Some("1.32".into()));
    assert!(exact_label_hit(&corpus, "RV 1.3x").is_none());
    assert!(exact_label_hit(&corpus, "").is_none());
}

#[test]
fn test_exact_label_wins_over_strategy() {
    let indexed = Indexed::new(hymns());
    let outcome = search_with_backend(&indexed.ctx(), "RV 10.129", Strategy::Bm25, None);
    assert_eq!(outcome.provenance, Provenance::ExactLabel);
    assert_eq!(outcome.hits.len(), 1);
    assert_eq!(outcome.hits[0].score, 1.0);
}

#[test]
fn test_devanagari_query() {
    let corpus = corpus_from(
        vec![
            make_doc("a", "अग्निमीळे पुरोहितं यज्ञस्य देवमृत्विजम्"),
            make_doc("b", "वायवा याहि दर्शतेमे सोमा अरंकृताः"),
        ],
        vec![],
    );
    let indexed = Indexed::new(corpus);
    let hits = search(&indexed.ctx(), "पुरोहितं", Strategy::Bm25);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "a");
}
