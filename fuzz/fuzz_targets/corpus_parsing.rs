// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for corpus parsing and the per-load computations.
//!
//! Arbitrary bytes either fail to parse with a `LoadError` or yield a corpus
//! whose importance scores and neighborhoods are well-formed.

#![no_main]

use libfuzzer_sys::fuzz_target;
use versegraph::{
    classify, compute_importance, Corpus, ImportanceParams, NameNormalizer, TraversalMode,
};

fuzz_target!(|data: &[u8]| {
    let Ok(corpus) = Corpus::from_slice(data, NameNormalizer::default()) else {
        return;
    };
    if corpus.len() > 500 {
        return;
    }

    // INVARIANT 1: every resolved link points inside the corpus
    for link in corpus.links() {
        assert!(link.source.get() < corpus.len());
        assert!(link.target.get() < corpus.len());
    }

    // INVARIANT 2: importance is a distribution over the documents
    let scores = compute_importance(&corpus, ImportanceParams::default());
    assert_eq!(scores.len(), corpus.len());
    if !corpus.is_empty() {
        let total: f64 = scores.as_slice().iter().sum();
        assert!((total - 1.0).abs() < 1e-6, "importance sums to {}", total);
    }

    // INVARIANT 3: neighborhoods never contain their center
    if let Some(doc) = corpus.docs().first() {
        for mode in [TraversalMode::Undirected, TraversalMode::Outgoing] {
            let n = classify(&corpus, &doc.id, mode, 3);
            assert_eq!(n.level_of(&doc.id), None);
        }
    }
});
