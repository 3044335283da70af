// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for backend response handling.
//!
//! Whatever JSON the backend sends, a search returns either remote hits that
//! resolve to real documents or a local fallback. It never panics.

#![no_main]

use libfuzzer_sys::fuzz_target;
use versegraph::testing::{corpus_from, make_doc};
use versegraph::{
    compute_importance, search_with_backend, ClusterMap, EngineConfig, LexicalIndex, Provenance,
    RemoteError, SearchContext, SemanticRequest, SemanticResponse, Strategy, Tokenizer,
};

fuzz_target!(|body: &[u8]| {
    let Ok(response) = serde_json::from_slice::<SemanticResponse>(body) else {
        return;
    };

    let corpus = corpus_from(
        vec![
            make_doc("1.1", "agni the priest"),
            make_doc("1.12", "agni the messenger"),
            make_doc("9.1", "soma flows"),
        ],
        vec![],
    );
    let config = EngineConfig::default();
    let lexical = LexicalIndex::build(&corpus, Tokenizer::default());
    let importance = compute_importance(&corpus, config.importance);
    let clusters = ClusterMap::default();
    let ctx = SearchContext {
        corpus: &corpus,
        lexical: &lexical,
        importance: &importance,
        clusters: Some(&clusters),
        config: &config,
    };

    let backend = move |_: &SemanticRequest| -> Result<SemanticResponse, RemoteError> {
        Ok(response.clone())
    };
    let outcome = search_with_backend(&ctx, "agni", Strategy::Hybrid, Some(&backend));

    for hit in &outcome.hits {
        assert!(hit.doc.get() < corpus.len());
    }
    if let Provenance::LocalFallback { .. } = outcome.provenance {
        assert!(outcome.hits.len() <= config.remote.fallback_limit);
    }
});
