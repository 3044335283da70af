// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::io::Write;

use tempfile::NamedTempFile;
use versegraph::{
    build_clusters, compute_importance, ClusterMap, Corpus, CorpusData, EngineConfig,
    ImportanceScores, LexicalIndex, NameNormalizer, SearchContext, SearchHit, Tokenizer,
};

// Re-export canonical test utilities from versegraph::testing
pub use versegraph::testing::{abc_corpus, chain_corpus, corpus_from, make_doc, make_relation};

// ============================================================================
// FIXTURES
// ============================================================================

/// Eight verses with a handful of relations and one dangling edge.
///
/// ```text
/// 1.1 ⇄ 1.12      1.32 → 1.33
/// 9.1 → 1.2       9.1 → 1.32
/// 1.3 → 1.2       1.1 → ghost (skipped)
/// ```
pub fn hymn_data() -> CorpusData {
    CorpusData {
        nodes: vec![
            make_doc(
                "1.1",
                "Agni I praise, the household priest, god of the sacrifice, the hotar",
            ),
            make_doc("1.2", "Vayu come, these soma drops are prepared for you"),
            make_doc("1.3", "Asvins, enjoy the sacrificial food, the soma pressed"),
            make_doc("1.32", "Indra slew the dragon Vritra with the thunderbolt"),
            make_doc("1.33", "Indra with the thunderbolt struck Vritra down"),
            make_doc("1.12", "Agni we choose as messenger, the hotar of the sacrifice"),
            make_doc("9.1", "Soma flows in sweetest stream, pressed for Indra to drink"),
            make_doc("10.129", "Then was neither existence nor non-existence"),
        ],
        edges: vec![
            make_relation("1.1", "1.12", 2.0),
            make_relation("1.12", "1.1", 1.0),
            make_relation("1.32", "1.33", 3.0),
            make_relation("9.1", "1.2", 1.0),
            make_relation("9.1", "1.32", 1.0),
            make_relation("1.3", "1.2", 1.0),
            make_relation("1.1", "ghost", 1.0),
        ],
    }
}

pub fn hymns() -> Corpus {
    Corpus::from_data(hymn_data(), NameNormalizer::default())
}

/// Config with clusters built during load, so tests never race the worker.
pub fn foreground_config() -> EngineConfig {
    let mut config = EngineConfig::default();
    config.clusters.background = false;
    config
}

/// Write `data` as a corpus file.
pub fn corpus_file(data: &CorpusData) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    let json = serde_json::to_string(data).expect("serialize corpus");
    file.write_all(json.as_bytes()).expect("write corpus");
    file
}

/// Write raw text to a temp file.
pub fn text_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write file");
    file
}

// ============================================================================
// SEARCH CONTEXT
// ============================================================================

/// Owns everything a [`SearchContext`] borrows.
pub struct Indexed {
    pub corpus: Corpus,
    pub lexical: LexicalIndex,
    pub importance: ImportanceScores,
    pub clusters: ClusterMap,
    pub config: EngineConfig,
}

impl Indexed {
    pub fn new(corpus: Corpus) -> Self {
        Self::with_config(corpus, EngineConfig::default())
    }

    pub fn with_config(corpus: Corpus, config: EngineConfig) -> Self {
        let tokenizer = Tokenizer::new(config.tokenizer);
        Self {
            lexical: LexicalIndex::build(&corpus, tokenizer),
            importance: compute_importance(&corpus, config.importance),
            clusters: build_clusters(&corpus, &tokenizer, config.clusters),
            corpus,
            config,
        }
    }

    pub fn ctx(&self) -> SearchContext<'_> {
        SearchContext {
            corpus: &self.corpus,
            lexical: &self.lexical,
            importance: &self.importance,
            clusters: Some(&self.clusters),
            config: &self.config,
        }
    }

    /// Context as seen while clusters are still building.
    pub fn ctx_without_clusters(&self) -> SearchContext<'_> {
        SearchContext {
            clusters: None,
            ..self.ctx()
        }
    }
}

// ============================================================================
// ASSERTIONS
// ============================================================================

pub fn ids(hits: &[SearchHit]) -> Vec<&str> {
    hits.iter().map(|h| h.id.as_str()).collect()
}

/// Scores never increase down the list.
pub fn assert_descending(hits: &[SearchHit]) {
    for pair in hits.windows(2) {
        assert!(
            pair[0].score >= pair[1].score,
            "{} ({}) ranked above {} ({})",
            pair[0].id,
            pair[0].score,
            pair[1].id,
            pair[1].score
        );
    }
}

/// No document appears twice.
pub fn assert_unique(hits: &[SearchHit]) {
    let mut seen = std::collections::HashSet::new();
    for hit in hits {
        assert!(seen.insert(hit.doc), "duplicate hit {}", hit.id);
    }
}
