// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical implementations of test helpers to avoid duplication.

#![doc(hidden)]

use crate::corpus::{Corpus, CorpusData, Document, NameNormalizer, Relation};

/// Create a document whose label is derived from its id.
pub fn make_doc(id: &str, text: &str) -> Document {
    Document {
        id: id.to_string(),
        name: format!("RV {}", id),
        text: text.to_string(),
        content: None,
    }
}

/// Create a document with secondary content.
pub fn make_doc_with_content(id: &str, text: &str, content: &str) -> Document {
    Document {
        content: Some(content.to_string()),
        ..make_doc(id, text)
    }
}

pub fn make_relation(source: &str, target: &str, weight: f64) -> Relation {
    Relation {
        source: source.to_string(),
        target: target.to_string(),
        weight,
    }
}

/// Build a corpus with the default "RV" label prefix.
pub fn corpus_from(nodes: Vec<Document>, edges: Vec<Relation>) -> Corpus {
    Corpus::from_data(CorpusData { nodes, edges }, NameNormalizer::default())
}

/// The three-verse graph used throughout the docs: A→B (1), B→C (1), A→C (5).
pub fn abc_corpus() -> Corpus {
    corpus_from(
        vec![
            make_doc("A", "agni the priest of the sacrifice"),
            make_doc("B", "indra wields the thunderbolt"),
            make_doc("C", "soma flows through the filter"),
        ],
        vec![
            make_relation("A", "B", 1.0),
            make_relation("B", "C", 1.0),
            make_relation("A", "C", 5.0),
        ],
    )
}

/// A chain `d0 - d1 - ... - d{n-1}` with unit weights and one-word texts.
pub fn chain_corpus(n: usize) -> Corpus {
    let nodes = (0..n)
        .map(|i| make_doc(&format!("d{}", i), &format!("verse number {}", i)))
        .collect();
    let edges = (1..n)
        .map(|i| make_relation(&format!("d{}", i - 1), &format!("d{}", i), 1.0))
        .collect();
    corpus_from(nodes, edges)
}
