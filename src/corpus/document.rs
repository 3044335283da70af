// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Wire format of a corpus file: `{ nodes: [...], edges: [...] }`.

use serde::{Deserialize, Serialize};

/// A verse: the unit of scoring and search.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Document {
    pub id: String,
    /// Display label. May carry redundant prefixes ("RV RV 1.1").
    #[serde(default)]
    pub name: String,
    /// Full text used for scoring.
    #[serde(default)]
    pub text: String,
    /// Secondary text consulted by substring matching paths.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// A weighted reference between two documents.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Relation {
    pub source: String,
    pub target: String,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

/// Raw corpus as read from disk, before indexing.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct CorpusData {
    #[serde(default)]
    pub nodes: Vec<Document>,
    #[serde(default)]
    pub edges: Vec<Relation>,
}
