// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Structural queries over the reference graph.
//!
//! - **Neighborhood**: bounded BFS tiers around a selected document, for
//!   highlighting and the CLI `neighbors` command
//! - **Proximity**: closest edge between a document and a set of other
//!   documents, used by the hybrid graph score
//!
//! Both only read [`crate::Corpus`] adjacency, which never contains edges to
//! unknown documents.

pub mod neighborhood;
pub mod proximity;

use serde::{Deserialize, Serialize};

pub use neighborhood::{classify, Neighborhood};
pub use proximity::min_edge_weight;

/// Which edges a traversal may follow.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum TraversalMode {
    /// Every edge in both directions.
    #[default]
    Undirected,
    /// Only edges leaving the frontier.
    Outgoing,
}

impl TraversalMode {
    pub fn as_str(self) -> &'static str {
        match self {
            TraversalMode::Undirected => "undirected",
            TraversalMode::Outgoing => "outgoing",
        }
    }
}

impl std::fmt::Display for TraversalMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
