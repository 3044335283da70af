// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Proximity tiers around a selected document.
//!
//! Level-synchronous BFS from the selected document. Tier `k` holds every
//! document first reached at distance `k`; a document lands in exactly one
//! tier and the selected document is never in any. Expansion stops at
//! `max_depth` even if more of the graph is reachable. Tiers are only
//! materialized for levels the search actually reaches, so the requested
//! depth costs nothing beyond the graph's own eccentricity.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use super::TraversalMode;
use crate::corpus::Corpus;
use crate::types::DocIdx;

static EMPTY_TIER: BTreeSet<String> = BTreeSet::new();

/// Tier assignment for one selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Neighborhood {
    /// Selected id as given, even when it is not in the corpus.
    pub center: String,
    pub mode: TraversalMode,
    pub max_depth: usize,
    /// `tiers[k - 1]` is tier `k`. Only reached levels, never empty sets.
    tiers: Vec<BTreeSet<String>>,
    #[serde(skip)]
    levels: HashMap<String, usize>,
}

impl Neighborhood {
    /// All tiers empty, as for an unknown id.
    pub fn empty(center: &str, mode: TraversalMode, max_depth: usize) -> Self {
        Self {
            center: center.to_string(),
            mode,
            max_depth,
            tiers: Vec::new(),
            levels: HashMap::new(),
        }
    }

    /// Ids at distance `level` (1-based). Out-of-range levels are empty.
    pub fn tier(&self, level: usize) -> &BTreeSet<String> {
        level
            .checked_sub(1)
            .and_then(|i| self.tiers.get(i))
            .unwrap_or(&EMPTY_TIER)
    }

    pub fn tier1(&self) -> &BTreeSet<String> {
        self.tier(1)
    }

    pub fn tier2(&self) -> &BTreeSet<String> {
        self.tier(2)
    }

    pub fn tier3(&self) -> &BTreeSet<String> {
        self.tier(3)
    }

    /// Distance of `id` from the center, if it was reached.
    pub fn level_of(&self, id: &str) -> Option<usize> {
        self.levels.get(id).copied()
    }

    /// Reached tiers in order. Deeper levels up to `max_depth` are empty.
    pub fn tiers(&self) -> &[BTreeSet<String>] {
        &self.tiers
    }

    /// Number of classified documents across all tiers.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

/// Classify documents by graph distance from `selected_id`.
///
/// Unknown ids and documents without edges give all-empty tiers.
pub fn classify(
    corpus: &Corpus,
    selected_id: &str,
    mode: TraversalMode,
    max_depth: usize,
) -> Neighborhood {
    let mut out = Neighborhood::empty(selected_id, mode, max_depth);
    let Some(start) = corpus.index_of(selected_id) else {
        return out;
    };

    let mut visited = vec![false; corpus.len()];
    visited[start.get()] = true;
    let mut frontier = vec![start];

    for level in 1..=max_depth {
        let mut next: Vec<DocIdx> = Vec::new();
        for &node in &frontier {
            let edges = match mode {
                TraversalMode::Undirected => corpus.neighbors(node),
                TraversalMode::Outgoing => corpus.outgoing(node),
            };
            for &(other, _) in edges {
                if visited[other.get()] {
                    continue;
                }
                visited[other.get()] = true;
                next.push(other);
            }
        }
        if next.is_empty() {
            break;
        }
        let mut tier = BTreeSet::new();
        for &idx in &next {
            if let Some(doc) = corpus.get(idx) {
                tier.insert(doc.id.clone());
                out.levels.insert(doc.id.clone(), level);
            }
        }
        out.tiers.push(tier);
        frontier = next;
    }

    out
}
