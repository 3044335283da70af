// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Edge-distance between a document and a candidate set.

use crate::corpus::Corpus;
use crate::types::DocIdx;

/// Smallest positive weight among undirected edges joining `doc` to another
/// document flagged in `members`. Self-loops and non-positive weights are
/// ignored.
pub fn min_edge_weight(corpus: &Corpus, doc: DocIdx, members: &[bool]) -> Option<f64> {
    corpus
        .neighbors(doc)
        .iter()
        .filter(|&&(other, weight)| {
            other != doc && weight > 0.0 && members.get(other.get()).copied().unwrap_or(false)
        })
        .map(|&(_, weight)| weight)
        .min_by(f64::total_cmp)
}
