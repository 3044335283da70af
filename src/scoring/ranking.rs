// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result ranking: how search hits get sorted.
//!
//! Descending score, nothing else. Equal scores keep corpus order, which is
//! what a stable sort over hits generated in corpus order gives; the explicit
//! position tiebreaker makes that hold even if a caller feeds hits in some
//! other order.

use std::cmp::Ordering;

use crate::types::SearchHit;

/// Compare two hits for ranking.
///
/// Sort order:
/// 1. **Score** - higher wins (NaN sorts last)
/// 2. **Corpus position** - earlier document wins
pub fn compare_hits(a: &SearchHit, b: &SearchHit) -> Ordering {
    match (a.score.is_nan(), b.score.is_nan()) {
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        _ => {}
    }
    match b.score.partial_cmp(&a.score) {
        Some(ord) if ord != Ordering::Equal => ord,
        _ => a.doc.cmp(&b.doc),
    }
}

/// Sort hits in place by [`compare_hits`].
pub fn sort_hits(hits: &mut [SearchHit]) {
    hits.sort_by(compare_hits);
}
