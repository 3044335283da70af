// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Tier structure of breadth-first neighborhoods.

use std::collections::HashSet;

use proptest::prelude::*;
use versegraph::{classify, TraversalMode};

use super::corpus_strategy;

fn modes() -> impl Strategy<Value = TraversalMode> {
    prop::sample::select(vec![TraversalMode::Undirected, TraversalMode::Outgoing])
}

proptest! {
    #[test]
    fn prop_tiers_disjoint_and_exclude_center(
        corpus in corpus_strategy(),
        pick in any::<prop::sample::Index>(),
        mode in modes(),
        depth in 1usize..5,
    ) {
        let center = corpus.docs()[pick.index(corpus.len())].id.clone();
        let n = classify(&corpus, &center, mode, depth);
        prop_assert_eq!(n.max_depth, depth);
        prop_assert!(n.tiers().len() <= depth);
        prop_assert!(n.tiers().iter().all(|tier| !tier.is_empty()));

        let mut seen = HashSet::new();
        for tier in n.tiers() {
            for id in tier {
                prop_assert!(id != &center);
                prop_assert!(seen.insert(id.clone()), "{} in two tiers", id);
            }
        }
    }

    #[test]
    fn prop_each_tier_reached_from_previous(
        corpus in corpus_strategy(),
        pick in any::<prop::sample::Index>(),
        mode in modes(),
    ) {
        let center = corpus.docs()[pick.index(corpus.len())].id.clone();
        let n = classify(&corpus, &center, mode, 4);

        for level in 1..=4 {
            for id in n.tier(level) {
                let idx = corpus.index_of(id).unwrap();
                // Some predecessor one level closer links here.
                let reached = corpus.docs().iter().any(|doc| {
                    let prev_level = if doc.id == center { Some(0) } else { n.level_of(&doc.id) };
                    if prev_level != Some(level - 1) {
                        return false;
                    }
                    let from = corpus.index_of(&doc.id).unwrap();
                    let edges = match mode {
                        TraversalMode::Undirected => corpus.neighbors(from),
                        TraversalMode::Outgoing => corpus.outgoing(from),
                    };
                    edges.iter().any(|&(to, _)| to == idx)
                });
                prop_assert!(reached, "{} at level {} has no parent", id, level);
            }
        }
    }

    #[test]
    fn prop_undirected_first_tier_symmetric(
        corpus in corpus_strategy(),
        pick in any::<prop::sample::Index>(),
    ) {
        let center = corpus.docs()[pick.index(corpus.len())].id.clone();
        let n = classify(&corpus, &center, TraversalMode::Undirected, 1);
        for id in n.tier1() {
            let back = classify(&corpus, id, TraversalMode::Undirected, 1);
            prop_assert!(back.tier1().contains(&center));
        }
    }
}
