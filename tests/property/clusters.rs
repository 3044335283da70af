// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Cluster maps do not depend on how the work is batched.

use proptest::prelude::*;
use versegraph::{build_clusters, ClusterConfig, ClusterTask, Tokenizer};

use super::corpus_strategy;

proptest! {
    #[test]
    fn prop_batch_size_invariant(corpus in corpus_strategy(), batch in 1usize..16) {
        let tokenizer = Tokenizer::default();
        let whole = build_clusters(&corpus, &tokenizer, ClusterConfig::default());

        let mut task = ClusterTask::new(&corpus, &tokenizer, ClusterConfig::default());
        let mut steps = 0;
        while !task.step(batch).is_complete() {
            steps += 1;
            prop_assert!(steps < 10_000);
        }
        prop_assert_eq!(task.finish(), whole);
    }

    #[test]
    fn prop_every_term_has_one_label(corpus in corpus_strategy()) {
        let config = ClusterConfig::default();
        let map = build_clusters(&corpus, &Tokenizer::default(), config);
        let mut counted = 0;
        for (label, members) in map.clusters() {
            prop_assert!(members.len() >= config.min_cluster_size);
            prop_assert_eq!(members[0].as_str(), label);
            for term in members {
                prop_assert_eq!(map.label_of(term), Some(label));
                prop_assert!(term.chars().count() >= config.min_term_length);
            }
            counted += members.len();
        }
        prop_assert_eq!(counted, map.len());
    }
}
