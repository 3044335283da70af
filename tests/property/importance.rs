// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Importance scores form a distribution and are deterministic.

use proptest::prelude::*;
use versegraph::{compute_importance, ImportanceParams};

use super::corpus_strategy;

proptest! {
    #[test]
    fn prop_importance_sums_to_one(corpus in corpus_strategy()) {
        let scores = compute_importance(&corpus, ImportanceParams::default());
        prop_assert_eq!(scores.len(), corpus.len());
        let total: f64 = scores.as_slice().iter().sum();
        prop_assert!((total - 1.0).abs() < 1e-9, "sum {}", total);
    }

    #[test]
    fn prop_importance_positive_and_bounded(corpus in corpus_strategy()) {
        let scores = compute_importance(&corpus, ImportanceParams::default());
        for &s in scores.as_slice() {
            prop_assert!(s > 0.0 && s <= 1.0, "score {}", s);
        }
    }

    #[test]
    fn prop_importance_deterministic(corpus in corpus_strategy()) {
        let a = compute_importance(&corpus, ImportanceParams::default());
        let b = compute_importance(&corpus, ImportanceParams::default());
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_iterations_bounded(corpus in corpus_strategy(), max in 1usize..20) {
        let params = ImportanceParams { max_iterations: max, ..ImportanceParams::default() };
        let scores = compute_importance(&corpus, params);
        prop_assert!(scores.iterations() <= max);
        prop_assert!(scores.converged() || scores.iterations() == max);
    }

    #[test]
    fn prop_without_edges_scores_are_uniform(n in 1usize..20) {
        let nodes = (0..n).map(|i| crate::common::make_doc(&format!("d{}", i), "")).collect();
        let corpus = crate::common::corpus_from(nodes, vec![]);
        let scores = compute_importance(&corpus, ImportanceParams::default());
        for &s in scores.as_slice() {
            prop_assert!((s - 1.0 / n as f64).abs() < 1e-12);
        }
    }
}
