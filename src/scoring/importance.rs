// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Static document importance by power iteration over the reference graph.
//!
//! Classic PageRank without the dangling-node correction:
//!
//! ```text
//! score₀(d)   = 1 / N
//! scoreₖ₊₁(d) = (1 - α) / N + α · Σ_{s → d} scoreₖ(s) / outdeg(s)
//! ```
//!
//! Iteration stops when `Σ |scoreₖ₊₁ - scoreₖ| < tolerance` or after
//! `max_iterations`. A document with no outgoing edges passes nothing on, so
//! mass leaks each round; the fixed point is rescaled to sum to 1 at the end.
//! Proportions between documents are exactly those of the uncorrected
//! iteration.
//!
//! Each source counts once per target no matter how many parallel edges it
//! has, but every edge counts toward its out-degree.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::corpus::Corpus;
use crate::types::DocIdx;

pub const DEFAULT_DAMPING: f64 = 0.85;
pub const DEFAULT_MAX_ITERATIONS: usize = 100;
pub const DEFAULT_TOLERANCE: f64 = 1.0e-6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportanceParams {
    pub damping_factor: f64,
    pub max_iterations: usize,
    pub tolerance: f64,
}

impl Default for ImportanceParams {
    fn default() -> Self {
        Self {
            damping_factor: DEFAULT_DAMPING,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

/// Importance per document, aligned with corpus positions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportanceScores {
    scores: Vec<f64>,
    iterations: usize,
    converged: bool,
}

impl ImportanceScores {
    /// Score of one document; 0 for out-of-range positions.
    pub fn get(&self, idx: DocIdx) -> f64 {
        self.scores.get(idx.get()).copied().unwrap_or(0.0)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.scores
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Whether the tolerance was reached before `max_iterations`.
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Documents by descending importance; ties keep corpus order.
    pub fn ranked(&self) -> Vec<(DocIdx, f64)> {
        let mut ranked: Vec<(DocIdx, f64)> = self
            .scores
            .iter()
            .enumerate()
            .map(|(i, &s)| (DocIdx::from(i), s))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }

    /// Keyed by document id.
    pub fn to_map(&self, corpus: &Corpus) -> HashMap<String, f64> {
        corpus
            .docs()
            .iter()
            .zip(&self.scores)
            .map(|(doc, &score)| (doc.id.clone(), score))
            .collect()
    }
}

/// Run the power iteration. An empty corpus yields empty scores.
pub fn compute_importance(corpus: &Corpus, params: ImportanceParams) -> ImportanceScores {
    let n = corpus.len();
    if n == 0 {
        return ImportanceScores {
            converged: true,
            ..ImportanceScores::default()
        };
    }

    let mut out_degree = vec![0usize; n];
    let mut inbound: Vec<Vec<usize>> = vec![Vec::new(); n];
    for link in corpus.links() {
        let (s, t) = (link.source.get(), link.target.get());
        out_degree[s] += 1;
        if !inbound[t].contains(&s) {
            inbound[t].push(s);
        }
    }

    let nf = n as f64;
    let alpha = params.damping_factor;
    let base = (1.0 - alpha) / nf;
    let mut scores = vec![1.0 / nf; n];
    let mut next = vec![0.0; n];
    let mut iterations = 0;
    let mut converged = false;

    while iterations < params.max_iterations {
        iterations += 1;
        let mut delta = 0.0;
        for d in 0..n {
            let inbound_sum: f64 = inbound[d]
                .iter()
                .map(|&s| scores[s] / out_degree[s] as f64)
                .sum();
            next[d] = base + alpha * inbound_sum;
            delta += (next[d] - scores[d]).abs();
        }
        std::mem::swap(&mut scores, &mut next);
        if delta < params.tolerance {
            converged = true;
            break;
        }
    }

    // With no teleport (damping 1.0) an acyclic graph drains to zero.
    let total: f64 = scores.iter().sum();
    if total > 0.0 {
        for s in &mut scores {
            *s /= total;
        }
    } else {
        scores.fill(1.0 / nf);
    }

    debug!(documents = n, iterations, converged, "computed importance");

    ImportanceScores {
        scores,
        iterations,
        converged,
    }
}

/// Convenience form keyed by document id.
pub fn importance_by_id(corpus: &Corpus, params: ImportanceParams) -> HashMap<String, f64> {
    compute_importance(corpus, params).to_map(corpus)
}
