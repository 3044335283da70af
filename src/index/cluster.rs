// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Term co-occurrence clusters for query expansion.
//!
//! A poor man's semantics: terms that keep showing up in the same verses are
//! treated as related, so a query for one also matches the others.
//!
//! # Algorithm
//!
//! 1. Tokenize every document. Terms with at least `min_term_length` chars
//!    qualify; for each, record the documents containing it and its global
//!    occurrence count
//! 2. Order qualifying terms by descending count (ties: first occurrence)
//! 3. Walk that order. Each term not yet in a cluster is a seed: count how
//!    many of the seed's documents every other qualifying term appears in.
//!    Unassigned terms whose count exceeds `seed_docs × cooccurrence_ratio`
//!    join the seed
//! 4. Keep the cluster only if it reaches `min_cluster_size` terms; every
//!    member then maps to the seed as its label
//!
//! # Batching
//!
//! [`ClusterTask`] owns all of its inputs and processes the seed order in
//! steps of any size. Steps only ever advance a cursor over a fixed order, so
//! the final map is identical for every batch size, including one big step.
//! The partially built map is private to the task; callers only see a
//! [`ClusterMap`] once [`ClusterTask::finish`] hands it over.

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use crate::config::ClusterConfig;
use crate::corpus::Corpus;
use crate::util::Tokenizer;

/// Term → cluster label (the seed term), plus the reverse listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClusterMap {
    labels: HashMap<String, String>,
    members: HashMap<String, Vec<String>>,
    term_frequency: HashMap<String, usize>,
}

impl ClusterMap {
    pub fn label_of(&self, term: &str) -> Option<&str> {
        self.labels.get(term).map(String::as_str)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.labels.contains_key(term)
    }

    /// Members of the cluster labeled `label`, seed first.
    pub fn members(&self, label: &str) -> &[String] {
        self.members.get(label).map_or(&[], Vec::as_slice)
    }

    /// Every term sharing a cluster with any of `terms` (the inputs included
    /// when they are clustered). Unclustered inputs contribute nothing.
    pub fn related_terms<S: AsRef<str>>(&self, terms: &[S]) -> BTreeSet<String> {
        terms
            .iter()
            .filter_map(|t| self.label_of(t.as_ref()))
            .flat_map(|label| self.members(label).iter().cloned())
            .collect()
    }

    /// Labels in ascending order with their members.
    pub fn clusters(&self) -> Vec<(&str, &[String])> {
        let mut out: Vec<(&str, &[String])> = self
            .members
            .iter()
            .map(|(label, members)| (label.as_str(), members.as_slice()))
            .collect();
        out.sort_by(|a, b| a.0.cmp(b.0));
        out
    }

    pub fn cluster_count(&self) -> usize {
        self.members.len()
    }

    /// Number of clustered terms.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Global occurrence count of every token in the corpus.
    pub fn term_frequency(&self) -> &HashMap<String, usize> {
        &self.term_frequency
    }
}

/// How far a [`ClusterTask`] has come.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusterProgress {
    pub processed: usize,
    pub total: usize,
}

impl ClusterProgress {
    pub fn is_complete(&self) -> bool {
        self.processed >= self.total
    }
}

/// Resumable cluster computation.
#[derive(Debug, Clone)]
pub struct ClusterTask {
    config: ClusterConfig,
    terms: Vec<String>,
    term_docs: Vec<Vec<usize>>,
    doc_terms: Vec<Vec<usize>>,
    /// Term ids by descending count; ties keep first occurrence.
    order: Vec<usize>,
    rank: Vec<usize>,
    cursor: usize,
    assigned: Vec<bool>,
    cooccurrence: Vec<usize>,
    map: ClusterMap,
}

impl ClusterTask {
    pub fn new(corpus: &Corpus, tokenizer: &Tokenizer, config: ClusterConfig) -> Self {
        let mut ids: HashMap<String, usize> = HashMap::new();
        let mut terms: Vec<String> = Vec::new();
        let mut counts: Vec<usize> = Vec::new();
        let mut term_docs: Vec<Vec<usize>> = Vec::new();
        let mut doc_terms: Vec<Vec<usize>> = Vec::with_capacity(corpus.len());
        let mut term_frequency: HashMap<String, usize> = HashMap::new();

        for (doc, document) in corpus.docs().iter().enumerate() {
            let mut in_doc = Vec::new();
            for token in tokenizer.tokenize(&document.text) {
                *term_frequency.entry(token.clone()).or_insert(0) += 1;
                if token.chars().count() < config.min_term_length {
                    continue;
                }
                let id = match ids.get(&token) {
                    Some(&id) => id,
                    None => {
                        let id = terms.len();
                        ids.insert(token.clone(), id);
                        terms.push(token);
                        counts.push(0);
                        term_docs.push(Vec::new());
                        id
                    }
                };
                counts[id] += 1;
                if term_docs[id].last() != Some(&doc) {
                    term_docs[id].push(doc);
                    in_doc.push(id);
                }
            }
            doc_terms.push(in_doc);
        }

        let mut order: Vec<usize> = (0..terms.len()).collect();
        // Stable: equal counts stay in first-occurrence order.
        order.sort_by(|&a, &b| counts[b].cmp(&counts[a]));
        let mut rank = vec![0; terms.len()];
        for (position, &id) in order.iter().enumerate() {
            rank[id] = position;
        }

        Self {
            config,
            assigned: vec![false; terms.len()],
            cooccurrence: vec![0; terms.len()],
            terms,
            term_docs,
            doc_terms,
            order,
            rank,
            cursor: 0,
            map: ClusterMap {
                term_frequency,
                ..ClusterMap::default()
            },
        }
    }

    pub fn progress(&self) -> ClusterProgress {
        ClusterProgress {
            processed: self.cursor,
            total: self.order.len(),
        }
    }

    /// Process up to `max_seeds` entries of the seed order.
    pub fn step(&mut self, max_seeds: usize) -> ClusterProgress {
        let end = self.cursor.saturating_add(max_seeds).min(self.order.len());
        while self.cursor < end {
            let seed = self.order[self.cursor];
            self.cursor += 1;
            if !self.assigned[seed] {
                self.grow(seed);
            }
        }
        self.progress()
    }

    fn grow(&mut self, seed: usize) {
        let mut touched = Vec::new();
        for &doc in &self.term_docs[seed] {
            for &term in &self.doc_terms[doc] {
                if term == seed {
                    continue;
                }
                if self.cooccurrence[term] == 0 {
                    touched.push(term);
                }
                self.cooccurrence[term] += 1;
            }
        }

        let threshold = self.term_docs[seed].len() as f64 * self.config.cooccurrence_ratio;
        let mut joined: Vec<usize> = touched
            .iter()
            .copied()
            .filter(|&t| !self.assigned[t] && self.cooccurrence[t] as f64 > threshold)
            .collect();
        joined.sort_by_key(|&t| self.rank[t]);

        for &t in &touched {
            self.cooccurrence[t] = 0;
        }

        if joined.len() + 1 < self.config.min_cluster_size {
            return;
        }

        let label = self.terms[seed].clone();
        let mut members = Vec::with_capacity(joined.len() + 1);
        for id in std::iter::once(seed).chain(joined) {
            self.assigned[id] = true;
            self.map.labels.insert(self.terms[id].clone(), label.clone());
            members.push(self.terms[id].clone());
        }
        self.map.members.insert(label, members);
    }

    /// Run whatever is left and hand over the finished map.
    pub fn finish(mut self) -> ClusterMap {
        self.step(usize::MAX);
        debug!(
            terms = self.terms.len(),
            clusters = self.map.cluster_count(),
            clustered_terms = self.map.len(),
            "built term clusters"
        );
        self.map
    }
}

/// Build the cluster map in one go.
pub fn build_clusters(corpus: &Corpus, tokenizer: &Tokenizer, config: ClusterConfig) -> ClusterMap {
    ClusterTask::new(corpus, tokenizer, config).finish()
}
