// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The corpus store: documents plus the weighted reference graph.
//!
//! A corpus is immutable once built. Reloading means building a new one and
//! swapping it in (see [`crate::Engine`]). Construction resolves every edge to
//! document positions up front so the scoring code never deals with strings:
//!
//! - edges whose source or target id is unknown are dropped and counted in
//!   [`Corpus::skipped_edges`]
//! - duplicate document ids keep the first occurrence
//!
//! Two adjacency views are kept: `outgoing` (edge direction as given, used by
//! importance propagation and the outgoing neighborhood mode) and `undirected`
//! (both directions, used by proximity scoring and the default neighborhood).

mod document;
pub mod names;

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::LoadError;
use crate::types::DocIdx;

pub use document::{CorpusData, Document, Relation};
pub use names::NameNormalizer;

/// An edge resolved to document positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub source: DocIdx,
    pub target: DocIdx,
    pub weight: f64,
}

/// A direct neighbor of some document, for popup-style listings.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub doc: DocIdx,
    pub id: String,
    pub name: String,
    pub weight: f64,
}

/// Documents and resolved relations for one load.
#[derive(Debug, Clone)]
pub struct Corpus {
    docs: Vec<Document>,
    links: Vec<Link>,
    id_index: HashMap<String, DocIdx>,
    outgoing: Vec<Vec<(DocIdx, f64)>>,
    undirected: Vec<Vec<(DocIdx, f64)>>,
    skipped_edges: usize,
    names: NameNormalizer,
}

impl Corpus {
    /// Index raw corpus data. Never fails: malformed references are skipped.
    pub fn from_data(data: CorpusData, names: NameNormalizer) -> Self {
        let CorpusData { nodes, edges } = data;

        let mut docs = Vec::with_capacity(nodes.len());
        let mut id_index = HashMap::with_capacity(nodes.len());
        for doc in nodes {
            if id_index.contains_key(&doc.id) {
                warn!(id = %doc.id, "duplicate document id; keeping first occurrence");
                continue;
            }
            id_index.insert(doc.id.clone(), DocIdx::from(docs.len()));
            docs.push(doc);
        }

        let mut links = Vec::with_capacity(edges.len());
        let mut outgoing = vec![Vec::new(); docs.len()];
        let mut undirected = vec![Vec::new(); docs.len()];
        let mut skipped_edges = 0usize;

        for edge in &edges {
            let (Some(&source), Some(&target)) =
                (id_index.get(&edge.source), id_index.get(&edge.target))
            else {
                skipped_edges += 1;
                debug!(source = %edge.source, target = %edge.target, "edge references unknown document");
                continue;
            };
            links.push(Link {
                source,
                target,
                weight: edge.weight,
            });
            outgoing[source.get()].push((target, edge.weight));
            undirected[source.get()].push((target, edge.weight));
            if source != target {
                undirected[target.get()].push((source, edge.weight));
            }
        }

        if skipped_edges > 0 {
            warn!(skipped_edges, "ignored edges with missing endpoints");
        }

        Self {
            docs,
            links,
            id_index,
            outgoing,
            undirected,
            skipped_edges,
            names,
        }
    }

    pub fn from_json_str(raw: &str, names: NameNormalizer) -> Result<Self, LoadError> {
        let data: CorpusData = serde_json::from_str(raw)?;
        Ok(Self::from_data(data, names))
    }

    pub fn from_slice(bytes: &[u8], names: NameNormalizer) -> Result<Self, LoadError> {
        let data: CorpusData = serde_json::from_slice(bytes)?;
        Ok(Self::from_data(data, names))
    }

    /// Read a corpus file. The whole file is consumed; there is no streaming load.
    pub fn from_path(path: impl AsRef<Path>, names: NameNormalizer) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let corpus = Self::from_slice(&bytes, names)?;
        info!(
            path = %path.display(),
            documents = corpus.len(),
            edges = corpus.links.len(),
            "loaded corpus"
        );
        Ok(corpus)
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn docs(&self) -> &[Document] {
        &self.docs
    }

    pub fn get(&self, idx: DocIdx) -> Option<&Document> {
        self.docs.get(idx.get())
    }

    pub fn index_of(&self, id: &str) -> Option<DocIdx> {
        self.id_index.get(id).copied()
    }

    pub fn by_id(&self, id: &str) -> Option<&Document> {
        self.index_of(id).and_then(|idx| self.get(idx))
    }

    /// Valid edges in load order.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Edges dropped because an endpoint was unknown.
    pub fn skipped_edges(&self) -> usize {
        self.skipped_edges
    }

    pub fn outgoing(&self, idx: DocIdx) -> &[(DocIdx, f64)] {
        self.outgoing.get(idx.get()).map_or(&[], Vec::as_slice)
    }

    /// Neighbors in both edge directions. May contain repeats for parallel edges.
    pub fn neighbors(&self, idx: DocIdx) -> &[(DocIdx, f64)] {
        self.undirected.get(idx.get()).map_or(&[], Vec::as_slice)
    }

    pub fn names(&self) -> &NameNormalizer {
        &self.names
    }

    /// Every document directly related to `id`, either direction, in edge order.
    ///
    /// Parallel edges collapse to the first one seen. Unknown ids yield nothing.
    pub fn connections(&self, id: &str) -> Vec<Connection> {
        let Some(idx) = self.index_of(id) else {
            return Vec::new();
        };
        let mut seen = Vec::new();
        let mut out = Vec::new();
        for &(other, weight) in self.neighbors(idx) {
            if other == idx || seen.contains(&other) {
                continue;
            }
            seen.push(other);
            if let Some(doc) = self.get(other) {
                out.push(Connection {
                    doc: other,
                    id: doc.id.clone(),
                    name: self.names.clean(&doc.name),
                    weight,
                });
            }
        }
        out
    }

    /// Edge weights rescaled linearly into `[lo, hi]`, aligned with [`Corpus::links`].
    ///
    /// When every weight is equal the result is `hi` for all edges.
    pub fn normalized_weights(&self, lo: f64, hi: f64) -> Vec<f64> {
        let (min, max) = self
            .links
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), link| {
                (min.min(link.weight), max.max(link.weight))
            });
        self.links
            .iter()
            .map(|link| {
                if max == min {
                    hi
                } else {
                    (link.weight - min) / (max - min) * (hi - lo) + lo
                }
            })
            .collect()
    }

    /// Document whose normalized label key equals the query's, if any.
    pub fn find_by_label(&self, query: &str) -> Option<DocIdx> {
        if query.trim().is_empty() {
            return None;
        }
        let key = self.names.key(query);
        self.docs
            .iter()
            .position(|doc| !doc.name.trim().is_empty() && self.names.key(&doc.name) == key)
            .map(DocIdx::from)
    }

    /// Resolve an external reference (id fragment or label) to a document.
    ///
    /// First document whose id contains the reference, or whose cleaned label
    /// contains the cleaned reference.
    pub fn resolve_reference(&self, reference: &str) -> Option<DocIdx> {
        let reference = reference.trim();
        if reference.is_empty() {
            return None;
        }
        let clean_ref = self.names.clean(reference);
        self.docs
            .iter()
            .position(|doc| {
                doc.id.contains(reference) || self.names.clean(&doc.name).contains(&clean_ref)
            })
            .map(DocIdx::from)
    }
}
