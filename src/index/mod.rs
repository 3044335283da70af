// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Per-load indexes: the data structures built once and read by every query.
//!
//! - **Lexical index**: document frequencies, lengths and per-document term
//!   sets for BM25 / TF-IDF and hybrid matching
//! - **Cluster map**: co-occurrence clusters for query expansion, buildable
//!   in cooperative batches

pub mod cluster;
pub mod lexical;

pub use cluster::{build_clusters, ClusterMap, ClusterProgress, ClusterTask};
pub use lexical::{build_statistics, DocEntry, LexicalIndex, LexicalStats};
