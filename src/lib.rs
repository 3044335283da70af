// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Relevance ranking and graph proximity for verse corpora.
//!
//! A corpus is a set of verses (id, label, text, optional content) plus
//! weighted directed relations between them. Loading one builds everything
//! queries need: PageRank-style importance, lexical statistics for BM25 and
//! TF-IDF, and term co-occurrence clusters for query expansion. Queries then
//! rank verses by one of four strategies, classify a verse's neighborhood
//! into hop-distance tiers, or summarize its connections in a few phrases.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  corpus/    │────▶│  index/      │────▶│  search/     │
//! │ (Document,  │     │ (lexical,    │     │ (tfidf, bm25,│
//! │  Relation,  │     │  clusters)   │     │  hybrid,     │
//! │  adjacency) │     └──────────────┘     │  importance, │
//! └─────────────┘            ▲             │  remote)     │
//!        │                   │             └──────────────┘
//!        ▼                   │                    ▲
//! ┌─────────────┐     ┌──────────────┐            │
//! │  graph/     │     │  scoring/    │────────────┘
//! │ (tiers,     │     │ (bm25 math,  │
//! │  proximity) │     │  importance) │
//! └─────────────┘     └──────────────┘
//!        │                   │
//!        ▼                   ▼
//! ┌─────────────────────────────────────────────────────┐
//! │                     engine.rs                        │
//! │  (Snapshot swap, background clusters, backend)      │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use versegraph::{Engine, EngineConfig, Strategy};
//!
//! let engine = Engine::new(EngineConfig::default())?;
//! engine.load_path("rigveda.json")?;
//!
//! let outcome = engine.search("agni priest", Strategy::Hybrid);
//! for hit in &outcome.hits {
//!     println!("{} {:.3}", hit.id, hit.score);
//! }
//!
//! let tiers = engine.neighborhood("1.1");
//! println!("{} direct neighbors", tiers.tier1().len());
//! # Ok::<(), versegraph::Error>(())
//! ```

pub mod config;
pub mod corpus;
pub mod engine;
pub mod error;
pub mod graph;
pub mod index;
pub mod scoring;
pub mod search;
pub mod summary;
pub mod types;
pub mod util;

// Always compiled so integration tests, benches and fuzz targets share it.
pub mod testing;

pub use config::{
    ClusterConfig, EngineConfig, HybridWeights, NeighborhoodConfig, RemoteConfig, TokenizerConfig,
};
pub use corpus::{Corpus, CorpusData, Document, NameNormalizer, Relation};
pub use engine::{ClusterHandle, ClusterStatus, Engine, Snapshot};
pub use error::{ConfigError, Error, LoadError, RemoteError};
pub use graph::{classify, min_edge_weight, Neighborhood, TraversalMode};
pub use index::{build_clusters, build_statistics, ClusterMap, ClusterTask, LexicalIndex, LexicalStats};
pub use scoring::{compute_importance, importance_by_id, Bm25Params, ImportanceParams, ImportanceScores};
pub use search::{
    exact_label_hit, search, search_bm25, search_hybrid, search_importance, search_tfidf,
    search_with_backend, SearchContext, SemanticBackend, SemanticRequest, SemanticResponse,
};
#[cfg(feature = "remote")]
pub use search::HttpSemanticBackend;
pub use summary::{summarize_connections, summarize_texts, ConnectionSummary};
pub use types::{DocIdx, Provenance, ScoreBreakdown, SearchHit, SearchOutcome, Strategy};
pub use util::Tokenizer;
