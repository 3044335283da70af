// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Engine configuration.
//!
//! Every knob has a default matching the constants the scoring code was tuned
//! with, so an empty JSON object is a valid config. Sub-structs map one-to-one
//! onto components: importance, BM25, tokenizer, clusters, hybrid weights,
//! neighborhood and the remote backend.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::graph::TraversalMode;
use crate::scoring::{Bm25Params, ImportanceParams};
use crate::types::Strategy;

/// Top-level configuration for [`crate::Engine`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub importance: ImportanceParams,
    pub bm25: Bm25Params,
    pub tokenizer: TokenizerConfig,
    pub clusters: ClusterConfig,
    pub hybrid: HybridWeights,
    pub neighborhood: NeighborhoodConfig,
    pub remote: RemoteConfig,
    /// Redundant label prefix stripped during name normalization ("RV 1.1").
    pub name_prefix: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            importance: ImportanceParams::default(),
            bm25: Bm25Params::default(),
            tokenizer: TokenizerConfig::default(),
            clusters: ClusterConfig::default(),
            hybrid: HybridWeights::default(),
            neighborhood: NeighborhoodConfig::default(),
            remote: RemoteConfig::default(),
            name_prefix: "RV".to_string(),
        }
    }
}

/// Which token patterns are active. Runs of different scripts never merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    /// ASCII word characters, extended Latin diacritics and IAST letters.
    pub latin: bool,
    /// The Devanagari block (U+0900..U+097F).
    pub devanagari: bool,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            latin: true,
            devanagari: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterConfig {
    /// Terms shorter than this (in chars) never seed or join a cluster.
    pub min_term_length: usize,
    /// A candidate joins when its co-occurrence count exceeds `seed_docs * ratio`.
    pub cooccurrence_ratio: f64,
    /// Clusters smaller than this are discarded.
    pub min_cluster_size: usize,
    /// Seeds processed per cooperative step.
    pub batch_size: usize,
    /// Build clusters on a rayon worker instead of during load.
    pub background: bool,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            min_term_length: 4,
            cooccurrence_ratio: 0.05,
            min_cluster_size: 3,
            batch_size: 256,
            background: true,
        }
    }
}

/// Multipliers for the three hybrid components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HybridWeights {
    pub bm25_scale: f64,
    pub semantic_bonus: f64,
    pub graph_scale: f64,
}

impl Default for HybridWeights {
    fn default() -> Self {
        Self {
            bm25_scale: 100.0,
            semantic_bonus: 50.0,
            graph_scale: 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NeighborhoodConfig {
    pub mode: TraversalMode,
    pub max_depth: usize,
}

impl Default for NeighborhoodConfig {
    fn default() -> Self {
        Self {
            mode: TraversalMode::Undirected,
            max_depth: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Semantic search endpoint. `None` disables the remote path entirely.
    pub endpoint: Option<String>,
    pub timeout_secs: u64,
    pub top_k: usize,
    pub include_rag: bool,
    /// Local strategy used when the backend fails or finds nothing.
    pub fallback_strategy: Strategy,
    pub fallback_limit: usize,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: 10,
            top_k: 5,
            include_rag: true,
            fallback_strategy: Strategy::Hybrid,
            fallback_limit: 5,
        }
    }
}

impl EngineConfig {
    /// Read and validate a JSON config file. Missing fields take defaults.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the math meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: &str) -> Result<(), ConfigError> {
            Err(ConfigError::Invalid {
                field,
                reason: reason.to_string(),
            })
        }

        let imp = &self.importance;
        if !(0.0..=1.0).contains(&imp.damping_factor) {
            return invalid("importance.damping_factor", "must be within [0, 1]");
        }
        if !(imp.tolerance > 0.0) {
            return invalid("importance.tolerance", "must be positive");
        }
        if !(self.bm25.k1 >= 0.0) {
            return invalid("bm25.k1", "must be non-negative");
        }
        if !(0.0..=1.0).contains(&self.bm25.b) {
            return invalid("bm25.b", "must be within [0, 1]");
        }
        if !self.tokenizer.latin && !self.tokenizer.devanagari {
            return invalid("tokenizer", "at least one token pattern must be enabled");
        }
        if !(self.clusters.cooccurrence_ratio >= 0.0) {
            return invalid("clusters.cooccurrence_ratio", "must be non-negative");
        }
        if self.clusters.min_cluster_size < 2 {
            return invalid("clusters.min_cluster_size", "must be at least 2");
        }
        if self.clusters.batch_size == 0 {
            return invalid("clusters.batch_size", "must be at least 1");
        }
        if self.neighborhood.max_depth == 0 {
            return invalid("neighborhood.max_depth", "must be at least 1");
        }
        if self.remote.timeout_secs == 0 {
            return invalid("remote.timeout_secs", "must be at least 1");
        }
        Ok(())
    }
}
