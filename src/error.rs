// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types.
//!
//! Only loading, configuration and the remote backend can fail. Queries never
//! return errors: an empty query, an empty corpus or a dangling edge produce
//! empty results or zero scores instead.

use std::path::PathBuf;

use thiserror::Error;

/// Corpus fetch or parse failure. The previously loaded corpus stays active.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read corpus {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid corpus JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Invalid or unreadable engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Failure talking to the remote semantic backend.
///
/// Never surfaces from a search call; it is turned into a local fallback and
/// reported through [`crate::Provenance::LocalFallback`].
#[derive(Debug, Error)]
pub enum RemoteError {
    #[cfg(feature = "remote")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("backend returned status {0}")]
    Status(u16),

    #[error("backend timed out after {0} s")]
    Timeout(u64),

    #[error("backend error: {0}")]
    Backend(String),

    #[error("no remote endpoint configured")]
    NotConfigured,
}

/// Top-level error for callers that want a single type.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Remote(#[from] RemoteError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
