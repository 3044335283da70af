// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Remote semantic search with local fallback.
//!
//! The backend is an opaque ranked-list provider. It names verses by
//! reference (`sukta`: an id fragment or a label), which are resolved
//! against the corpus here. The full path for one query:
//!
//! 1. Exact label match → that verse alone
//! 2. No backend → the requested local strategy
//! 3. Backend call. Errors, timeouts, an `error` field or zero resolvable
//!    results → the configured fallback strategy, truncated to
//!    `fallback_limit`
//! 4. Otherwise → resolved results in backend order
//!
//! The outcome's [`Provenance`] says which of these happened.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{exact_label_hit, search, SearchContext};
use crate::error::RemoteError;
use crate::types::{DocIdx, Provenance, ScoreBreakdown, SearchHit, SearchOutcome, Strategy};

/// Request body sent to the backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SemanticRequest {
    pub query: String,
    pub top_k: usize,
    pub include_rag: bool,
}

/// One ranked entry from the backend.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RemoteResult {
    /// Id or label; some backends send bare numbers.
    #[serde(default)]
    pub sukta: serde_json::Value,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub text: Option<String>,
}

impl RemoteResult {
    fn reference(&self) -> Option<String> {
        match &self.sukta {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Response body. Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SemanticResponse {
    #[serde(default)]
    pub results: Vec<RemoteResult>,
    #[serde(default)]
    pub rag_summary: Option<String>,
    /// Verse key → text, used when `results` is empty.
    #[serde(default)]
    pub text_dict: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Anything that answers semantic queries.
pub trait SemanticBackend: Send + Sync {
    fn search(&self, request: &SemanticRequest) -> Result<SemanticResponse, RemoteError>;
}

impl<F> SemanticBackend for F
where
    F: Fn(&SemanticRequest) -> Result<SemanticResponse, RemoteError> + Send + Sync,
{
    fn search(&self, request: &SemanticRequest) -> Result<SemanticResponse, RemoteError> {
        self(request)
    }
}

/// Blocking JSON-over-HTTP backend.
#[cfg(feature = "remote")]
#[derive(Debug, Clone)]
pub struct HttpSemanticBackend {
    endpoint: String,
    timeout_secs: u64,
    http: reqwest::blocking::Client,
}

#[cfg(feature = "remote")]
impl HttpSemanticBackend {
    pub fn new(config: &crate::config::RemoteConfig) -> Result<Self, RemoteError> {
        let endpoint = config.endpoint.clone().ok_or(RemoteError::NotConfigured)?;
        let http = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            endpoint,
            timeout_secs: config.timeout_secs,
            http,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn classify(&self, err: reqwest::Error) -> RemoteError {
        if err.is_timeout() {
            RemoteError::Timeout(self.timeout_secs)
        } else {
            RemoteError::Http(err)
        }
    }
}

#[cfg(feature = "remote")]
impl SemanticBackend for HttpSemanticBackend {
    fn search(&self, request: &SemanticRequest) -> Result<SemanticResponse, RemoteError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<SemanticResponse>()
                .ok()
                .and_then(|body| body.error);
            return Err(match message {
                Some(message) => RemoteError::Backend(message),
                None => RemoteError::Status(status.as_u16()),
            });
        }

        response.json().map_err(|e| self.classify(e))
    }
}

/// Full query path: exact label, remote backend, local fallback.
///
/// `strategy` applies when no backend is given. With a backend, a failed
/// call runs `config.remote.fallback_strategy` instead.
pub fn search_with_backend(
    ctx: &SearchContext<'_>,
    query: &str,
    strategy: Strategy,
    backend: Option<&dyn SemanticBackend>,
) -> SearchOutcome {
    if query.trim().is_empty() {
        return SearchOutcome::local(Vec::new(), strategy);
    }

    if let Some(hit) = exact_label_hit(ctx.corpus, query) {
        debug!(id = %hit.id, "exact label match");
        return SearchOutcome {
            hits: vec![hit],
            provenance: Provenance::ExactLabel,
            rag_summary: None,
        };
    }

    let Some(backend) = backend else {
        return SearchOutcome::local(search(ctx, query, strategy), strategy);
    };

    let remote = &ctx.config.remote;
    let request = SemanticRequest {
        query: query.to_string(),
        top_k: remote.top_k,
        include_rag: remote.include_rag,
    };

    let response = match backend.search(&request) {
        Ok(response) => response,
        Err(err) => return fallback(ctx, query, err.to_string(), None),
    };
    if let Some(message) = response.error {
        let reason = RemoteError::Backend(message).to_string();
        return fallback(ctx, query, reason, response.rag_summary);
    }

    let hits = resolve(ctx, &response.results, response.text_dict.as_ref());
    if hits.is_empty() {
        return fallback(
            ctx,
            query,
            "backend returned no resolvable results".to_string(),
            response.rag_summary,
        );
    }

    debug!(hits = hits.len(), "remote search");
    SearchOutcome {
        hits,
        provenance: Provenance::Remote,
        rag_summary: response.rag_summary,
    }
}

fn fallback(
    ctx: &SearchContext<'_>,
    query: &str,
    reason: String,
    rag_summary: Option<String>,
) -> SearchOutcome {
    let strategy = ctx.config.remote.fallback_strategy;
    warn!(%reason, %strategy, "remote search failed; using local fallback");
    let mut hits = search(ctx, query, strategy);
    hits.truncate(ctx.config.remote.fallback_limit);
    SearchOutcome {
        hits,
        provenance: Provenance::LocalFallback { strategy, reason },
        rag_summary,
    }
}

/// Map backend references to corpus documents, dropping unknown and repeated ones.
fn resolve(
    ctx: &SearchContext<'_>,
    results: &[RemoteResult],
    text_dict: Option<&BTreeMap<String, String>>,
) -> Vec<SearchHit> {
    let references: Vec<(String, Option<f64>)> = if !results.is_empty() {
        results
            .iter()
            .filter_map(|r| r.reference().map(|reference| (reference, r.score)))
            .collect()
    } else {
        let prefix = ctx.corpus.names().prefix();
        text_dict
            .into_iter()
            .flat_map(|dict| dict.keys())
            .map(|key| (format!("{} {}", prefix, key), None))
            .collect()
    };

    let mut seen: Vec<DocIdx> = Vec::new();
    let mut hits = Vec::new();
    for (reference, score) in references {
        let Some(idx) = ctx.corpus.resolve_reference(&reference) else {
            debug!(%reference, "unresolved remote reference");
            continue;
        };
        if seen.contains(&idx) {
            continue;
        }
        seen.push(idx);
        if let Some(doc) = ctx.corpus.get(idx) {
            hits.push(SearchHit {
                doc: idx,
                id: doc.id.clone(),
                score: score.unwrap_or(0.0),
                breakdown: ScoreBreakdown::Remote { score },
                matched_term: None,
            });
        }
    }
    hits
}
