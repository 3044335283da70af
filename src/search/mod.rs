// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Ranking: turning a query into an ordered list of verses.
//!
//! Four local strategies share one [`SearchContext`]:
//!
//! | Strategy     | Matches                         | Score |
//! |--------------|---------------------------------|-------|
//! | `tfidf`      | any query term as a substring   | `Σ tf · ln(N / (df + 1))` |
//! | `bm25`       | any query term as a substring   | Okapi BM25 |
//! | `hybrid`     | any expanded term as a token    | `bm25·100 + cluster bonus + 10 / closest edge` |
//! | `importance` | the whole query as a substring  | static importance |
//!
//! On top of those, [`search_with_backend`] adds the exact-label shortcut and
//! the remote semantic backend with its local fallback.
//!
//! Every function here is infallible. Empty queries, empty corpora and
//! queries that match nothing all give an empty list.

mod exact;
mod hybrid;
mod lexical;
pub mod remote;

use crate::config::EngineConfig;
use crate::corpus::Corpus;
use crate::index::{ClusterMap, LexicalIndex};
use crate::scoring::importance::ImportanceScores;
use crate::types::{SearchHit, Strategy};

pub use exact::exact_label_hit;
pub use hybrid::search_hybrid;
pub use lexical::{search_bm25, search_importance, search_tfidf};
pub use remote::{search_with_backend, SemanticBackend, SemanticRequest, SemanticResponse};

#[cfg(feature = "remote")]
pub use remote::HttpSemanticBackend;

/// Everything a query reads. Borrowed from one engine snapshot.
#[derive(Debug, Clone, Copy)]
pub struct SearchContext<'a> {
    pub corpus: &'a Corpus,
    pub lexical: &'a LexicalIndex,
    pub importance: &'a ImportanceScores,
    /// `None` while clusters are still building: hybrid search then runs
    /// without expansion and never awards the cluster bonus.
    pub clusters: Option<&'a ClusterMap>,
    pub config: &'a EngineConfig,
}

/// Run one local strategy.
pub fn search(ctx: &SearchContext<'_>, query: &str, strategy: Strategy) -> Vec<SearchHit> {
    match strategy {
        Strategy::Tfidf => search_tfidf(ctx, query),
        Strategy::Bm25 => search_bm25(ctx, query),
        Strategy::Hybrid => search_hybrid(ctx, query),
        Strategy::Importance => search_importance(ctx, query),
    }
}
