// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The engine: one active corpus snapshot, queried concurrently.
//!
//! A [`Snapshot`] bundles a corpus with everything derived from it (lexical
//! index, importance, term clusters). Loading builds a complete new snapshot
//! off to the side and swaps it in under a write lock held only for the
//! pointer swap, so queries in flight keep the `Arc` they started with and
//! a failed load leaves the previous snapshot untouched.
//!
//! Term clusters are the slow part. With `clusters.background` set (and the
//! `parallel` feature), they are built on a rayon worker in batches of
//! `clusters.batch_size` seeds. Until they are ready, hybrid search runs
//! without expansion. [`ClusterHandle`] exposes the state and lets callers
//! block until it is ready.
//!
//! ```text
//! Pending ──▶ InProgress { processed, total } ──▶ Ready(map)
//!                        └────────────────────────▶ Failed(reason)
//! ```
//!
//! The partially built map never leaves the worker. A worker that panics
//! publishes `Failed`, so waiters always wake up.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Condvar, Mutex, RwLock};
use serde::Serialize;
use tracing::{debug, error, info};

use crate::config::EngineConfig;
use crate::corpus::{Corpus, CorpusData, NameNormalizer};
use crate::error::{Error, LoadError};
use crate::graph::{classify, Neighborhood, TraversalMode};
use crate::index::{ClusterMap, ClusterProgress, ClusterTask, LexicalIndex};
use crate::scoring::importance::{compute_importance, ImportanceScores};
use crate::search::{search_with_backend, SearchContext, SemanticBackend};
use crate::summary::{summarize_connections, ConnectionSummary};
use crate::types::{SearchOutcome, Strategy};
use crate::util::Tokenizer;

/// Externally visible cluster state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ClusterStatus {
    Pending,
    InProgress { processed: usize, total: usize },
    Ready { clusters: usize, terms: usize },
    Failed { reason: String },
}

#[derive(Debug)]
enum ClusterState {
    Pending,
    InProgress(ClusterProgress),
    Ready(Arc<ClusterMap>),
    Failed(String),
}

#[derive(Debug)]
struct ClusterSlot {
    state: Mutex<ClusterState>,
    ready: Condvar,
}

impl ClusterSlot {
    fn new() -> Self {
        Self {
            state: Mutex::new(ClusterState::Pending),
            ready: Condvar::new(),
        }
    }

    fn run(&self, task: ClusterTask, batch_size: usize) {
        self.run_with(|slot| slot.build(task, batch_size));
    }

    fn build(&self, mut task: ClusterTask, batch_size: usize) -> ClusterMap {
        loop {
            let progress = task.step(batch_size);
            *self.state.lock() = ClusterState::InProgress(progress);
            debug!(processed = progress.processed, total = progress.total, "cluster batch");
            if progress.is_complete() {
                break;
            }
        }
        task.finish()
    }

    /// Run `build` and publish its outcome, panics included.
    fn run_with(&self, build: impl FnOnce(&Self) -> ClusterMap) {
        let state = match panic::catch_unwind(AssertUnwindSafe(|| build(self))) {
            Ok(map) => ClusterState::Ready(Arc::new(map)),
            Err(payload) => {
                let reason = panic_message(payload.as_ref());
                error!(%reason, "term cluster build panicked");
                ClusterState::Failed(reason)
            }
        };
        *self.state.lock() = state;
        self.ready.notify_all();
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "cluster worker panicked".to_string()
    }
}

/// Shared view of one snapshot's cluster build.
#[derive(Debug, Clone)]
pub struct ClusterHandle {
    slot: Arc<ClusterSlot>,
}

impl ClusterHandle {
    pub fn status(&self) -> ClusterStatus {
        match &*self.slot.state.lock() {
            ClusterState::Pending => ClusterStatus::Pending,
            ClusterState::InProgress(p) => ClusterStatus::InProgress {
                processed: p.processed,
                total: p.total,
            },
            ClusterState::Ready(map) => ClusterStatus::Ready {
                clusters: map.cluster_count(),
                terms: map.len(),
            },
            ClusterState::Failed(reason) => ClusterStatus::Failed {
                reason: reason.clone(),
            },
        }
    }

    /// The finished map, if ready.
    pub fn get(&self) -> Option<Arc<ClusterMap>> {
        match &*self.slot.state.lock() {
            ClusterState::Ready(map) => Some(Arc::clone(map)),
            _ => None,
        }
    }

    /// Block until the build is done. `None` when it failed.
    pub fn wait(&self) -> Option<Arc<ClusterMap>> {
        let mut state = self.slot.state.lock();
        loop {
            match &*state {
                ClusterState::Ready(map) => return Some(Arc::clone(map)),
                ClusterState::Failed(_) => return None,
                _ => self.slot.ready.wait(&mut state),
            }
        }
    }

    /// Block for at most `timeout`. `None` on timeout or failure; see
    /// [`status`](Self::status) to tell them apart.
    pub fn wait_timeout(&self, timeout: Duration) -> Option<Arc<ClusterMap>> {
        let mut state = self.slot.state.lock();
        loop {
            match &*state {
                ClusterState::Ready(map) => return Some(Arc::clone(map)),
                ClusterState::Failed(_) => return None,
                _ => {}
            }
            if self.slot.ready.wait_for(&mut state, timeout).timed_out() {
                return match &*state {
                    ClusterState::Ready(map) => Some(Arc::clone(map)),
                    _ => None,
                };
            }
        }
    }
}

/// One loaded corpus and its derived indexes. Immutable.
#[derive(Debug)]
pub struct Snapshot {
    generation: u64,
    corpus: Corpus,
    lexical: LexicalIndex,
    importance: ImportanceScores,
    clusters: ClusterHandle,
}

impl Snapshot {
    /// Load counter; increases by one per successful load.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn lexical(&self) -> &LexicalIndex {
        &self.lexical
    }

    pub fn importance(&self) -> &ImportanceScores {
        &self.importance
    }

    pub fn clusters(&self) -> &ClusterHandle {
        &self.clusters
    }

    /// Query context over this snapshot with the given cluster map.
    pub fn context<'a>(
        &'a self,
        config: &'a EngineConfig,
        clusters: Option<&'a ClusterMap>,
    ) -> SearchContext<'a> {
        SearchContext {
            corpus: &self.corpus,
            lexical: &self.lexical,
            importance: &self.importance,
            clusters,
            config,
        }
    }
}

pub struct Engine {
    config: EngineConfig,
    tokenizer: Tokenizer,
    current: RwLock<Option<Arc<Snapshot>>>,
    generation: AtomicU64,
    /// Serializes generation numbering with the swap.
    install: Mutex<()>,
    backend: Option<Box<dyn SemanticBackend>>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("generation", &self.generation.load(Ordering::Relaxed))
            .field("backend", &self.backend.is_some())
            .finish()
    }
}

impl Engine {
    /// Validate the config and, when an endpoint is configured, set up the
    /// HTTP semantic backend.
    pub fn new(config: EngineConfig) -> Result<Self, Error> {
        config.validate()?;

        #[cfg(feature = "remote")]
        let backend: Option<Box<dyn SemanticBackend>> = if config.remote.endpoint.is_some() {
            Some(Box::new(crate::search::HttpSemanticBackend::new(
                &config.remote,
            )?))
        } else {
            None
        };
        #[cfg(not(feature = "remote"))]
        let backend: Option<Box<dyn SemanticBackend>> = {
            if let Some(endpoint) = &config.remote.endpoint {
                tracing::warn!(%endpoint, "built without the `remote` feature; endpoint ignored");
            }
            None
        };

        Ok(Self {
            tokenizer: Tokenizer::new(config.tokenizer),
            config,
            current: RwLock::new(None),
            generation: AtomicU64::new(0),
            install: Mutex::new(()),
            backend,
        })
    }

    /// Replace the semantic backend.
    pub fn with_backend(mut self, backend: impl SemanticBackend + 'static) -> Self {
        self.backend = Some(Box::new(backend));
        self
    }

    pub fn without_backend(mut self) -> Self {
        self.backend = None;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn names(&self) -> NameNormalizer {
        NameNormalizer::new(&self.config.name_prefix)
    }

    /// Read a corpus file and make it the active snapshot.
    ///
    /// On error the previous snapshot stays active.
    pub fn load_path(&self, path: impl AsRef<Path>) -> Result<Arc<Snapshot>, LoadError> {
        let corpus = Corpus::from_path(path, self.names())?;
        Ok(self.install(corpus))
    }

    pub fn load_json_str(&self, raw: &str) -> Result<Arc<Snapshot>, LoadError> {
        let corpus = Corpus::from_json_str(raw, self.names())?;
        Ok(self.install(corpus))
    }

    pub fn load_data(&self, data: CorpusData) -> Arc<Snapshot> {
        self.install(Corpus::from_data(data, self.names()))
    }

    fn install(&self, corpus: Corpus) -> Arc<Snapshot> {
        let lexical = LexicalIndex::build(&corpus, self.tokenizer);
        let importance = compute_importance(&corpus, self.config.importance);

        let task = ClusterTask::new(&corpus, &self.tokenizer, self.config.clusters);
        let slot = Arc::new(ClusterSlot::new());
        self.spawn_clusters(task, Arc::clone(&slot));

        let _install = self.install.lock();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let snapshot = Arc::new(Snapshot {
            generation,
            corpus,
            lexical,
            importance,
            clusters: ClusterHandle { slot },
        });

        *self.current.write() = Some(Arc::clone(&snapshot));
        info!(
            generation,
            documents = snapshot.corpus.len(),
            edges = snapshot.corpus.links().len(),
            "corpus snapshot active"
        );
        snapshot
    }

    fn spawn_clusters(&self, task: ClusterTask, slot: Arc<ClusterSlot>) {
        let batch_size = self.config.clusters.batch_size.max(1);

        #[cfg(feature = "parallel")]
        if self.config.clusters.background {
            rayon::spawn(move || slot.run(task, batch_size));
            return;
        }

        slot.run(task, batch_size);
    }

    /// The active snapshot, if any corpus has been loaded.
    pub fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.current.read().clone()
    }

    /// Search the active snapshot. Nothing loaded gives an empty local outcome.
    pub fn search(&self, query: &str, strategy: Strategy) -> SearchOutcome {
        let Some(snapshot) = self.snapshot() else {
            return SearchOutcome::local(Vec::new(), strategy);
        };
        let clusters = snapshot.clusters.get();
        let ctx = snapshot.context(&self.config, clusters.as_deref());
        search_with_backend(&ctx, query, strategy, self.backend.as_deref())
    }

    /// Search locally, never consulting the backend.
    pub fn search_local(&self, query: &str, strategy: Strategy) -> SearchOutcome {
        let Some(snapshot) = self.snapshot() else {
            return SearchOutcome::local(Vec::new(), strategy);
        };
        let clusters = snapshot.clusters.get();
        let ctx = snapshot.context(&self.config, clusters.as_deref());
        search_with_backend(&ctx, query, strategy, None)
    }

    /// Tiers around `id` with the configured mode and depth.
    pub fn neighborhood(&self, id: &str) -> Neighborhood {
        let n = self.config.neighborhood;
        self.neighborhood_with(id, n.mode, n.max_depth)
    }

    pub fn neighborhood_with(&self, id: &str, mode: TraversalMode, max_depth: usize) -> Neighborhood {
        match self.snapshot() {
            Some(snapshot) => classify(&snapshot.corpus, id, mode, max_depth),
            None => Neighborhood::empty(id, mode, max_depth),
        }
    }

    pub fn summarize(&self, id: &str) -> Option<ConnectionSummary> {
        let snapshot = self.snapshot()?;
        summarize_connections(&snapshot.corpus, id)
    }

    /// Cluster state of the active snapshot; `Pending` before any load.
    pub fn cluster_status(&self) -> ClusterStatus {
        self.snapshot()
            .map_or(ClusterStatus::Pending, |s| s.clusters.status())
    }

    pub fn clusters(&self) -> Option<ClusterHandle> {
        self.snapshot().map(|s| s.clusters.clone())
    }
}
