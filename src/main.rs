// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::process;
use std::sync::Arc;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};
use versegraph::{
    ClusterHandle, ClusterMap, Engine, EngineConfig, Provenance, SearchOutcome, Snapshot,
    TraversalMode,
};

mod cli;
use cli::display::{self, BOLD, BOX_WIDTH};
use cli::{Cli, Commands};

type CliResult = Result<(), Box<dyn Error>>;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        display::fail(&e.to_string());
        process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_env("VERSEGRAPH_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> CliResult {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_path(path)?,
        None => EngineConfig::default(),
    };
    let json = cli.json;

    match cli.command {
        Commands::Search {
            corpus,
            query,
            strategy,
            limit,
            remote,
            timeout,
            no_wait,
        } => {
            if remote.is_some() {
                config.remote.endpoint = remote;
            }
            if let Some(secs) = timeout {
                config.remote.timeout_secs = secs;
            }
            let engine = Engine::new(config)?;
            let snapshot = engine.load_path(&corpus)?;
            if !no_wait {
                if let Err(e) = wait_for_clusters(snapshot.clusters()) {
                    display::warn(&format!("{}; searching without query expansion", e));
                }
            }
            let mut outcome = engine.search(&query, strategy);
            outcome.hits.truncate(limit);
            if json {
                print_json(&outcome)
            } else {
                print_search(&snapshot, &query, &outcome);
                Ok(())
            }
        }

        Commands::Neighbors {
            corpus,
            id,
            depth,
            outgoing,
        } => {
            if let Some(depth) = depth {
                config.neighborhood.max_depth = depth;
            }
            if outgoing {
                config.neighborhood.mode = TraversalMode::Outgoing;
            }
            let engine = Engine::new(config)?;
            let snapshot = engine.load_path(&corpus)?;
            if snapshot.corpus().index_of(&id).is_none() {
                display::warn(&format!("unknown verse id `{}`; all tiers are empty", id));
            }
            let neighborhood = engine.neighborhood(&id);
            if json {
                return print_json(&neighborhood);
            }

            display::section_top(&format!("NEIGHBORS OF {}", id));
            display::row(&format!(" mode: {}", neighborhood.mode));
            if neighborhood.tiers().is_empty() {
                display::row(&display::themed(display::GRAY, &[], " (no connected verses)"));
            }
            for (i, tier) in neighborhood.tiers().iter().enumerate() {
                display::section_mid(&format!("TIER {}", i + 1));
                for id in tier {
                    let name = label_of(&snapshot, id);
                    display::row(&format!(
                        " {}  {}",
                        display::tier_label(i + 1),
                        display::truncate(&name, BOX_WIDTH - 6)
                    ));
                }
            }
            display::section_bot();
            Ok(())
        }

        Commands::Rank { corpus, limit } => {
            let engine = Engine::new(config)?;
            let snapshot = engine.load_path(&corpus)?;
            let importance = snapshot.importance();
            let ranked: Vec<RankedVerse> = importance
                .ranked()
                .into_iter()
                .take(limit)
                .filter_map(|(idx, score)| {
                    let doc = snapshot.corpus().get(idx)?;
                    Some(RankedVerse {
                        id: doc.id.clone(),
                        name: snapshot.corpus().names().clean(&doc.name),
                        importance: score,
                    })
                })
                .collect();
            if json {
                return print_json(&ranked);
            }

            display::section_top("IMPORTANCE");
            let convergence = if importance.converged() {
                format!(" converged after {} iteration(s)", importance.iterations())
            } else {
                format!(" stopped at {} iteration(s)", importance.iterations())
            };
            display::row(&display::themed(display::GRAY, &[], &convergence));
            display::section_mid("RANKING");
            for (rank, verse) in ranked.iter().enumerate() {
                display::row(&format!(
                    " {:>3}. {}  {}",
                    rank + 1,
                    display::pad_right(&display::truncate(&verse.name, 40), 40),
                    display::pad_left(&format!("{:.6}", verse.importance), 12)
                ));
            }
            display::section_bot();
            Ok(())
        }

        Commands::Clusters {
            corpus,
            term,
            limit,
        } => {
            let engine = Engine::new(config)?;
            let snapshot = engine.load_path(&corpus)?;
            let map = wait_for_clusters(snapshot.clusters())?;

            let selected: Vec<ClusterView> = match &term {
                Some(term) => {
                    let term = term.to_lowercase();
                    match map.label_of(&term) {
                        Some(label) => vec![ClusterView::new(label, map.members(label))],
                        None => {
                            display::warn(&format!("`{}` is not in any cluster", term));
                            Vec::new()
                        }
                    }
                }
                None => {
                    let mut all: Vec<ClusterView> = map
                        .clusters()
                        .into_iter()
                        .map(|(label, members)| ClusterView::new(label, members))
                        .collect();
                    all.sort_by(|a, b| b.members.len().cmp(&a.members.len()));
                    all.truncate(limit);
                    all
                }
            };
            if json {
                return print_json(&selected);
            }

            display::section_top("TERM CLUSTERS");
            display::row(&format!(
                " {} cluster(s) over {} term(s)",
                map.cluster_count(),
                map.len()
            ));
            for cluster in &selected {
                display::section_mid(&cluster.label);
                for line in wrap(&cluster.members.join(", "), BOX_WIDTH - 2) {
                    display::row(&format!(" {}", line));
                }
            }
            display::section_bot();
            Ok(())
        }

        Commands::Summary { corpus, id } => {
            let engine = Engine::new(config)?;
            engine.load_path(&corpus)?;
            let summary = engine
                .summarize(&id)
                .ok_or_else(|| format!("unknown verse id `{}`", id))?;
            if json {
                return print_json(&summary);
            }

            display::section_top(&format!("{} CONNECTIONS", summary.subject));
            for line in summary.to_string().lines() {
                for wrapped in wrap(line, BOX_WIDTH - 2) {
                    display::row(&format!(" {}", wrapped));
                }
            }
            display::section_bot();
            Ok(())
        }

        Commands::Inspect { corpus } => {
            let engine = Engine::new(config)?;
            let snapshot = engine.load_path(&corpus)?;
            let map = wait_for_clusters(snapshot.clusters())?;
            let report = InspectReport::new(&snapshot, &map);
            if json {
                return print_json(&report);
            }

            display::section_top("CORPUS");
            display::row(&format!(" documents        {:>10}", report.documents));
            display::row(&format!(" edges            {:>10}", report.edges));
            display::row(&format!(" skipped edges    {:>10}", report.skipped_edges));
            display::section_mid("LEXICAL INDEX");
            display::row(&format!(" vocabulary       {:>10}", report.vocabulary));
            display::row(&format!(" avg length       {:>10.1}", report.avg_doc_length));
            display::section_mid("IMPORTANCE");
            display::row(&format!(" iterations       {:>10}", report.importance_iterations));
            display::row(&format!(" converged        {:>10}", report.importance_converged));
            display::section_mid("CLUSTERS");
            display::row(&format!(" clusters         {:>10}", report.clusters));
            display::row(&format!(" clustered terms  {:>10}", report.clustered_terms));
            let top = report
                .top_terms
                .iter()
                .map(|(term, count)| format!("{} ({})", term, count))
                .collect::<Vec<_>>()
                .join(", ");
            for line in wrap(&format!("top terms: {}", top), BOX_WIDTH - 2) {
                display::row(&format!(" {}", line));
            }
            display::section_bot();
            Ok(())
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// OUTPUT HELPERS
// ═══════════════════════════════════════════════════════════════════════════

fn print_json<T: Serialize>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_search(snapshot: &Snapshot, query: &str, outcome: &SearchOutcome) {
    display::section_top(&format!("SEARCH \"{}\"", display::truncate(query, 40)));
    display::row(&format!(
        " {}  {} result(s)",
        display::provenance_badge(&outcome.provenance),
        outcome.hits.len()
    ));
    if let Provenance::LocalFallback { reason, .. } = &outcome.provenance {
        display::row(&display::themed(
            display::YELLOW,
            &[],
            &format!(" {}", display::truncate(reason, BOX_WIDTH - 2)),
        ));
    }

    display::section_mid("RESULTS");
    if outcome.hits.is_empty() {
        display::row(&display::themed(display::GRAY, &[], " no matching verses"));
    }
    for (rank, hit) in outcome.hits.iter().enumerate() {
        let name = label_of(snapshot, &hit.id);
        let text = snapshot
            .corpus()
            .get(hit.doc)
            .map(|d| d.text.replace('\n', " "))
            .unwrap_or_default();
        display::row(&format!(
            " {:>2}. {}  {}  {}",
            rank + 1,
            display::score_value(hit.score),
            display::pad_right(&display::themed(display::CYAN, &[BOLD], &display::truncate(&name, 14)), 14),
            display::truncate(&text, 38)
        ));
        display::row(&format!("     {}", display::breakdown_line(&hit.breakdown)));
    }

    if let Some(summary) = &outcome.rag_summary {
        display::section_mid("SUMMARY");
        for line in wrap(summary, BOX_WIDTH - 2) {
            display::row(&format!(" {}", line));
        }
    }
    display::section_bot();
}

/// Cleaned label, or the id when the verse has none.
fn label_of(snapshot: &Snapshot, id: &str) -> String {
    match snapshot.corpus().by_id(id) {
        Some(doc) if !doc.name.trim().is_empty() => snapshot.corpus().names().clean(&doc.name),
        _ => id.to_string(),
    }
}

/// Greedy word wrap by chars.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let needed = current.chars().count() + word.chars().count() + usize::from(!current.is_empty());
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn cluster_failure(handle: &ClusterHandle) -> String {
    match handle.status() {
        versegraph::ClusterStatus::Failed { reason } => {
            format!("term clusters unavailable: {}", reason)
        }
        _ => "term clusters unavailable".to_string(),
    }
}

#[cfg(feature = "parallel")]
fn wait_for_clusters(handle: &ClusterHandle) -> Result<Arc<ClusterMap>, String> {
    use indicatif::{ProgressBar, ProgressStyle};
    use std::time::Duration;
    use versegraph::ClusterStatus;

    if !atty::is(atty::Stream::Stderr) {
        return handle.wait().ok_or_else(|| cluster_failure(handle));
    }

    let style = ProgressStyle::with_template(
        "{spinner:.cyan} {prefix:<12} [{bar:40.cyan/dim}] {pos}/{len} {msg}",
    )
    .map(|s| s.progress_chars("━━╸"))
    .unwrap_or_else(|_| ProgressStyle::default_bar());
    let pb = ProgressBar::new(0);
    pb.set_style(style);
    pb.set_prefix("Clustering");
    pb.set_message("seed terms...");

    loop {
        if let Some(map) = handle.wait_timeout(Duration::from_millis(50)) {
            pb.finish_and_clear();
            return Ok(map);
        }
        match handle.status() {
            ClusterStatus::InProgress { processed, total } => {
                pb.set_length(total as u64);
                pb.set_position(processed as u64);
            }
            ClusterStatus::Failed { .. } => {
                pb.abandon();
                return Err(cluster_failure(handle));
            }
            _ => {}
        }
    }
}

#[cfg(not(feature = "parallel"))]
fn wait_for_clusters(handle: &ClusterHandle) -> Result<Arc<ClusterMap>, String> {
    handle.wait().ok_or_else(|| cluster_failure(handle))
}

// ═══════════════════════════════════════════════════════════════════════════
// JSON VIEWS
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Serialize)]
struct RankedVerse {
    id: String,
    name: String,
    importance: f64,
}

#[derive(Serialize)]
struct ClusterView {
    label: String,
    members: Vec<String>,
}

impl ClusterView {
    fn new(label: &str, members: &[String]) -> Self {
        Self {
            label: label.to_string(),
            members: members.to_vec(),
        }
    }
}

#[derive(Serialize)]
struct InspectReport {
    documents: usize,
    edges: usize,
    skipped_edges: usize,
    vocabulary: usize,
    avg_doc_length: f64,
    importance_iterations: usize,
    importance_converged: bool,
    clusters: usize,
    clustered_terms: usize,
    top_terms: Vec<(String, usize)>,
}

impl InspectReport {
    fn new(snapshot: &Snapshot, map: &ClusterMap) -> Self {
        let corpus = snapshot.corpus();
        let stats = snapshot.lexical().stats();
        let mut top_terms: Vec<(String, usize)> = map
            .term_frequency()
            .iter()
            .map(|(term, &count)| (term.clone(), count))
            .collect();
        top_terms.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        top_terms.truncate(10);

        Self {
            documents: corpus.len(),
            edges: corpus.links().len(),
            skipped_edges: corpus.skipped_edges(),
            vocabulary: stats.doc_frequency.len(),
            avg_doc_length: stats.avg_doc_length,
            importance_iterations: snapshot.importance().iterations(),
            importance_converged: snapshot.importance().converged(),
            clusters: map.cluster_count(),
            clustered_terms: map.len(),
            top_terms,
        }
    }
}
