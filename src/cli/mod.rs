// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the versegraph command-line interface.
//!
//! Every subcommand takes a corpus JSON file (`{nodes, edges}`), loads it into
//! an engine and answers one question about it: ranked search, proximity
//! tiers, importance ranking, term clusters, a connection summary, or corpus
//! statistics. `--json` switches any of them to machine-readable output on
//! stdout; logs always go to stderr.

pub mod display;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use versegraph::Strategy;

#[derive(Parser)]
#[command(
    name = "versegraph",
    about = "Relevance ranking and graph proximity over a verse corpus",
    version
)]
pub struct Cli {
    /// Engine configuration (JSON). Missing fields take defaults.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log verbosity on stderr (-v info, -vv debug). VERSEGRAPH_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Print JSON instead of formatted tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank verses against a free-text query
    Search {
        /// Corpus JSON file
        corpus: PathBuf,

        /// Query text
        query: String,

        /// Ranking strategy
        #[arg(short, long, value_enum, default_value_t = Strategy::Hybrid)]
        strategy: Strategy,

        /// Maximum number of results to print
        #[arg(short = 'n', long, default_value = "10")]
        limit: usize,

        /// Semantic search endpoint; overrides the config
        #[arg(long, value_name = "URL")]
        remote: Option<String>,

        /// Remote call timeout in seconds
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,

        /// Search before term clusters finish (no query expansion)
        #[arg(long)]
        no_wait: bool,
    },

    /// Show proximity tiers around one verse
    Neighbors {
        /// Corpus JSON file
        corpus: PathBuf,

        /// Selected verse id
        id: String,

        /// Maximum tier depth
        #[arg(short, long)]
        depth: Option<usize>,

        /// Follow only outgoing edges
        #[arg(long)]
        outgoing: bool,
    },

    /// List verses by static importance
    Rank {
        /// Corpus JSON file
        corpus: PathBuf,

        /// Maximum number of verses to print
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },

    /// Show term clusters used for query expansion
    Clusters {
        /// Corpus JSON file
        corpus: PathBuf,

        /// Only the cluster containing this term
        #[arg(short, long)]
        term: Option<String>,

        /// Maximum number of clusters to print
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },

    /// Summarize the verses connected to one verse
    Summary {
        /// Corpus JSON file
        corpus: PathBuf,

        /// Selected verse id
        id: String,
    },

    /// Print corpus and index statistics
    Inspect {
        /// Corpus JSON file
        corpus: PathBuf,
    },
}
