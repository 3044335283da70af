// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring and ranking: how search results get their numbers.
//!
//! Two kinds of score live here. The static one, importance, is a property of
//! the reference graph and is computed once per corpus load. The dynamic ones,
//! BM25 and TF-IDF, depend on the query and are computed per search from the
//! statistics in [`crate::index::LexicalIndex`].

mod core;
pub mod importance;
pub mod ranking;

pub use self::core::*;
pub use importance::{compute_importance, importance_by_id, ImportanceParams, ImportanceScores};
pub use ranking::{compare_hits, sort_hits};
