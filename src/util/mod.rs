// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Text helpers shared by the index, the cluster builder and the search code.
//!
//! Everything that looks at document text goes through the same tokenizer so
//! that document frequencies, cluster terms and query terms agree on what a
//! "term" is.

pub mod tokenize;

pub use tokenize::{count_occurrences, prepare, Script, Tokenizer, IAST_LETTERS};
