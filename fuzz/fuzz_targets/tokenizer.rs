// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the tokenizer and substring counting.

#![no_main]

use libfuzzer_sys::fuzz_target;
use versegraph::util::{count_occurrences, prepare, Script};
use versegraph::Tokenizer;

fuzz_target!(|text: &str| {
    let tokenizer = Tokenizer::default();
    let prepared = prepare(text);
    let tokens = tokenizer.tokenize(text);

    for token in &tokens {
        // INVARIANT 1: tokens are non-empty, single-script runs of word characters
        assert!(!token.is_empty());
        let mut scripts = token.chars().map(|c| tokenizer.script_of(c));
        let first: Option<Script> = scripts.next().flatten();
        assert!(first.is_some(), "token {:?} starts with a separator", token);
        assert!(scripts.all(|s| s == first), "token {:?} mixes scripts", token);

        // INVARIANT 2: every token occurs in the prepared text
        assert!(count_occurrences(&prepared, token) >= 1);
    }

    // INVARIANT 3: unique terms are a deduplicated subset
    let unique = tokenizer.unique_terms(text);
    assert!(unique.len() <= tokens.len());
    for term in &unique {
        assert!(tokens.contains(term));
    }
});
