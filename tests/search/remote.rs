// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Remote backend path: resolution, pass-through and local fallback.

use std::sync::Mutex;

use crate::common::{foreground_config, hymns, ids, Indexed};
use versegraph::{
    search_with_backend, Provenance, RemoteError, ScoreBreakdown, SemanticBackend,
    SemanticRequest, SemanticResponse, Strategy,
};

type Reply = Result<SemanticResponse, RemoteError>;

/// Backend that always answers with the given JSON body.
fn respond(json: &'static str) -> impl Fn(&SemanticRequest) -> Reply + Send + Sync {
    move |_| Ok(serde_json::from_str(json).expect("valid response fixture"))
}

fn run(indexed: &Indexed, query: &str, backend: &dyn SemanticBackend) -> versegraph::SearchOutcome {
    search_with_backend(&indexed.ctx(), query, Strategy::Bm25, Some(backend))
}

#[test]
fn test_results_resolve_in_backend_order() {
    let indexed = Indexed::new(hymns());
    let backend = respond(
        r#"{
            "results": [
                {"sukta": "1.33", "score": 0.9},
                {"sukta": "9.1", "score": 0.5},
                {"sukta": "nope", "score": 0.4},
                {"sukta": "1.33", "score": 0.1}
            ],
            "rag_summary": "Indra and Soma."
        }"#,
    );
    let outcome = run(&indexed, "who slew vritra", &backend);
    assert_eq!(outcome.provenance, Provenance::Remote);
    assert_eq!(ids(&outcome.hits), vec!["1.33", "9.1"]);
    assert_eq!(outcome.hits[0].score, 0.9);
    assert_eq!(
        outcome.hits[1].breakdown,
        ScoreBreakdown::Remote { score: Some(0.5) }
    );
    assert_eq!(outcome.rag_summary.as_deref(), Some("Indra and Soma."));
}

#[test]
fn test_numeric_and_label_references() {
    let indexed = Indexed::new(hymns());
    let backend = respond(r#"{"results": [{"sukta": 10.129}, {"sukta": "RV 1.12"}]}"#);
    let outcome = run(&indexed, "creation", &backend);
    assert_eq!(ids(&outcome.hits), vec!["10.129", "1.12"]);
    assert_eq!(outcome.hits[0].score, 0.0);
    assert_eq!(outcome.hits[0].breakdown, ScoreBreakdown::Remote { score: None });
}

#[test]
fn test_text_dict_used_when_results_empty() {
    let indexed = Indexed::new(hymns());
    let backend = respond(
        r#"{"results": [], "text_dict": {"9.1": "soma flows", "1.32": "indra slew"}}"#,
    );
    let outcome = run(&indexed, "soma", &backend);
    assert_eq!(outcome.provenance, Provenance::Remote);
    // Keys come back sorted.
    assert_eq!(ids(&outcome.hits), vec!["1.32", "9.1"]);
}

#[test]
fn test_error_field_falls_back_locally() {
    let indexed = Indexed::new(hymns());
    let backend = respond(r#"{"error": "index offline"}"#);
    let outcome = run(&indexed, "thunderbolt", &backend);
    match &outcome.provenance {
        Provenance::LocalFallback { strategy, reason } => {
            assert_eq!(*strategy, Strategy::Hybrid);
            assert!(reason.contains("index offline"), "{}", reason);
        }
        other => panic!("expected fallback, got {:?}", other),
    }
    let found = ids(&outcome.hits);
    assert!(found.contains(&"1.32") && found.contains(&"1.33"), "{:?}", found);
    assert!(found.len() <= 5);
}

#[test]
fn test_transport_error_falls_back_locally() {
    let indexed = Indexed::new(hymns());
    let backend = |_: &SemanticRequest| -> Reply { Err(RemoteError::Timeout(3)) };
    let outcome = run(&indexed, "agni", &backend);
    match &outcome.provenance {
        Provenance::LocalFallback { reason, .. } => {
            assert_eq!(reason, "backend timed out after 3 s");
        }
        other => panic!("expected fallback, got {:?}", other),
    }
    assert!(!outcome.hits.is_empty());
}

#[test]
fn test_unresolvable_results_fall_back() {
    let indexed = Indexed::new(hymns());
    let backend = respond(r#"{"results": [{"sukta": "nowhere"}], "rag_summary": "kept"}"#);
    let outcome = run(&indexed, "agni", &backend);
    assert!(matches!(
        outcome.provenance,
        Provenance::LocalFallback { .. }
    ));
    assert_eq!(outcome.rag_summary.as_deref(), Some("kept"));
}

#[test]
fn test_fallback_respects_limit_and_strategy() {
    let mut config = foreground_config();
    config.remote.fallback_limit = 1;
    config.remote.fallback_strategy = Strategy::Bm25;
    let indexed = Indexed::with_config(hymns(), config);
    let backend = respond(r#"{}"#);
    let outcome = run(&indexed, "indra soma", &backend);
    assert_eq!(ids(&outcome.hits), vec!["9.1"]);
    assert!(matches!(
        outcome.provenance,
        Provenance::LocalFallback {
            strategy: Strategy::Bm25,
            ..
        }
    ));
}

#[test]
fn test_request_carries_remote_settings() {
    let mut config = foreground_config();
    config.remote.top_k = 7;
    config.remote.include_rag = false;
    let indexed = Indexed::with_config(hymns(), config);

    let seen: Mutex<Option<SemanticRequest>> = Mutex::new(None);
    let backend = |request: &SemanticRequest| -> Reply {
        *seen.lock().unwrap() = Some(request.clone());
        Ok(SemanticResponse::default())
    };
    run(&indexed, "dawn", &backend);

    let request = seen.lock().unwrap().clone().expect("backend was called");
    assert_eq!(request.query, "dawn");
    assert_eq!(request.top_k, 7);
    assert!(!request.include_rag);
}

#[test]
fn test_exact_label_skips_backend() {
    let indexed = Indexed::new(hymns());
    let backend = |_: &SemanticRequest| -> Reply { panic!("backend must not be called") };
    let outcome = run(&indexed, "RV 9.1", &backend);
    assert_eq!(outcome.provenance, Provenance::ExactLabel);
    assert_eq!(ids(&outcome.hits), vec!["9.1"]);
}

#[test]
fn test_no_backend_runs_requested_strategy() {
    let indexed = Indexed::new(hymns());
    let outcome = search_with_backend(&indexed.ctx(), "thunderbolt", Strategy::Tfidf, None);
    assert_eq!(
        outcome.provenance,
        Provenance::Local {
            strategy: Strategy::Tfidf
        }
    );
    assert_eq!(outcome.hits.len(), 2);
}
