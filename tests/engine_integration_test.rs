// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Integration tests for the search engine surface.
//!
//! These tests validate that the engine correctly:
//! - Produces identical results across reruns (idempotence)
//! - Accounts for the full idealized tree when exhausted
//! - Reports hits through the injected observer
//! - Honors cooperative cancellation at the progress cadence
//! - Partitions the tree cleanly across seeds

mod common;

use common::run_search;
use factorial_square_search::{
    Hit, NullObserver, Progress, SearchConfig, SearchEngine, SearchObserver, SearchSignal,
    SearchTables, Seed, Variant,
};
use num_bigint::BigUint;

#[test]
fn test_identical_reruns_yield_identical_hits() {
    for variant in [Variant::General, Variant::PlusOne] {
        let first = run_search(11, variant);
        let second = run_search(11, variant);
        assert_eq!(first.hits, second.hits, "variant {:?}", variant);
        assert_eq!(first.nodes_visited, second.nodes_visited);
    }
}

#[test]
fn test_exhausted_search_accounts_for_whole_tree() {
    for variant in [Variant::General, Variant::PlusOne] {
        let outcome = run_search(12, variant);
        assert!(!outcome.cancelled);
        // Weights are dyadic rationals, so the sum is exact in f64.
        assert_eq!(outcome.done, 1.0, "variant {:?}", variant);
    }
}

/// Observer that records every hit it is notified of.
#[derive(Default)]
struct HitRecorder {
    hits: Vec<(Hit, BigUint)>,
}

impl SearchObserver for HitRecorder {
    fn on_hit(&mut self, hit: &Hit, candidate: &BigUint) {
        self.hits.push((hit.clone(), candidate.clone()));
    }
}

#[test]
fn test_observer_sees_every_hit_with_candidate_value() {
    let config = SearchConfig::new(3, Variant::PlusOne);
    let tables = SearchTables::build(&config).unwrap();
    let engine = SearchEngine::new(&tables, Variant::PlusOne);
    let mut recorder = HitRecorder::default();
    let outcome = engine.run(&config.seeds, &mut recorder);

    assert_eq!(recorder.hits.len(), outcome.hits.len());
    for (hit, candidate) in &recorder.hits {
        // The reported candidate is exactly root squared.
        assert_eq!(&(&hit.root * &hit.root), candidate);
        assert!(outcome.hits.contains(hit));
    }
}

/// Observer that cancels on its first progress report.
#[derive(Default)]
struct CancelImmediately {
    calls: usize,
}

impl SearchObserver for CancelImmediately {
    fn on_progress(&mut self, _progress: &Progress) -> SearchSignal {
        self.calls += 1;
        SearchSignal::Cancel
    }
}

#[test]
fn test_cancellation_stops_at_progress_cadence() {
    let config = SearchConfig::new(14, Variant::General);
    let tables = SearchTables::build(&config).unwrap();
    let engine = SearchEngine::new(&tables, Variant::General).with_progress_interval(16);
    let mut observer = CancelImmediately::default();
    let outcome = engine.run(&config.seeds, &mut observer);

    assert!(outcome.cancelled);
    assert_eq!(observer.calls, 1);
    assert!(outcome.done < 1.0);
    // Exactly one batch ran before the cancellation took effect.
    assert_eq!(outcome.nodes_visited, 16);
}

#[test]
fn test_complementary_seeds_cover_the_whole_tree() {
    // Splitting on the first decision (include vs. exclude 1!) must find the
    // same hits as the empty seed, with no overlap between the partitions.
    let max_n = 10;
    let config = SearchConfig::new(max_n, Variant::General);
    let tables = SearchTables::build(&config).unwrap();
    let engine = SearchEngine::new(&tables, Variant::General);

    let whole = engine.run(&[Seed::empty()], &mut NullObserver);
    let with_one = engine.run(&[Seed { depth: 1, mask: 0b10 }], &mut NullObserver);
    let without_one = engine.run(&[Seed { depth: 1, mask: 0 }], &mut NullObserver);

    let mut merged = with_one.hits.clone();
    merged.extend(without_one.hits.clone());
    merged.sort_by(|a, b| a.root.cmp(&b.root).then(a.mask.cmp(&b.mask)));
    assert_eq!(merged, whole.hits);

    for hit in &with_one.hits {
        assert!(!without_one.hits.contains(hit), "partitions overlap");
    }

    // Running both seeds in one engine call merges the same way.
    let both = engine.run(
        &[Seed { depth: 1, mask: 0b10 }, Seed { depth: 1, mask: 0 }],
        &mut NullObserver,
    );
    assert_eq!(both.hits, whole.hits);
    assert_eq!(both.done, 1.0);
}
