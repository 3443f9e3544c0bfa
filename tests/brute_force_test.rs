// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Pruning soundness: the engine against unpruned enumeration.
//!
//! For small max_n we enumerate every one of the 2^N subsets with plain u64
//! arithmetic and an independent integer square-root, then demand that the
//! pruned search reports exactly the same (mask, root) set. Any branch the
//! check-map tests discard wrongly would show up here as a missing hit.

mod common;

use std::collections::BTreeSet;

use common::run_search;
use factorial_square_search::Variant;
use num_traits::ToPrimitive;

/// Floor square root on u64, independent of the crate's BigUint path.
fn isqrt_u64(n: u64) -> u64 {
    let mut root = (n as f64).sqrt() as u64;
    // f64 has 53 bits of precision; correct the rounding in either direction.
    while root > 0 && root.checked_mul(root).map_or(true, |sq| sq > n) {
        root -= 1;
    }
    while (root + 1).checked_mul(root + 1).is_some_and(|sq| sq <= n) {
        root += 1;
    }
    root
}

/// Every (mask, root) with a square candidate, by exhaustive enumeration.
///
/// Sums fit u64 comfortably: Σ k! for k ≤ 20 is below 2.6 × 10^18.
fn enumerate_unpruned(max_n: usize, variant: Variant) -> BTreeSet<(u64, u64)> {
    assert!(max_n <= 20, "u64 enumeration only sound up to 20 terms");
    let mut factorials = Vec::with_capacity(max_n);
    let mut current: u64 = 1;
    for k in 1..=max_n as u64 {
        current *= k;
        factorials.push(current);
    }

    let offset = match variant {
        Variant::General => 0u64,
        Variant::PlusOne => 1u64,
    };

    let mut hits = BTreeSet::new();
    for subset in 0u64..(1 << max_n) {
        let mut sum = 0u64;
        for (idx, &term) in factorials.iter().enumerate() {
            if (subset >> idx) & 1 == 1 {
                sum += term;
            }
        }
        let candidate = sum + offset;
        if candidate == 0 {
            continue; // trivial empty sum, general variant
        }
        let root = isqrt_u64(candidate);
        if root * root == candidate {
            // Engine masks use bit k for term k!, i.e. subset shifted by one.
            hits.insert((subset << 1, root));
        }
    }
    hits
}

fn assert_engine_matches_enumeration(max_n: usize, variant: Variant) {
    let expected = enumerate_unpruned(max_n, variant);
    let outcome = run_search(max_n, variant);
    let actual: BTreeSet<(u64, u64)> = outcome
        .hits
        .iter()
        .map(|hit| (hit.mask, hit.root.to_u64().expect("root fits u64")))
        .collect();
    assert_eq!(
        actual, expected,
        "pruned search disagrees with enumeration for max_n={} {:?}",
        max_n, variant
    );
    assert_eq!(outcome.hits.len(), expected.len(), "duplicate hits reported");
}

#[test]
fn test_pruning_sound_general_small() {
    for max_n in 1..=8 {
        assert_engine_matches_enumeration(max_n, Variant::General);
    }
}

#[test]
fn test_pruning_sound_plus_one_small() {
    for max_n in 1..=8 {
        assert_engine_matches_enumeration(max_n, Variant::PlusOne);
    }
}

#[test]
fn test_pruning_sound_general_max_n_12() {
    assert_engine_matches_enumeration(12, Variant::General);
}

#[test]
fn test_pruning_sound_plus_one_max_n_12() {
    assert_engine_matches_enumeration(12, Variant::PlusOne);
}

#[test]
fn test_isqrt_u64_edges() {
    assert_eq!(isqrt_u64(0), 0);
    assert_eq!(isqrt_u64(1), 1);
    assert_eq!(isqrt_u64(3), 1);
    assert_eq!(isqrt_u64(4), 2);
    assert_eq!(isqrt_u64(5041), 71);
    let big = 2_432_902_008_176_640_000u64; // 20!
    let root = isqrt_u64(big);
    assert!(root * root <= big);
    assert!((root + 1).checked_mul(root + 1).map_or(true, |sq| sq > big));
}
