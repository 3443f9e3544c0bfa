// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests.

use factorial_square_search::{
    NullObserver, SearchConfig, SearchEngine, SearchOutcome, SearchTables, Variant,
};
use num_traits::ToPrimitive;

/// Run a full search with the default (empty) seed and no observer output.
pub fn run_search(max_n: usize, variant: Variant) -> SearchOutcome {
    let config = SearchConfig::new(max_n, variant);
    let tables = SearchTables::build(&config).expect("tables should build");
    let engine = SearchEngine::new(&tables, variant);
    engine.run(&config.seeds, &mut NullObserver)
}

/// Hits as (root, equation) pairs, in the outcome's (root-ascending) order.
#[allow(dead_code)]
pub fn summaries(outcome: &SearchOutcome, max_n: usize) -> Vec<(u64, String)> {
    outcome
        .hits
        .iter()
        .map(|hit| {
            (
                hit.root.to_u64().expect("test roots fit in u64"),
                hit.equation(max_n),
            )
        })
        .collect()
}
