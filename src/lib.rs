// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Pruned backtracking search for subsets of {1!, 2!, …, N!} whose sum
//! (optionally + 1) is a perfect square.
//!
//! Related to the OEIS families on sums of factorials equal to squares
//! (A014597 and companions). Brute force over the 2^N subsets is hopeless by
//! N ≈ 30; this crate cuts the tree down with precomputed number-theoretic
//! filters.
//!
//! # Architecture
//!
//! The implementation uses a two-tier memory model:
//!
//! ## Tier 1: Tables (immutable)
//!
//! Precomputed data that never changes during search ([`tables`]):
//! - prime sieve, partitioned into *tree* primes (≤ N + 2, tested during
//!   traversal) and *leaf* primes (tested only on full-depth candidates)
//! - quadratic-residue bitmaps per prime
//! - exact factorials and their residues modulo each tree prime
//! - the check map scheduling each tree prime's single in-tree test at the
//!   last depth where its residue can still change
//!
//! ## Tier 2: Traversal state (mutable)
//!
//! The engine ([`engine`]) walks an explicit LIFO stack of nodes, each owning
//! its partial sum, residue vector and inclusion mask. Branches that can no
//! longer reach a quadratic residue modulo a due prime are pruned before any
//! state is copied. Full-depth survivors go through the candidate validator
//! ([`validate`]): mod-64 set membership, leaf-prime residue tests, then the
//! exact integer square-root test.
//!
//! # Parallelization
//!
//! The tree is embarrassingly parallel at any fixed shallow depth: every
//! [`config::Seed`] materializes into an independent root node, and tables
//! are shared read-only. The reference behavior is single-threaded; seeds
//! are the partitioning hook.
//!
//! # Example
//!
//! ```
//! use factorial_square_search::{
//!     NullObserver, SearchConfig, SearchEngine, SearchTables, Variant,
//! };
//!
//! let config = SearchConfig::new(3, Variant::General);
//! let tables = SearchTables::build(&config).unwrap();
//! let engine = SearchEngine::new(&tables, Variant::General);
//! let outcome = engine.run(&config.seeds, &mut NullObserver);
//!
//! // 1! = 1^2 and 1! + 2! + 3! = 3^2
//! let equations: Vec<String> = outcome.hits.iter().map(|h| h.equation(3)).collect();
//! assert_eq!(equations, vec!["1!", "1! + 2! + 3!"]);
//! ```

pub mod config;
pub mod engine;
pub mod results;
pub mod tables;
pub mod validate;

// Re-export commonly used types
pub use config::{ConfigError, SearchConfig, Seed, Variant};
pub use engine::{
    ConsoleObserver, NullObserver, Progress, SearchEngine, SearchObserver, SearchOutcome,
    SearchSignal,
};
pub use results::{decode_mask, Hit, ResultCollector};
pub use tables::SearchTables;
