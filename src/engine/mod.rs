// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Explicit-stack depth-first traversal with residue pruning.
//!
//! The engine walks the binary tree of include/exclude decisions over the
//! terms 1!..max_n!, one [`SearchNode`] per live branch. Before committing to
//! the expensive part of a branch (copying the residue vector and adding an
//! exact factorial to the sum) it consults the check map: each tree prime is
//! tested exactly once, at the last depth where its residue can still change.
//! A branch whose partial sum can no longer be a quadratic residue modulo a
//! due prime is dead along every continuation and is dropped on the spot.
//!
//! # Why an explicit stack
//!
//! The traversal uses a LIFO `Vec` of nodes rather than native recursion:
//! max_n approaches the depth limits of typical call stacks, and the manual
//! stack makes the weight bookkeeping and the cancellation point obvious.
//! Popping order is immaterial for correctness: results are independent of
//! traversal order and sorted at the end.
//!
//! # Progress weights
//!
//! Every node carries the fraction of an idealized balanced binary tree its
//! subtree represents (the root has weight 1, each child half its parent).
//! Pruned and leaf-terminated branches credit their weight to a running done
//! fraction. Weights are dyadic rationals no finer than 2^-max_n, so the
//! accumulated fraction is exact in an f64 and reaches 1.0 per seed when the
//! search is exhausted. The ETA derived from it assumes the tree is balanced,
//! which pruning makes untrue; it is an approximation, documented as such.

pub mod observer;

pub use observer::{ConsoleObserver, NullObserver, Progress, SearchObserver, SearchSignal};

use std::time::{Duration, Instant};

use num_bigint::BigUint;
use num_traits::Zero;

use crate::config::{Seed, Variant};
use crate::results::{Hit, ResultCollector};
use crate::tables::SearchTables;
use crate::validate::CandidateValidator;

/// Default number of internal nodes between observer calls.
///
/// Matches the reporting batch size the search was tuned with; the observer
/// applies its own wall-clock throttle on top.
const DEFAULT_PROGRESS_INTERVAL: u64 = 0x40000;

/// One live branch of the traversal.
///
/// Invariant: `residues[rank] == sum mod tree_primes[rank]` for every rank,
/// and bit k of `mask` is set iff k! contributes to `sum`. The node owns its
/// residue vector and mask; the include branch copies them, the exclude
/// branch inherits them; sibling branches never alias state.
#[derive(Debug)]
struct SearchNode {
    depth: usize,
    sum: BigUint,
    residues: Vec<u32>,
    weight: f64,
    mask: u64,
}

/// What a finished (or cancelled) search produced.
#[derive(Debug)]
pub struct SearchOutcome {
    /// Verified hits, sorted by ascending root.
    pub hits: Vec<Hit>,
    /// Internal nodes expanded.
    pub nodes_visited: u64,
    /// Completed fraction of the idealized tree (1.0 when exhausted).
    pub done: f64,
    /// True if the observer cancelled before exhaustion.
    pub cancelled: bool,
    /// Wall-clock duration of the traversal.
    pub elapsed: Duration,
}

/// The pruned backtracking search over one set of tables.
///
/// The engine borrows the tables read-only; several engines (or several
/// seeds within one engine) can share the same tables without
/// synchronization.
#[derive(Debug)]
pub struct SearchEngine<'a> {
    tables: &'a SearchTables,
    variant: Variant,
    progress_interval: u64,
}

impl<'a> SearchEngine<'a> {
    pub fn new(tables: &'a SearchTables, variant: Variant) -> Self {
        Self {
            tables,
            variant,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }

    /// Override the node-count cadence of observer calls (and therefore of
    /// cancellation checks). Mainly for tests and embedders that want a
    /// tighter cancellation latency.
    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        debug_assert!(interval > 0, "progress interval must be positive");
        self.progress_interval = interval.max(1);
        self
    }

    /// Run the traversal from every seed and collect verified hits.
    ///
    /// Seeds are exhausted in order on a single thread; each seed contributes
    /// its own unit of done-fraction, normalized over the seed count.
    pub fn run(&self, seeds: &[Seed], observer: &mut dyn SearchObserver) -> SearchOutcome {
        let max_n = self.tables.max_n();
        let offset = self.variant.offset();
        let validator = CandidateValidator::new(self.tables, self.variant);
        let mut collector = ResultCollector::new();

        let mut stack: Vec<SearchNode> = Vec::with_capacity(max_n + 1);
        for seed in seeds {
            stack.push(self.seed_node(seed));
        }
        let seed_count = seeds.len().max(1) as f64;

        let start = Instant::now();
        let mut nodes_visited: u64 = 0;
        let mut done = 0.0f64;
        let mut cancelled = false;

        log::info!(
            "search starting: N={}, variant={:?}, {} seed(s)",
            max_n,
            self.variant,
            seeds.len()
        );

        'traversal: while let Some(node) = stack.pop() {
            if node.depth >= max_n {
                // Terminal state: hand to the validator, never re-push.
                if let Some(hit) = validator.verify(&node.sum, node.mask) {
                    let candidate = &node.sum + offset;
                    observer.on_hit(&hit, &candidate);
                    collector.push(hit);
                }
                done += node.weight;
                continue;
            }

            nodes_visited += 1;
            if nodes_visited % self.progress_interval == 0 {
                let progress = Progress {
                    depth: node.depth,
                    nodes: nodes_visited,
                    elapsed: start.elapsed(),
                    done: done / seed_count,
                };
                if observer.on_progress(&progress) == SearchSignal::Cancel {
                    cancelled = true;
                    break 'traversal;
                }
            }

            let next_weight = node.weight * 0.5;
            let due = self.tables.check_map(node.depth);
            let mods = self.tables.fact_mods(node.depth);

            // Include branch: tentatively add (depth + 1)!. Test only the
            // primes due at this depth before paying for the state copy.
            let mut include_valid = true;
            for &rank in due {
                let p = self.tables.tree_prime(rank);
                let mut r = node.residues[rank] + mods[rank];
                if r >= p {
                    r -= p;
                }
                if !self.tables.tree_qr(rank).is_residue(r + offset) {
                    include_valid = false;
                    break;
                }
            }
            if include_valid {
                // Advance every tree prime, not just the due ones: primes
                // triggering later need an up-to-date residue when their
                // check comes.
                let mut residues = node.residues.clone();
                for (rank, residue) in residues.iter_mut().enumerate() {
                    let p = self.tables.tree_prime(rank);
                    let mut r = *residue + mods[rank];
                    if r >= p {
                        r -= p;
                    }
                    *residue = r;
                }
                stack.push(SearchNode {
                    depth: node.depth + 1,
                    sum: &node.sum + self.tables.factorial(node.depth),
                    residues,
                    weight: next_weight,
                    mask: node.mask | (1 << (node.depth + 1)),
                });
            } else {
                done += next_weight;
            }

            // Exclude branch: the sum is unchanged, so the due primes test
            // the current residues as-is.
            let mut exclude_valid = true;
            for &rank in due {
                if !self
                    .tables
                    .tree_qr(rank)
                    .is_residue(node.residues[rank] + offset)
                {
                    exclude_valid = false;
                    break;
                }
            }
            if exclude_valid {
                stack.push(SearchNode {
                    depth: node.depth + 1,
                    sum: node.sum,
                    residues: node.residues,
                    weight: next_weight,
                    mask: node.mask,
                });
            } else {
                done += next_weight;
            }
        }

        let elapsed = start.elapsed();
        log::info!(
            "search {}: {} nodes, {} hit(s), {:.2}s",
            if cancelled { "cancelled" } else { "finished" },
            nodes_visited,
            collector.len(),
            elapsed.as_secs_f64()
        );

        SearchOutcome {
            hits: collector.into_sorted(),
            nodes_visited,
            done: done / seed_count,
            cancelled,
            elapsed,
        }
    }

    /// Materialize a seed into a root node: partial sum, residue vector and
    /// mask are re-derived from the seed's fixed decisions.
    fn seed_node(&self, seed: &Seed) -> SearchNode {
        let ranks = self.tables.tree_primes().len();
        let mut sum = BigUint::zero();
        let mut residues = vec![0u32; ranks];
        let mut mask = 0u64;

        for k in 1..=seed.depth {
            if (seed.mask >> k) & 1 == 1 {
                let idx = k - 1;
                sum += self.tables.factorial(idx);
                let mods = self.tables.fact_mods(idx);
                for (rank, residue) in residues.iter_mut().enumerate() {
                    let p = self.tables.tree_prime(rank);
                    let mut r = *residue + mods[rank];
                    if r >= p {
                        r -= p;
                    }
                    *residue = r;
                }
                mask |= 1 << k;
            }
        }

        SearchNode {
            depth: seed.depth,
            sum,
            residues,
            weight: 1.0,
            mask,
        }
    }
}
