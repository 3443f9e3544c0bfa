// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Immutable precomputed tables shared by the whole search.
//!
//! [`SearchTables`] is built once from a validated configuration and never
//! changes afterwards; every traversal reads it without synchronization. This
//! mirrors the two-tier model the rest of the crate follows: immutable tables
//! here, mutable per-node state owned by the engine.
//!
//! Construction is the fail-fast point: a sieve bound that leaves too few
//! leaf primes above `max_n + 2` is a configuration error, not something to
//! degrade around silently.

pub mod factorials;
pub mod primes;
pub mod schedule;

use num_bigint::BigUint;

use crate::config::{ConfigError, SearchConfig, MIN_LEAF_PRIMES};
use factorials::{factorial_mod_table, factorial_table};
use primes::{sieve_primes, QrTable};
use schedule::build_check_map;

/// All precomputed number-theoretic data for one search.
///
/// Primes up to the sieve bound are partitioned at `max_n + 2`: *tree primes*
/// (at or below) are tested during traversal because their residue can still
/// change within the search depth; *leaf primes* (above) are tested only on
/// fully assembled candidates. Tree primes are identified everywhere by their
/// dense rank in the ascending array, so residue vectors and the factorial
/// residue table are plain indexed arrays rather than prime-keyed maps.
#[derive(Debug, Clone)]
pub struct SearchTables {
    max_n: usize,
    /// `factorials[idx]` = exact `(idx + 1)!`.
    factorials: Vec<BigUint>,
    /// Ascending tree primes; index = rank.
    tree_primes: Vec<u32>,
    /// Quadratic-residue tables by tree-prime rank.
    tree_qr: Vec<QrTable>,
    /// Quadratic-residue tables for leaf primes, ascending.
    leaf_qr: Vec<QrTable>,
    /// `fact_mods[idx][rank]` = `(idx + 1)! mod tree_primes[rank]`.
    fact_mods: Vec<Vec<u32>>,
    /// `check_map[idx]` = tree-prime ranks whose test is due at depth `idx`.
    check_map: Vec<Vec<usize>>,
}

impl SearchTables {
    /// Build all tables for `config`.
    ///
    /// Fails fast if the configuration is invalid or the sieve bound leaves
    /// fewer than [`MIN_LEAF_PRIMES`] leaf primes for the candidate filter.
    pub fn build(config: &SearchConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let max_n = config.max_n;
        let threshold = max_n as u32 + 2;
        let all_primes = sieve_primes(config.sieve_limit);

        let (tree_primes, leaf_primes): (Vec<u32>, Vec<u32>) =
            all_primes.into_iter().partition(|&p| p <= threshold);

        if leaf_primes.len() < MIN_LEAF_PRIMES {
            return Err(ConfigError::SieveLimitTooSmall {
                limit: config.sieve_limit,
                threshold,
                found: leaf_primes.len(),
                required: MIN_LEAF_PRIMES,
            });
        }

        let tree_qr: Vec<QrTable> = tree_primes.iter().map(|&p| QrTable::build(p)).collect();
        let leaf_qr: Vec<QrTable> = leaf_primes.iter().map(|&p| QrTable::build(p)).collect();

        let factorials = factorial_table(max_n);
        let fact_mods = factorial_mod_table(&factorials, &tree_primes);
        let check_map = build_check_map(&tree_primes, max_n);

        log::info!(
            "tables built for N={}: {} tree primes, {} leaf primes (sieve limit {})",
            max_n,
            tree_primes.len(),
            leaf_primes.len(),
            config.sieve_limit
        );

        Ok(Self {
            max_n,
            factorials,
            tree_primes,
            tree_qr,
            leaf_qr,
            fact_mods,
            check_map,
        })
    }

    /// Number of factorial terms considered.
    #[inline]
    pub fn max_n(&self) -> usize {
        self.max_n
    }

    /// Exact `(idx + 1)!`.
    #[inline]
    pub fn factorial(&self, idx: usize) -> &BigUint {
        &self.factorials[idx]
    }

    /// Ascending tree primes; position = rank.
    #[inline]
    pub fn tree_primes(&self) -> &[u32] {
        &self.tree_primes
    }

    /// Tree prime at `rank`.
    #[inline]
    pub fn tree_prime(&self, rank: usize) -> u32 {
        self.tree_primes[rank]
    }

    /// Quadratic-residue table for the tree prime at `rank`.
    #[inline]
    pub fn tree_qr(&self, rank: usize) -> &QrTable {
        &self.tree_qr[rank]
    }

    /// Quadratic-residue tables for the leaf primes, ascending.
    #[inline]
    pub fn leaf_qr(&self) -> &[QrTable] {
        &self.leaf_qr
    }

    /// Residues of `(idx + 1)!` modulo every tree prime, by rank.
    #[inline]
    pub fn fact_mods(&self, idx: usize) -> &[u32] {
        &self.fact_mods[idx]
    }

    /// Tree-prime ranks whose residue test is due at `depth`.
    #[inline]
    pub fn check_map(&self, depth: usize) -> &[usize] {
        &self.check_map[depth]
    }
}
