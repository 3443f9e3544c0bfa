// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Exact factorial values and their residues modulo each tree prime.
//!
//! Everything here is pure precomputation: the exact table feeds partial sums
//! (arbitrary precision is a correctness requirement, since 20! already
//! exceeds 2^64) and the residue table feeds the per-depth divisibility
//! checks during traversal.

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive};

/// Exact `(idx + 1)!` for `idx in 0..max_n`, i.e. the terms 1! through max_n!.
pub fn factorial_table(max_n: usize) -> Vec<BigUint> {
    let mut table = Vec::with_capacity(max_n);
    let mut current = BigUint::one();
    for k in 1..=max_n as u64 {
        current *= k;
        table.push(current.clone());
    }
    table
}

/// `fact_mods[idx][rank] = (idx + 1)! mod tree_primes[rank]`.
///
/// Derived from the exact values rather than recomputed by repeated modular
/// multiplication, so the two tables cannot disagree.
pub fn factorial_mod_table(factorials: &[BigUint], tree_primes: &[u32]) -> Vec<Vec<u32>> {
    factorials
        .iter()
        .map(|value| {
            tree_primes
                .iter()
                .map(|&p| {
                    (value % p)
                        .to_u32()
                        .expect("remainder is below a u32 modulus")
                })
                .collect()
        })
        .collect()
}
