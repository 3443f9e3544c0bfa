// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! The check map: which tree primes are tested at which traversal depth.
//!
//! For a tree prime p, the term considered at depth idx = p − 2 is (p − 1)!,
//! the last factorial not divisible by p; from the next depth on every term
//! is ≡ 0 (mod p) and the partial-sum residue is frozen. The check map
//! therefore schedules each prime's single mandatory residue test at exactly
//! idx = p − 2, the last moment the test is still discriminating.
//!
//! Buckets hold dense prime *ranks* (indices into the ascending tree-prime
//! array), not prime values, so the engine indexes straight into its residue
//! vectors.

/// `check_map[idx]` = ranks of the tree primes whose test is due at `idx`.
///
/// A tree prime with trigger index `p − 2 >= max_n` never fires inside the
/// traversal; its residue keeps being advanced and the leaf filter covers it.
/// (With tree primes ≤ max_n + 2 this only happens for the largest one or two.)
pub fn build_check_map(tree_primes: &[u32], max_n: usize) -> Vec<Vec<usize>> {
    let mut map = vec![Vec::new(); max_n];
    for (rank, &p) in tree_primes.iter().enumerate() {
        let trigger = p as usize - 2;
        if trigger < max_n {
            map[trigger].push(rank);
        }
    }
    map
}
