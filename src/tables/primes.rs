// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Prime sieve and quadratic-residue lookup tables.
//!
//! A number can only be a perfect square if it is a quadratic residue modulo
//! every prime. Each [`QrTable`] records, for one prime p, which of the p
//! residue classes contain squares; the traversal and the leaf filter both
//! test candidates against these tables instead of doing any modular
//! exponentiation at search time.

use num_bigint::BigUint;
use num_traits::ToPrimitive;

/// All primes up to and including `limit`, ascending (sieve of Eratosthenes).
pub fn sieve_primes(limit: u32) -> Vec<u32> {
    if limit < 2 {
        return Vec::new();
    }
    let n = limit as usize;
    let mut composite = vec![false; n + 1];
    let mut p = 2;
    while p * p <= n {
        if !composite[p] {
            let mut multiple = p * p;
            while multiple <= n {
                composite[multiple] = true;
                multiple += p;
            }
        }
        p += 1;
    }
    (2..=n).filter(|&i| !composite[i]).map(|i| i as u32).collect()
}

/// Quadratic-residue bitmap for a single prime.
///
/// Entry r is true iff r ≡ x² (mod p) for some x. Zero counts as a residue,
/// so for odd p exactly (p + 1) / 2 entries are true.
///
/// Built once per prime by squaring every residue class; O(p) construction,
/// O(1) lookups for the lifetime of the search.
#[derive(Debug, Clone)]
pub struct QrTable {
    modulus: u32,
    residues: Vec<bool>,
}

impl QrTable {
    /// Build the residue bitmap for prime `p`.
    pub fn build(p: u32) -> Self {
        let mut residues = vec![false; p as usize];
        for x in 0..u64::from(p) {
            residues[((x * x) % u64::from(p)) as usize] = true;
        }
        Self { modulus: p, residues }
    }

    /// The prime this table filters for.
    #[inline]
    pub fn modulus(&self) -> u32 {
        self.modulus
    }

    /// Is `r` a quadratic residue mod p? `r` is reduced first, so callers
    /// may pass values up to `u32::MAX`.
    #[inline]
    pub fn is_residue(&self, r: u32) -> bool {
        self.residues[(r % self.modulus) as usize]
    }

    /// Reduce an arbitrary-precision candidate mod p and test it.
    pub fn contains_big(&self, value: &BigUint) -> bool {
        let r = (value % self.modulus)
            .to_u32()
            .expect("remainder is below a u32 modulus");
        self.residues[r as usize]
    }

    /// Number of residue classes marked as squares.
    pub fn residue_count(&self) -> usize {
        self.residues.iter().filter(|&&qr| qr).count()
    }
}
