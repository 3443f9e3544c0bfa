// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Full-depth candidate validation: cheap filters first, exact test last.
//!
//! A candidate that survived every tree-prime check still has to run three
//! gauntlets, ordered by cost:
//!
//! 1. residue mod 64 against the fixed set of squares mod 64: O(1), rejects
//!    the large majority of non-squares;
//! 2. quadratic-residue tests for every leaf prime, ascending, short-circuit;
//! 3. the exact integer square-root test.
//!
//! The square-root test is exact arbitrary-precision arithmetic, never
//! floating point: candidates exceed f64 precision for max_n beyond ~18.

use num_bigint::BigUint;
use num_traits::Zero;

use crate::config::Variant;
use crate::results::Hit;
use crate::tables::SearchTables;

/// The complete set of quadratic residues modulo 64.
pub const SQUARE_RESIDUES_MOD_64: [u32; 12] = [0, 1, 4, 9, 16, 17, 25, 33, 36, 41, 49, 57];

/// Bitmask form of [`SQUARE_RESIDUES_MOD_64`] for the O(1) membership test.
const SQUARE_MOD_64_BITS: u64 = {
    let mut bits = 0u64;
    let mut i = 0;
    while i < SQUARE_RESIDUES_MOD_64.len() {
        bits |= 1 << SQUARE_RESIDUES_MOD_64[i];
        i += 1;
    }
    bits
};

/// Validates full-depth candidates against the leaf filters and the exact
/// square test.
#[derive(Debug, Clone, Copy)]
pub struct CandidateValidator<'a> {
    tables: &'a SearchTables,
    variant: Variant,
}

impl<'a> CandidateValidator<'a> {
    pub fn new(tables: &'a SearchTables, variant: Variant) -> Self {
        Self { tables, variant }
    }

    /// Verify one full-depth partial sum; returns the hit if the candidate
    /// is a perfect square.
    ///
    /// The zero candidate (empty mask, general variant) is excluded as
    /// trivial. The plus-one variant's empty mask yields candidate 1 and is
    /// reported; callers can flag it via [`Hit::is_trivial`].
    pub fn verify(&self, sum: &BigUint, mask: u64) -> Option<Hit> {
        let candidate = sum + self.variant.offset();
        if candidate.is_zero() {
            return None;
        }
        if !passes_mod_64(&candidate) {
            return None;
        }
        for qr in self.tables.leaf_qr() {
            if !qr.contains_big(&candidate) {
                return None;
            }
        }
        let root = candidate.sqrt();
        if &root * &root == candidate {
            Some(Hit { root, mask })
        } else {
            None
        }
    }
}

/// Fast mod-64 pre-filter: the low six bits must name a square residue.
fn passes_mod_64(candidate: &BigUint) -> bool {
    let low = candidate.iter_u64_digits().next().unwrap_or(0) & 63;
    (SQUARE_MOD_64_BITS >> low) & 1 == 1
}
