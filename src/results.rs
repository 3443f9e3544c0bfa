// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Verified hits and the final result collection.
//!
//! A [`Hit`] records the integer square root and the inclusion mask of one
//! verified candidate; the human-readable equation is derived from the mask
//! on demand. The collector is append-only (every mask is visited at most
//! once, so no dedup is needed) and results are sorted only for the final
//! summary.

use num_bigint::BigUint;

/// One verified solution: `decode_mask(mask)` (+ 1) = `root`².
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    /// Exact integer square root of the candidate.
    pub root: BigUint,
    /// Inclusion mask: bit k set ⇔ k! contributes to the sum.
    pub mask: u64,
}

impl Hit {
    /// Human-readable left-hand side, e.g. `"1! + 2! + 3!"`.
    pub fn equation(&self, max_n: usize) -> String {
        decode_mask(self.mask, max_n)
    }

    /// The empty-mask hit (candidate 0 + 1 = 1² in the plus-one variant).
    pub fn is_trivial(&self) -> bool {
        self.mask == 0
    }
}

/// Decode an inclusion mask into the ordered sum of its terms.
///
/// Bit k (1 ≤ k ≤ max_n + 1) contributes the term `"k!"`; terms are joined
/// ascending with `" + "`. The empty mask decodes to the literal `"0"`.
pub fn decode_mask(mask: u64, max_n: usize) -> String {
    let mut terms = Vec::new();
    for k in 1..=max_n + 1 {
        if (mask >> k) & 1 == 1 {
            terms.push(format!("{}!", k));
        }
    }
    if terms.is_empty() {
        "0".to_string()
    } else {
        terms.join(" + ")
    }
}

/// Append-only accumulator for verified hits.
#[derive(Debug, Default)]
pub struct ResultCollector {
    hits: Vec<Hit>,
}

impl ResultCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a verified hit.
    pub fn push(&mut self, hit: Hit) {
        self.hits.push(hit);
    }

    /// Number of hits collected so far.
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Consume the collector, returning hits sorted by ascending root.
    pub fn into_sorted(mut self) -> Vec<Hit> {
        self.hits.sort_by(|a, b| a.root.cmp(&b.root).then(a.mask.cmp(&b.mask)));
        self.hits
    }
}
