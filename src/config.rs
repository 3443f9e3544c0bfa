// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Search configuration: the candidate formula, the sieve bound, and seeds.
//!
//! A search is fully described by a [`SearchConfig`]: how many factorial terms
//! to consider (`max_n`), whether the candidate is the subset sum itself or the
//! sum plus one ([`Variant`]), how far to sieve for filter primes, and the seed
//! states the traversal starts from.
//!
//! Configuration is the only fallible surface of the whole system: every
//! operation downstream of a validated config is total. Validation therefore
//! happens once, up front, and loudly; see [`ConfigError`].

use thiserror::Error;

/// Default upper bound for the prime sieve.
///
/// Large enough to leave plenty of leaf primes above `max_n + 2` for the
/// full-depth candidate filter at the maximum supported `max_n`.
pub const DEFAULT_SIEVE_LIMIT: u32 = 500;

/// Minimum number of leaf primes required for a usable candidate filter.
///
/// Fewer than this and too many non-squares survive to the exact square-root
/// test; table construction refuses the configuration rather than degrading
/// silently.
pub const MIN_LEAF_PRIMES: usize = 8;

/// Largest supported `max_n`.
///
/// Inclusion masks are `u64` bitsets using bits `1..=max_n + 1`.
pub const MAX_SUPPORTED_N: usize = 62;

/// Candidate formula selector.
///
/// The general and plus-one searches are a single engine parameterized by
/// this variant; the only functional difference is the constant added to the
/// subset sum before every residue test and the final square test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Candidate = subset sum (OEIS A014597 family).
    General,
    /// Candidate = subset sum + 1.
    PlusOne,
}

impl Variant {
    /// Constant added to the subset sum to form the candidate.
    #[inline]
    pub fn offset(self) -> u32 {
        match self {
            Variant::General => 0,
            Variant::PlusOne => 1,
        }
    }
}

/// An initial partial state the traversal starts from.
///
/// The empty seed covers the whole search space. Non-empty seeds fix the
/// include/exclude decisions for terms `1!..=depth!` and are the hook for
/// partitioning the tree across workers; the partial sum and residue vector
/// are re-derived from the mask at search start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seed {
    /// Traversal depth this seed resumes from (decisions 0..depth are fixed).
    pub depth: usize,
    /// Inclusion mask over the fixed decisions: bit k set ⇔ k! included.
    pub mask: u64,
}

impl Seed {
    /// The empty seed: start at depth 0 with nothing included.
    pub fn empty() -> Self {
        Seed { depth: 0, mask: 0 }
    }
}

/// Process-start parameters for one search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Number of factorial terms considered: 1! through `max_n`!.
    pub max_n: usize,
    /// Candidate formula.
    pub variant: Variant,
    /// Upper bound of the prime sieve feeding the filter tables.
    pub sieve_limit: u32,
    /// Seed states, one traversal stack root per entry.
    pub seeds: Vec<Seed>,
}

impl SearchConfig {
    /// Configuration with the default sieve bound and the empty seed.
    pub fn new(max_n: usize, variant: Variant) -> Self {
        Self {
            max_n,
            variant,
            sieve_limit: DEFAULT_SIEVE_LIMIT,
            seeds: vec![Seed::empty()],
        }
    }

    /// Check everything that does not require the sieve to have run.
    ///
    /// The leaf-prime sufficiency check needs the actual prime partition and
    /// lives in table construction; see `SearchTables::build`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_n == 0 || self.max_n > MAX_SUPPORTED_N {
            return Err(ConfigError::MaxNOutOfRange(self.max_n));
        }
        for seed in &self.seeds {
            if seed.depth > self.max_n {
                return Err(ConfigError::InvalidSeed {
                    mask: seed.mask,
                    depth: seed.depth,
                });
            }
            // Bits must lie in 1..=depth: bit 0 is unused and bits above
            // depth would claim decisions the traversal has not made yet.
            let allowed = if seed.depth == 0 {
                0
            } else {
                ((1u64 << seed.depth) - 1) << 1
            };
            if seed.mask & !allowed != 0 {
                return Err(ConfigError::InvalidSeed {
                    mask: seed.mask,
                    depth: seed.depth,
                });
            }
        }
        Ok(())
    }
}

/// Configuration rejected at construction time.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// `max_n` outside `1..=MAX_SUPPORTED_N`.
    #[error("max_n must be in 1..={MAX_SUPPORTED_N} (got {0})")]
    MaxNOutOfRange(usize),

    /// The sieve bound leaves too few leaf primes for the candidate filter.
    #[error(
        "sieve limit {limit} yields only {found} leaf primes above {threshold} \
         (need at least {required}); raise the sieve limit"
    )]
    SieveLimitTooSmall {
        limit: u32,
        threshold: u32,
        found: usize,
        required: usize,
    },

    /// A seed mask sets bits outside `1..=depth`, or its depth exceeds `max_n`.
    #[error("seed mask {mask:#x} is not confined to bits 1..={depth}")]
    InvalidSeed { mask: u64, depth: usize },
}
