// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Injectable progress/result observer.
//!
//! The engine never formats anything itself: it hands throughput and hit data
//! to a [`SearchObserver`] and keeps searching. The observer's return value
//! doubles as the cooperative cancellation signal, checked at the same
//! cadence as progress reporting (there are no other suspension points in
//! the hot loop).

use std::io::{self, Write};
use std::time::{Duration, Instant};

use num_bigint::BigUint;

use crate::config::Variant;
use crate::results::Hit;

/// Throughput snapshot handed to the observer.
///
/// `done` is the fraction of an idealized balanced binary decision tree
/// already pruned or visited. Once pruning makes subtrees unevenly sized the
/// derived ETA is only approximate; it is user-facing bookkeeping, never used
/// for correctness.
#[derive(Debug, Clone, Copy)]
pub struct Progress {
    /// Depth of the node being expanded when the snapshot was taken.
    pub depth: usize,
    /// Internal nodes expanded so far.
    pub nodes: u64,
    /// Wall-clock time since the search started.
    pub elapsed: Duration,
    /// Completed fraction of the idealized tree, in `[0, 1]`.
    pub done: f64,
}

impl Progress {
    /// Nodes per second over the whole run so far.
    pub fn speed(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.nodes as f64 / secs
        } else {
            0.0
        }
    }

    /// Remaining time by linear extrapolation, once any progress exists.
    pub fn eta(&self) -> Option<Duration> {
        if self.done > 0.0 {
            let total = self.elapsed.as_secs_f64() / self.done;
            let remaining = total - self.elapsed.as_secs_f64();
            Some(Duration::from_secs_f64(remaining.max(0.0)))
        } else {
            None
        }
    }
}

/// Observer verdict after a progress report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchSignal {
    /// Keep searching.
    Continue,
    /// Stop cooperatively; the engine returns what it has so far.
    Cancel,
}

/// Capability the engine calls with progress and hit data.
pub trait SearchObserver {
    /// Periodic throughput report; return [`SearchSignal::Cancel`] to stop.
    fn on_progress(&mut self, _progress: &Progress) -> SearchSignal {
        SearchSignal::Continue
    }

    /// A candidate passed every filter and the exact square test.
    fn on_hit(&mut self, _hit: &Hit, _candidate: &BigUint) {}
}

/// Observer that ignores everything; used by tests and embedders that only
/// want the final outcome.
#[derive(Debug, Default)]
pub struct NullObserver;

impl SearchObserver for NullObserver {}

/// Console observer: a periodically rewritten progress line on stdout plus an
/// immediate notification line per hit.
#[derive(Debug)]
pub struct ConsoleObserver {
    max_n: usize,
    variant: Variant,
    min_interval: Duration,
    last_print: Option<Instant>,
}

impl ConsoleObserver {
    pub fn new(max_n: usize, variant: Variant) -> Self {
        Self {
            max_n,
            variant,
            min_interval: Duration::from_millis(500),
            last_print: None,
        }
    }
}

impl SearchObserver for ConsoleObserver {
    fn on_progress(&mut self, progress: &Progress) -> SearchSignal {
        let now = Instant::now();
        if let Some(last) = self.last_print {
            if now.duration_since(last) < self.min_interval {
                return SearchSignal::Continue;
            }
        }
        self.last_print = Some(now);

        let eta = match progress.eta() {
            Some(eta) => format_hms(eta),
            None => "Calc...".to_string(),
        };
        print!(
            "\rDepth: {:<2} | Nodes: {:.1}M | Speed: {:.0}k/s | Done: {:6.4}% | ETA: {} ",
            progress.depth,
            progress.nodes as f64 / 1_000_000.0,
            progress.speed() / 1000.0,
            progress.done * 100.0,
            eta
        );
        let _ = io::stdout().flush();
        SearchSignal::Continue
    }

    fn on_hit(&mut self, hit: &Hit, candidate: &BigUint) {
        let equation = hit.equation(self.max_n);
        match self.variant {
            Variant::General => {
                println!("\n>>> HIT: {} = {} ({}^2)", equation, candidate, hit.root)
            }
            Variant::PlusOne => {
                println!("\n>>> HIT: {} + 1 = {} ({}^2)", equation, candidate, hit.root)
            }
        }
    }
}

fn format_hms(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}
