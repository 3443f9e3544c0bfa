// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Command-line entry point for the factorial square search.

use anyhow::Result;
use clap::Parser;

use factorial_square_search::config::DEFAULT_SIEVE_LIMIT;
use factorial_square_search::{
    ConsoleObserver, Hit, SearchConfig, SearchEngine, SearchTables, Variant,
};

/// Search for subsets of {1!, …, N!} whose sum (or sum + 1) is a perfect square.
#[derive(Parser, Debug)]
#[command(name = "fsq", version, about)]
struct Args {
    /// Number of factorial terms considered (1! through MAX_N!).
    #[arg(short = 'n', long)]
    max_n: usize,

    /// Search for sum + 1 squares instead of plain subset sums.
    #[arg(long)]
    plus_one: bool,

    /// Upper bound of the prime sieve feeding the filter tables.
    #[arg(long, default_value_t = DEFAULT_SIEVE_LIMIT)]
    sieve_limit: u32,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let variant = if args.plus_one {
        Variant::PlusOne
    } else {
        Variant::General
    };
    let mut config = SearchConfig::new(args.max_n, variant);
    config.sieve_limit = args.sieve_limit;

    println!("--- PRE-CALCULATING TABLES (N={}) ---", config.max_n);
    let tables = SearchTables::build(&config)?;
    println!(
        "Optimized: Tree Primes: {} | Leaf Primes: {}",
        tables.tree_primes().len(),
        tables.leaf_qr().len()
    );

    println!("\n--- FAST SEARCH STARTING ---");
    let engine = SearchEngine::new(&tables, variant);
    let mut observer = ConsoleObserver::new(config.max_n, variant);
    let outcome = engine.run(&config.seeds, &mut observer);

    println!(
        "\n[DONE] Finished in {:.2}s. Total Nodes: {}",
        outcome.elapsed.as_secs_f64(),
        outcome.nodes_visited
    );

    print_summary(&outcome.hits, config.max_n, variant);
    Ok(())
}

fn print_summary(hits: &[Hit], max_n: usize, variant: Variant) {
    println!("\n{}", "=".repeat(60));
    println!("FINAL SUMMARY (Sorted by 'a')");
    println!("{}", "-".repeat(60));
    if hits.is_empty() {
        println!("No solutions found.");
    } else {
        for hit in hits {
            let equation = hit.equation(max_n);
            let note = if hit.is_trivial() { "  (trivial)" } else { "" };
            match variant {
                Variant::General => {
                    println!("a = {:<6} | {} = {}^2{}", hit.root, equation, hit.root, note)
                }
                Variant::PlusOne => {
                    println!(
                        "a = {:<6} | {} + 1 = {}^2{}",
                        hit.root, equation, hit.root, note
                    )
                }
            }
        }
    }
    println!("{}", "=".repeat(60));
}
