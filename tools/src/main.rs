//! txgen: headless runner for the synthetic transaction generator.
//!
//! Usage:
//!   txgen                              # reads config/config.yml
//!   txgen --config path/to/config.yml
//!   txgen --config cfg.yml --json      # print the run summary as JSON

use anyhow::{Context, Result};
use std::env;
use txgen_core::{config::GenConfig, engine::GenEngine, summary::RunSummary};

const DEFAULT_CONFIG: &str = "config/config.yml";

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let config_path = args
        .windows(2)
        .find(|w| w[0] == "--config")
        .map(|w| w[1].as_str())
        .unwrap_or(DEFAULT_CONFIG);
    let json = args.iter().any(|a| a == "--json");

    let config = GenConfig::load(config_path)
        .with_context(|| format!("loading config {config_path}"))?;

    if !json {
        println!("txgen: synthetic transaction generator");
        println!("  config:     {config_path}");
        println!("  seed:       {}", config.seed);
        println!("  customers:  {}", config.data.n_customers);
        println!("  range:      {} .. {}", config.data.start_date, config.data.end_date);
        println!("  raw_dir:    {}", config.data.raw_dir.display());
        println!();
    }

    let mut engine = GenEngine::build(config)?;
    let summary = engine.run()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
        println!("Raw data generated in partitioned folders");
    }
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    println!("=== RUN SUMMARY ===");
    println!("  days written:   {}", summary.days_written);
    println!("  total rows:     {}", summary.total_rows);
    println!("  avg daily rows: {:.1}", summary.avg_rows_per_day());
    println!("  carry balances: {}", summary.carry_balances);
    println!();
    println!("=== ROWS BY CATEGORY ===");
    for (category, count) in &summary.rows_by_category {
        println!("  {category:<16} {count}");
    }
}
