//! Analyze every listing in a CSV export
//!
//! Writes one row of deal metrics per listing to a CSV file, or prints JSON
//! with --json

use anyhow::{Context, Result};
use clap::Parser;
use property_metrics::config::loader::load_default_config;
use property_metrics::listing::load_listings;
use property_metrics::{DealAnalyzer, DealMetrics, EngineConfig};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Batch deal analysis for listing exports
#[derive(Parser, Debug)]
#[command(name = "analyze_listings")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Listing CSV (ListingID, Address, AskingPrice, CapRate, PropertyType, Bedrooms)
    #[arg(default_value = "data/listings_sample.csv")]
    input: PathBuf,

    /// Where to write the metrics CSV
    #[arg(short, long, default_value = "analyzed_listings.csv")]
    output: PathBuf,

    /// Target cash-on-cash return in percent
    #[arg(long, default_value_t = 15.0)]
    target: f64,

    /// Configuration JSON overriding the built-in defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print JSON to stdout instead of writing the CSV
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct BatchResponse<'a> {
    listing_count: usize,
    converged_count: usize,
    target_cocr: f64,
    listings: &'a [DealMetrics],
    execution_time_ms: u64,
}

fn write_csv(path: &Path, metrics: &[DealMetrics]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    for row in metrics {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let start = Instant::now();

    let config = match &args.config {
        Some(path) => EngineConfig::from_json_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => load_default_config().context("Failed to load default config")?,
    };

    let listings = load_listings(&args.input)
        .with_context(|| format!("Failed to load listings from {}", args.input.display()))?;
    if !args.json {
        println!("Loaded {} listings in {:?}", listings.len(), start.elapsed());
    }

    let analyzer = DealAnalyzer::with_config(config).with_target_cocr(args.target / 100.0);
    let analysis_start = Instant::now();
    let metrics = analyzer.analyze_batch(&listings);
    let converged_count = metrics.iter().filter(|m| m.solver_converged).count();

    if args.json {
        let response = BatchResponse {
            listing_count: metrics.len(),
            converged_count,
            target_cocr: analyzer.target_cocr(),
            listings: &metrics,
            execution_time_ms: start.elapsed().as_millis() as u64,
        };
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!("Analysis complete in {:?}", analysis_start.elapsed());
    println!(
        "  {} of {} target prices converged",
        converged_count,
        metrics.len()
    );

    write_csv(&args.output, &metrics)?;
    println!("Results written to {}", args.output.display());
    println!("Total time: {:?}", start.elapsed());

    Ok(())
}
