//! Property Metrics CLI
//!
//! Analyze a single deal from the command line

use anyhow::{Context, Result};
use clap::Parser;
use property_metrics::config::loader::load_default_config;
use property_metrics::format::{format_currency, format_percentage, format_price_value};
use property_metrics::{DealAnalyzer, DealMetrics, EngineConfig, Listing, PropertyType};
use std::path::PathBuf;

/// Investment metrics for one property
#[derive(Parser, Debug)]
#[command(name = "property_metrics")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Asking price in dollars
    #[arg(short, long)]
    price: f64,

    /// Advertised cap rate in percent (7.5 = 7.5%); the configured default when omitted
    #[arg(short, long)]
    cap_rate: Option<f64>,

    /// Property type: multifamily, str or assisted
    #[arg(short = 't', long = "type", default_value = "multifamily")]
    property_type: String,

    /// Bedroom count (assisted living)
    #[arg(short, long)]
    bedrooms: Option<u32>,

    /// Target cash-on-cash return in percent
    #[arg(long, default_value_t = 15.0)]
    target: f64,

    /// Configuration JSON overriding the built-in defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Emit JSON instead of the text summary
    #[arg(long)]
    json: bool,
}

fn print_summary(metrics: &DealMetrics) {
    println!("Property Metrics v{}", env!("CARGO_PKG_VERSION"));
    println!("======================\n");

    println!("Listing: {} ({})", metrics.listing_id, metrics.property_type);
    println!("  Asking Price:      {}", format_price_value(metrics.asking_price));
    println!("  NOI:               {}", format_currency(metrics.noi, false));
    println!("  Cap Rate:          {}", format_percentage(metrics.cap_rate_percent));
    println!();

    println!("Standard financing:");
    println!("  Cash Invested:     {}", format_currency(metrics.cash_invested, false));
    println!("  DSCR Payment:      {}/mo", format_currency(metrics.dscr_monthly_payment, true));
    println!("  Cash Flow:         {}/mo", format_currency(metrics.monthly_cash_flow, true));
    println!("  COCR:              {}", format_percentage(metrics.cocr_percent));
    println!("  COCR w/ Carry:     {}", format_percentage(metrics.seller_fi_cocr_percent));
    println!();

    println!("Price for {} COCR:", format_percentage(metrics.target_cocr * 100.0));
    println!("  Target Price:      {}", format_price_value(metrics.target_price));
    println!("  Discount:          {}", format_percentage(metrics.target_discount * 100.0));
    if !metrics.solver_converged {
        println!(
            "  (not converged after {} iterations{})",
            metrics.solver_iterations,
            if metrics.solver_hit_ceiling { ", hit price ceiling" } else { "" }
        );
    }
    println!();

    println!("Deal economics:");
    println!("  Assignment Fee:    {}", format_currency(metrics.assignment_fee, false));
    println!("  Net to Buyer:      {}", format_currency(metrics.net_to_buyer, false));
    println!("  Cash Out at Refi:  {}", format_currency(metrics.cash_out_after_refi, false));
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => EngineConfig::from_json_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => load_default_config().context("Failed to load default config")?,
    };

    let mut listing = Listing::new(
        "cli",
        args.price,
        0.0,
        PropertyType::from_label(&args.property_type),
    );
    listing.cap_rate = args.cap_rate.map(|percent| percent / 100.0);
    listing.bedrooms = args.bedrooms;

    let analyzer = DealAnalyzer::with_config(config).with_target_cocr(args.target / 100.0);
    let metrics = analyzer.analyze(&listing);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&metrics)?);
    } else {
        print_summary(&metrics);
    }

    Ok(())
}
