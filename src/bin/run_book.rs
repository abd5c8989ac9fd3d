//! Run previews for an entire book of portfolios from CSV
//!
//! Outputs one projection row per client for review before approvals

use anyhow::{Context, Result};
use clap::Parser;
use portfolio_projection::{portfolio::load_book, ProductTerms, ScenarioRunner};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "run_book", about = "Batch deposit/withdrawal previews from a portfolio CSV")]
struct Cli {
    /// Portfolio book CSV
    book: PathBuf,

    /// Output CSV path
    #[arg(long, default_value = "book_projection_output.csv")]
    output: PathBuf,

    /// Product terms CSV
    #[arg(long)]
    terms: Option<PathBuf>,
}

/// Flattened output row
#[derive(Debug, Serialize)]
struct OutputRow<'a> {
    client_id: &'a str,
    operation: String,
    amount: f64,
    deduct_from_profit: f64,
    deduct_from_capital: f64,
    new_invested: f64,
    new_available_profit: f64,
    new_total_balance: f64,
    projected_monthly_profit: f64,
    capital_impacted: bool,
    rejection: &'a str,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let start = Instant::now();

    let runner = match &cli.terms {
        Some(path) => ScenarioRunner::with_terms(
            ProductTerms::from_csv_path(path).with_context(|| format!("Failed to load terms from {}", path.display()))?,
        ),
        None => ScenarioRunner::new(),
    };

    println!("Loading book from {}...", cli.book.display());
    let entries = load_book(&cli.book).with_context(|| format!("Failed to load {}", cli.book.display()))?;
    println!("Loaded {} portfolios in {:?}", entries.len(), start.elapsed());

    let proj_start = Instant::now();
    let previews = runner.run_book(&entries);
    println!("Projections complete in {:?}", proj_start.elapsed());

    let mut writer = csv::Writer::from_path(&cli.output)
        .with_context(|| format!("Failed to create {}", cli.output.display()))?;
    for preview in &previews {
        let r = &preview.result;
        writer.serialize(OutputRow {
            client_id: &preview.client_id,
            operation: format!("{:?}", r.operation).to_uppercase(),
            amount: r.amount,
            deduct_from_profit: r.deduct_from_profit,
            deduct_from_capital: r.deduct_from_capital,
            new_invested: r.new_invested,
            new_available_profit: r.new_available_profit,
            new_total_balance: r.new_total_balance,
            projected_monthly_profit: r.projected_monthly_profit,
            capital_impacted: r.is_capital_impacted,
            rejection: preview.rejection.as_deref().unwrap_or(""),
        })?;
    }
    writer.flush()?;

    println!("Output written to {}", cli.output.display());

    let rejected = previews.iter().filter(|p| p.rejection.is_some()).count();
    let impacted = previews.iter().filter(|p| p.result.is_capital_impacted).count();
    let total_capital_out: f64 = previews.iter().map(|p| p.result.deduct_from_capital).sum();

    println!("\nBook Summary:");
    println!("  Portfolios:        {}", previews.len());
    println!("  Rejected requests: {}", rejected);
    println!("  Capital impacted:  {}", impacted);
    println!("  Capital withdrawn: {:.2}", total_capital_out);

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
