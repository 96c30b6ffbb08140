//! Sweep a loan across a range of annual rates
//!
//! Writes one row per rate with payment and interest totals to CSV.
//!
//! Environment:
//! - SWEEP_PRINCIPAL   loan amount (default 150000)
//! - SWEEP_YEARS       term in years (default 25)
//! - SWEEP_RATE_FROM   first annual rate, percent (default 0.5)
//! - SWEEP_RATE_TO     last annual rate, percent (default 6.0)
//! - SWEEP_RATE_STEP   step, percent (default 0.25)
//! - SWEEP_OUTPUT      output path (default rate_sweep_output.csv)

use std::env;
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use serde::Serialize;

use mortgage_calculator::rates::{annual_pct_from_monthly, annual_rate_grid, MAX_GRID_POINTS};
use mortgage_calculator::ScenarioRunner;

#[derive(Serialize)]
struct SweepRow {
    annual_rate_pct: f64,
    monthly_payment: f64,
    total_interest: f64,
    total_paid: f64,
    interest_share: f64,
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn main() -> Result<()> {
    env_logger::init();

    let principal: f64 = env_or("SWEEP_PRINCIPAL", 150_000.0);
    let years: u32 = env_or("SWEEP_YEARS", 25);
    let rate_from: f64 = env_or("SWEEP_RATE_FROM", 0.5);
    let rate_to: f64 = env_or("SWEEP_RATE_TO", 6.0);
    let rate_step: f64 = env_or("SWEEP_RATE_STEP", 0.25);
    let output_path = env::var("SWEEP_OUTPUT").unwrap_or_else(|_| "rate_sweep_output.csv".to_string());

    let Some(rates) = annual_rate_grid(rate_from, rate_to, rate_step) else {
        bail!(
            "Invalid rate range {}..{} step {} (at most {} rates)",
            rate_from,
            rate_to,
            rate_step,
            MAX_GRID_POINTS
        );
    };
    let Some(term_months) = years.checked_mul(12) else {
        bail!("A term of {} years is too long", years);
    };

    println!(
        "Sweeping {} rates for {:.2} over {} years...",
        rates.len(),
        principal,
        years
    );
    let start = Instant::now();

    let runner = match env::var("MORTGAGE_TABLES_PATH") {
        Ok(path) => ScenarioRunner::from_csv_path(Path::new(&path))
            .with_context(|| format!("loading reference tables from {}", path))?,
        Err(_) => ScenarioRunner::new(),
    };
    let points = runner.rate_sweep(principal, term_months, &rates);

    println!("Sweep complete in {:?}", start.elapsed());

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {}", output_path))?;
    let mut written = 0;
    for point in &points {
        let Some(summary) = point.summary else {
            continue;
        };
        writer.serialize(SweepRow {
            annual_rate_pct: annual_pct_from_monthly(point.monthly_rate),
            monthly_payment: summary.monthly_payment,
            total_interest: summary.total_interest,
            total_paid: summary.total_paid,
            interest_share: summary.total_interest / summary.total_paid,
        })?;
        written += 1;
    }
    writer.flush()?;

    if written == 0 {
        bail!("Enter a valid amount and term");
    }

    println!("Output written to {} ({} rows)", output_path, written);

    if let (Some(first), Some(last)) = (points.first(), points.last()) {
        if let (Some(lo), Some(hi)) = (first.summary, last.summary) {
            println!("\nSweep Summary:");
            println!(
                "  {:.2}%: payment={:.2}, interest={:.2}",
                annual_pct_from_monthly(first.monthly_rate),
                lo.monthly_payment,
                lo.total_interest
            );
            println!(
                "  {:.2}%: payment={:.2}, interest={:.2}",
                annual_pct_from_monthly(last.monthly_rate),
                hi.monthly_payment,
                hi.total_interest
            );
        }
    }

    Ok(())
}
