//! Mortgage Calculator CLI
//!
//! Command-line front end for schedules, fixed vs mixed comparisons,
//! investment analysis and premium estimates

use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;

use mortgage_calculator::amortization::{annual_breakdown, AmortizationRow};
use mortgage_calculator::investment::{InvestmentAnalysis, RentalInputs};
use mortgage_calculator::mixed::MixedComparison;
use mortgage_calculator::rates::{
    annual_pct_from_monthly, annual_rate_grid, monthly_rate_from_annual_pct, MAX_GRID_POINTS,
};
use mortgage_calculator::{InvestmentRequest, LoanTerms, ScenarioRunner, ScheduleSummary};

/// Mortgage amortization and comparison calculator
#[derive(Parser)]
#[command(name = "mortgage_calculator", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Directory with premium_table.csv and regional_taxes.csv
    /// (falls back to MORTGAGE_TABLES_PATH, then built-in tables)
    #[arg(long, global = true)]
    tables: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Amortization schedule of a fixed-rate loan
    Schedule {
        #[arg(long, default_value_t = 150_000.0)]
        principal: f64,
        #[arg(long, default_value_t = 25)]
        years: u32,
        /// Nominal annual rate (TIN), percent
        #[arg(long, default_value_t = 3.0)]
        rate: f64,
        /// Calendar month of the first payment (1-12), for the annual breakdown
        #[arg(long, default_value_t = 1)]
        start_month: u32,
        /// Number of monthly rows to print
        #[arg(long, default_value_t = 12)]
        rows: usize,
        /// Write the full schedule to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Phase-2 rate that makes a mixed loan cost the same interest as a fixed one
    Compare {
        #[arg(long, default_value_t = 100_000.0)]
        principal: f64,
        #[arg(long, default_value_t = 20)]
        years: u32,
        /// Reference fixed rate (TIN), percent
        #[arg(long, default_value_t = 3.0)]
        fixed_rate: f64,
        /// Rate of the mixed loan's fixed phase (TIN), percent
        #[arg(long, default_value_t = 2.5)]
        phase1_rate: f64,
        /// Year in which the mixed loan switches to the variable phase
        #[arg(long, default_value_t = 5)]
        change_year: u32,
    },
    /// Cash flow and returns of a financed rental property
    Invest {
        #[arg(long, default_value_t = 200_000.0)]
        price: f64,
        /// Financed share of the price, percent
        #[arg(long, default_value_t = 90.0)]
        financing: f64,
        #[arg(long, default_value_t = 30)]
        years: u32,
        #[arg(long, default_value_t = 2.7)]
        rate: f64,
        #[arg(long, default_value = "Comunidad de Madrid")]
        region: String,
        /// Renovation or other up-front spending
        #[arg(long, default_value_t = 0.0)]
        extra: f64,
        #[arg(long, default_value_t = 1_000.0)]
        rent: f64,
        /// Monthly community fee
        #[arg(long, default_value_t = 40.0)]
        community: f64,
        /// Monthly insurance
        #[arg(long, default_value_t = 60.0)]
        insurance: f64,
        /// Annual property tax
        #[arg(long, default_value_t = 150.0)]
        property_tax: f64,
        /// Annual maintenance
        #[arg(long, default_value_t = 0.0)]
        maintenance: f64,
        /// Horizon in years for the compounded return (default: mortgage term)
        #[arg(long)]
        horizon: Option<u32>,
    },
    /// Estimated annual insurance premium
    Premium {
        #[arg(long)]
        age: f64,
        #[arg(long)]
        capital: f64,
    },
    /// Payment and interest of one loan across a range of annual rates
    Sweep {
        #[arg(long, default_value_t = 150_000.0)]
        principal: f64,
        #[arg(long, default_value_t = 25)]
        years: u32,
        /// First annual rate, percent
        #[arg(long, default_value_t = 1.0)]
        from: f64,
        /// Last annual rate, percent
        #[arg(long, default_value_t = 5.0)]
        to: f64,
        #[arg(long, default_value_t = 0.5)]
        step: f64,
    },
    /// List regions with known acquisition taxes
    Regions,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let tables_path = cli
        .tables
        .clone()
        .or_else(|| env::var("MORTGAGE_TABLES_PATH").ok().map(PathBuf::from));
    let runner = match &tables_path {
        Some(path) => ScenarioRunner::from_csv_path(path)
            .with_context(|| format!("loading reference tables from {}", path.display()))?,
        None => ScenarioRunner::new(),
    };

    match cli.command {
        Commands::Schedule { principal, years, rate, start_month, rows, csv } => {
            let terms = LoanTerms::from_annual(principal, rate, years);
            let schedule = runner.schedule(&terms);
            let Some(summary) = ScheduleSummary::from_rows(&schedule) else {
                bail!("Enter a valid amount and term");
            };
            let annual = annual_breakdown(&schedule, start_month);

            if let Some(path) = &csv {
                write_schedule_csv(path, &schedule)
                    .with_context(|| format!("writing {}", path.display()))?;
            }

            if cli.json {
                let out = json!({ "summary": summary, "annual": annual, "schedule": schedule });
                println!("{}", serde_json::to_string_pretty(&out)?);
                return Ok(());
            }

            println!("Monthly payment:  {}", eur(summary.monthly_payment));
            println!("Total interest:   {}", eur(summary.total_interest));
            println!("Payments:         {}", summary.payments);
            println!();
            println!("{:>5} {:>14} {:>14} {:>14} {:>16}", "Month", "Payment", "Interest", "Principal", "Balance");
            println!("{}", "-".repeat(67));
            for row in schedule.iter().take(rows) {
                println!(
                    "{:>5} {:>14.2} {:>14.2} {:>14.2} {:>16.2}",
                    row.month, row.payment, row.interest, row.principal, row.balance
                );
            }
            if schedule.len() > rows {
                println!("... ({} more months)", schedule.len() - rows);
            }

            println!();
            println!(
                "{:>5} {:>21} {:>9} {:>14} {:>14}",
                "Year", "Months", "Payments", "Interest", "Principal"
            );
            for year in &annual {
                let months = format!("{}-{}", year.first_month.name(), year.last_month.name());
                println!(
                    "{:>5} {:>21} {:>9} {:>14.2} {:>14.2}",
                    year.year, months, year.payments, year.interest, year.principal
                );
            }

            if let Some(path) = &csv {
                println!("\nFull schedule written to: {}", path.display());
            }
        }

        Commands::Compare { principal, years, fixed_rate, phase1_rate, change_year } => {
            if change_year > years {
                bail!("Change year {} is beyond the {}-year term", change_year, years);
            }
            let Some(cmp) = runner.compare(
                principal,
                term_months(years)?,
                monthly_rate_from_annual_pct(fixed_rate),
                monthly_rate_from_annual_pct(phase1_rate),
                term_months(change_year)?,
            ) else {
                bail!("Enter a valid amount and term");
            };

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&cmp)?);
            } else {
                print_comparison(&cmp, phase1_rate);
            }
        }

        Commands::Invest {
            price,
            financing,
            years,
            rate,
            region,
            extra,
            rent,
            community,
            insurance,
            property_tax,
            maintenance,
            horizon,
        } => {
            let request = InvestmentRequest {
                property_price: price,
                financing_pct: financing,
                term_years: years,
                annual_rate_pct: rate,
                region,
                extra_contribution: extra,
                rental: RentalInputs {
                    monthly_rent: rent,
                    monthly_community_fee: community,
                    monthly_insurance: insurance,
                    annual_property_tax: property_tax,
                    annual_maintenance: maintenance,
                },
                horizon_years: horizon,
            };
            let analysis = runner.analyze_investment(&request)?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                print_investment(&analysis);
            }
        }

        Commands::Premium { age, capital } => {
            let estimate = runner.premium(age, capital);
            if cli.json {
                println!("{}", json!({ "age": age, "capital": capital, "premium": estimate }));
            } else {
                println!("Estimated annual premium: {}", eur(estimate));
            }
        }

        Commands::Sweep { principal, years, from, to, step } => {
            let Some(rates) = annual_rate_grid(from, to, step) else {
                bail!(
                    "Invalid rate range {}..{} step {} (at most {} rates)",
                    from,
                    to,
                    step,
                    MAX_GRID_POINTS
                );
            };
            let points = runner.rate_sweep(principal, term_months(years)?, &rates);

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&points)?);
                return Ok(());
            }

            println!("{:>8} {:>16} {:>18}", "TIN %", "Payment", "Total interest");
            for point in &points {
                let rate = annual_pct_from_monthly(point.monthly_rate);
                match point.summary {
                    Some(s) => println!(
                        "{:>8.3} {:>16} {:>18}",
                        rate,
                        eur(s.monthly_payment),
                        eur(s.total_interest)
                    ),
                    None => println!("{:>8.3} {:>16} {:>18}", rate, "-", "-"),
                }
            }
        }

        Commands::Regions => {
            for region in runner.reference().regional_taxes.regions() {
                println!("{}", region);
            }
        }
    }

    Ok(())
}

fn term_months(years: u32) -> Result<u32> {
    match years.checked_mul(12) {
        Some(months) => Ok(months),
        None => bail!("A term of {} years is too long", years),
    }
}

fn write_schedule_csv(path: &std::path::Path, rows: &[AmortizationRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn print_comparison(cmp: &MixedComparison, phase1_rate: f64) {
    println!("Fixed loan (reference)");
    println!("  Monthly payment:        {}", eur(cmp.fixed.monthly_payment));
    println!("  Total interest:         {}", eur(cmp.fixed.total_interest));
    println!("  Principal + interest:   {}", eur(cmp.fixed.total_repaid));
    println!("  Months:                 {}", cmp.total_months);
    println!();

    let phase2_rate = if cmp.phase1_months >= cmp.total_months {
        "-".to_string()
    } else {
        match cmp.phase2_annual_pct {
            Some(pct) => format!("{:.3} % TIN", pct),
            None => "not found".to_string(),
        }
    };

    println!("Mixed loan");
    println!("  Phase 1 rate:           {:.3} % TIN", phase1_rate);
    println!("  Phase 2 rate needed:    {}", phase2_rate);
    println!("  Phase 1 payment:        {}", eur(cmp.mixed.phase1_payment));
    println!("  Phase 2 payment:        {}", optional_eur(cmp.mixed.phase2_payment));
    println!("  Phase 1 interest:       {}", eur(cmp.mixed.phase1_interest));
    println!("  Phase 2 interest:       {}", optional_eur(cmp.mixed.phase2_interest));
    println!("  Total interest:         {}", eur(cmp.mixed.total_interest));
    println!("  Principal + interest:   {}", eur(cmp.mixed.total_repaid));
    println!();
    println!("Difference (mixed - fixed): {}", eur(cmp.difference));
}

fn print_investment(analysis: &InvestmentAnalysis) {
    let a = &analysis.acquisition;
    match analysis.monthly_payment {
        Some(payment) => println!("Monthly mortgage payment:  {}", eur(payment)),
        None => println!("Monthly mortgage payment:  -"),
    }
    println!();
    println!("Initial contribution ({})", a.region);
    println!("  Down payment ({:.1}%):     {}", a.down_payment_pct, eur(a.down_payment));
    println!(
        "  Taxes ({:.2}% + {:.2}%):   {}",
        a.transfer_tax_rate * 100.0,
        a.stamp_duty_rate * 100.0,
        eur(a.taxes)
    );
    println!("  Registry and notary:     {}", eur(a.registry_and_notary));
    println!("  Appraisal:               {}", eur(a.appraisal));
    println!("  Agency:                  {}", eur(a.agency));
    println!("  Opening commission:      {}", eur(a.opening_commission));
    println!("  Extra contribution:      {}", eur(a.extra_contribution));
    println!("  TOTAL:                   {}", eur(a.total));
    println!();

    let s = &analysis.snapshot;
    println!("Annual rental income:      {}", eur(s.annual_income));
    println!("Annual mortgage:           {}", eur(s.annual_mortgage));
    println!("Other annual expenses:     {}", eur(s.other_annual_expenses));
    println!("Annual cash flow:          {}", eur(s.annual_cashflow));
    println!();
    println!("Cash-on-cash return:       {}", pct(analysis.simple_return));
    println!(
        "Compound equivalent ({}y): {}",
        analysis.horizon_years,
        pct(analysis.compound_return)
    );
    println!();
    println!("{:>5} {:>12} {:>12}", "Year", "Simple", "Compound");
    for row in &analysis.yearly {
        println!(
            "{:>5} {:>12} {:>12}",
            row.year,
            pct(row.simple_return),
            pct(row.compound_equivalent)
        );
    }
}

/// `1234567.891` -> `1,234,567.89 €`
fn eur(x: f64) -> String {
    let formatted = format!("{:.2}", x.abs());
    let (int_part, dec_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::new();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if x < 0.0 && formatted != "0.00" { "-" } else { "" };
    format!("{}{}.{} €", sign, grouped, dec_part)
}

fn optional_eur(x: Option<f64>) -> String {
    x.map(eur).unwrap_or_else(|| "-".to_string())
}

fn pct(x: f64) -> String {
    if x.is_nan() {
        "undefined".to_string()
    } else {
        format!("{:.2} %", x * 100.0)
    }
}
