//! Constant-rate amortization schedules and their aggregations

mod engine;
mod schedule;

pub use engine::{schedule, LoanTerms};
pub use schedule::{annual_breakdown, AmortizationRow, AnnualRow, ScheduleSummary};
