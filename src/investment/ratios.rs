//! Return ratios of a rental investment

use serde::{Deserialize, Serialize};

/// Cash-on-cash return: annual cash flow over the initial cash invested.
///
/// A non-positive contribution gives 0.
pub fn cash_on_cash(annual_cashflow: f64, initial_contribution: f64) -> f64 {
    if initial_contribution > 0.0 {
        annual_cashflow / initial_contribution
    } else {
        0.0
    }
}

/// Constant annual rate that compounds to the same gain as `simple_return`
/// earned for `horizon_years` without compounding:
/// `(1 + n·r)^(1/n) - 1`.
///
/// Returns `NaN` when `1 + n·r <= 0` or the horizon is zero; the rate is
/// undefined there.
pub fn compound_equivalent(simple_return: f64, horizon_years: u32) -> f64 {
    if horizon_years == 0 {
        return f64::NAN;
    }

    let n = horizon_years as f64;
    let base = 1.0 + n * simple_return;
    if base <= 0.0 {
        log::warn!(
            "Compound equivalent undefined for simple return {} over {} years",
            simple_return,
            horizon_years
        );
        return f64::NAN;
    }

    base.powf(1.0 / n) - 1.0
}

/// Simple vs compounded return for one horizon length
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnComparisonRow {
    pub year: u32,
    pub simple_return: f64,
    /// `NaN` when undefined
    pub compound_equivalent: f64,
}

/// One row per horizon `1..=horizon_years`
pub fn return_comparison(simple_return: f64, horizon_years: u32) -> Vec<ReturnComparisonRow> {
    (1..=horizon_years)
        .map(|year| ReturnComparisonRow {
            year,
            simple_return,
            compound_equivalent: compound_equivalent(simple_return, year),
        })
        .collect()
}
