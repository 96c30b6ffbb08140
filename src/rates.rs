//! Nominal annual rate (TIN) conversions
//!
//! Every formula in the crate works with monthly rates expressed as
//! fractions. Callers usually hold an annual percentage instead.

/// Monthly fractional rate from a nominal annual percentage (3.0 -> 0.0025)
pub fn monthly_rate_from_annual_pct(annual_pct: f64) -> f64 {
    annual_pct / 100.0 / 12.0
}

/// Nominal annual percentage from a monthly fractional rate (0.0025 -> 3.0)
pub fn annual_pct_from_monthly(monthly_rate: f64) -> f64 {
    monthly_rate * 12.0 * 100.0
}

/// Level (annuity) payment for `principal` at `monthly_rate` over `months`.
///
/// A zero rate splits the principal evenly. Callers guard `months > 0`.
/// The discount factor goes through `ln_1p`/`exp_m1` so rates too small to
/// change `1.0 + r` still give a finite payment.
pub fn level_payment(principal: f64, monthly_rate: f64, months: u32) -> f64 {
    if monthly_rate == 0.0 {
        principal / months as f64
    } else {
        let annuity_factor = -(-(months as f64) * monthly_rate.ln_1p()).exp_m1();
        principal * monthly_rate / annuity_factor
    }
}

/// Upper bound on the points of a rate grid
pub const MAX_GRID_POINTS: usize = 10_000;

/// Monthly rates for annual percentages `from_pct, from_pct + step_pct, ...`
/// up to `to_pct` inclusive.
///
/// `None` for a non-positive step, a reversed range or more than
/// [`MAX_GRID_POINTS`] points.
pub fn annual_rate_grid(from_pct: f64, to_pct: f64, step_pct: f64) -> Option<Vec<f64>> {
    if !(step_pct > 0.0) || !(to_pct >= from_pct) {
        return None;
    }

    let steps = ((to_pct - from_pct) / step_pct + 1e-9).floor();
    if !(steps < MAX_GRID_POINTS as f64) {
        return None;
    }

    Some(
        (0..=steps as usize)
            .map(|i| monthly_rate_from_annual_pct(from_pct + step_pct * i as f64))
            .collect(),
    )
}
