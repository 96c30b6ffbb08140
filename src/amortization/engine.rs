//! Month-by-month amortization of a constant-rate loan

use serde::{Deserialize, Serialize};

use super::schedule::AmortizationRow;
use crate::rates::{level_payment, monthly_rate_from_annual_pct};

/// Inputs of a constant-rate loan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Amount borrowed
    pub principal: f64,
    /// Monthly rate as a fraction (TIN / 12)
    pub monthly_rate: f64,
    /// Number of monthly payments
    pub term_months: u32,
}

impl LoanTerms {
    pub fn new(principal: f64, monthly_rate: f64, term_months: u32) -> Self {
        Self {
            principal,
            monthly_rate,
            term_months,
        }
    }

    /// Build terms from an annual percentage and a term in years.
    ///
    /// A term whose month count overflows `u32` becomes zero months, which
    /// [`schedule`] rejects as invalid.
    pub fn from_annual(principal: f64, annual_rate_pct: f64, years: u32) -> Self {
        Self::new(
            principal,
            monthly_rate_from_annual_pct(annual_rate_pct),
            years.checked_mul(12).unwrap_or(0),
        )
    }

    /// Terms that produce no schedule (non-positive principal or zero term)
    pub fn is_empty(&self) -> bool {
        !(self.principal > 0.0) || self.term_months == 0
    }
}

/// Compute the monthly schedule for `terms`.
///
/// Returns an empty vector when the principal is not positive or the term is
/// zero; callers surface that as a warning. The last row absorbs any residual
/// left by the closed-form payment so the ending balance is exactly zero.
pub fn schedule(terms: &LoanTerms) -> Vec<AmortizationRow> {
    if terms.is_empty() {
        log::warn!(
            "No schedule for principal={} term_months={}",
            terms.principal,
            terms.term_months
        );
        return Vec::new();
    }

    let n = terms.term_months;
    let r = terms.monthly_rate;
    let payment = level_payment(terms.principal, r, n);

    let mut balance = terms.principal;
    let mut rows = Vec::with_capacity(n as usize);

    for month in 1..=n {
        let interest = if r != 0.0 { balance * r } else { 0.0 };
        let mut principal_paid = if r != 0.0 { payment - interest } else { payment };

        let (payment_eff, balance_end) = if month == n {
            principal_paid = balance;
            (principal_paid + interest, 0.0)
        } else {
            (payment, balance - principal_paid)
        };

        rows.push(AmortizationRow {
            month,
            payment: payment_eff,
            interest,
            principal: principal_paid,
            balance: balance_end.max(0.0),
        });
        balance = balance_end;
    }

    rows
}
