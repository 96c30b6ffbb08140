//! Schedule rows and aggregations over them

use chrono::Month;
use serde::{Deserialize, Serialize};

/// One month of an amortization schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// Payment number, 1-indexed
    pub month: u32,
    pub payment: f64,
    pub interest: f64,
    /// Principal repaid this month
    pub principal: f64,
    /// Outstanding balance after the payment
    pub balance: f64,
}

/// Totals over a whole schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    /// Level monthly payment (first row)
    pub monthly_payment: f64,
    pub total_interest: f64,
    pub total_principal: f64,
    pub total_paid: f64,
    pub payments: u32,
}

impl ScheduleSummary {
    /// Summarize a schedule; `None` for the empty "no schedule" result
    pub fn from_rows(rows: &[AmortizationRow]) -> Option<Self> {
        let first = rows.first()?;
        let total_interest: f64 = rows.iter().map(|r| r.interest).sum();
        let total_principal: f64 = rows.iter().map(|r| r.principal).sum();
        let total_paid: f64 = rows.iter().map(|r| r.payment).sum();

        Some(Self {
            monthly_payment: first.payment,
            total_interest,
            total_principal,
            total_paid,
            payments: rows.len() as u32,
        })
    }
}

/// Interest and principal paid during one calendar year of the loan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnualRow {
    /// Loan year, 1-indexed
    pub year: u32,
    /// Calendar month of the first payment in this year
    pub first_month: Month,
    /// Calendar month of the last payment in this year
    pub last_month: Month,
    /// Number of payments falling in this year
    pub payments: u32,
    pub interest: f64,
    pub principal: f64,
    /// Balance after the last payment of the year
    pub ending_balance: f64,
}

/// Group a schedule into calendar years.
///
/// `start_month` is the calendar month (1-12) of the first payment, so the
/// first year may be shorter than twelve payments. Out-of-range values fall
/// back to January.
pub fn annual_breakdown(rows: &[AmortizationRow], start_month: u32) -> Vec<AnnualRow> {
    let mut month = u8::try_from(start_month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .unwrap_or(Month::January);

    let mut years: Vec<AnnualRow> = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        if i > 0 {
            month = month.succ();
        }
        match years.last_mut() {
            Some(current) if month != Month::January => {
                current.last_month = month;
                current.payments += 1;
                current.interest += row.interest;
                current.principal += row.principal;
                current.ending_balance = row.balance;
            }
            _ => years.push(AnnualRow {
                year: years.len() as u32 + 1,
                first_month: month,
                last_month: month,
                payments: 1,
                interest: row.interest,
                principal: row.principal,
                ending_balance: row.balance,
            }),
        }
    }

    years
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::{schedule, LoanTerms};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_summary() {
        let rows = schedule(&LoanTerms::from_annual(100_000.0, 3.0, 20));
        let summary = ScheduleSummary::from_rows(&rows).unwrap();

        assert_eq!(summary.payments, 240);
        assert_abs_diff_eq!(summary.total_principal, 100_000.0, epsilon = 1e-6);
        assert_abs_diff_eq!(
            summary.total_paid,
            summary.total_principal + summary.total_interest,
            epsilon = 1e-6
        );
        assert!((summary.monthly_payment - 554.60).abs() < 0.005);
    }

    #[test]
    fn test_summary_of_empty_schedule() {
        assert!(ScheduleSummary::from_rows(&[]).is_none());
    }

    #[test]
    fn test_annual_breakdown_january_start() {
        let rows = schedule(&LoanTerms::from_annual(60_000.0, 2.0, 5));
        let years = annual_breakdown(&rows, 1);

        assert_eq!(years.len(), 5);
        assert!(years.iter().all(|y| y.payments == 12));
        assert_eq!(years.last().unwrap().ending_balance, 0.0);

        let principal: f64 = years.iter().map(|y| y.principal).sum();
        assert_abs_diff_eq!(principal, 60_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_annual_breakdown_mid_year_start() {
        // First payment in October: 3 payments in year 1, then 12, ..., 9 in year 6
        let rows = schedule(&LoanTerms::from_annual(60_000.0, 2.0, 5));
        let years = annual_breakdown(&rows, 10);

        assert_eq!(years.len(), 6);
        assert_eq!(years[0].payments, 3);
        assert_eq!(years[1].payments, 12);
        assert_eq!(years[5].payments, 9);
        assert_eq!(years.iter().map(|y| y.payments).sum::<u32>(), 60);

        assert_eq!(years[0].first_month, Month::October);
        assert_eq!(years[0].last_month, Month::December);
        assert_eq!(years[1].first_month, Month::January);
        assert_eq!(years[1].last_month, Month::December);
        assert_eq!(years[5].last_month, Month::September);
    }

    #[test]
    fn test_annual_row_serializes_month_names() {
        let rows = schedule(&LoanTerms::from_annual(12_000.0, 2.0, 1));
        let years = annual_breakdown(&rows, 7);
        let json = serde_json::to_value(years[0]).unwrap();

        assert_eq!(json["first_month"], "July");
        assert_eq!(json["last_month"], "December");
    }

    #[test]
    fn test_annual_breakdown_invalid_start_month() {
        let rows = schedule(&LoanTerms::from_annual(10_000.0, 5.0, 2));
        assert_eq!(annual_breakdown(&rows, 0), annual_breakdown(&rows, 1));
        assert_eq!(annual_breakdown(&rows, 13), annual_breakdown(&rows, 1));
    }
}
