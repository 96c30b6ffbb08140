//! End-to-end analysis of a financed rental property

use serde::{Deserialize, Serialize};

use super::acquisition::{AcquisitionBreakdown, AcquisitionCosts};
use super::cashflow::{InvestmentSnapshot, RentalInputs};
use super::ratios::{cash_on_cash, compound_equivalent, return_comparison, ReturnComparisonRow};
use crate::amortization::{schedule, LoanTerms, ScheduleSummary};
use crate::error::TableError;
use crate::reference::RegionalTaxTable;

/// Everything the buyer decides up front
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentRequest {
    pub property_price: f64,
    /// Financed share of the price, in percent
    pub financing_pct: f64,
    pub term_years: u32,
    /// Nominal annual rate (TIN), in percent
    pub annual_rate_pct: f64,
    pub region: String,
    pub extra_contribution: f64,
    pub rental: RentalInputs,
    /// Horizon for the compounded return; defaults to the mortgage term
    pub horizon_years: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentAnalysis {
    pub financed_amount: f64,
    /// `None` when nothing is financed (no schedule)
    pub monthly_payment: Option<f64>,
    pub acquisition: AcquisitionBreakdown,
    pub snapshot: InvestmentSnapshot,
    /// Cash-on-cash return
    pub simple_return: f64,
    pub horizon_years: u32,
    /// `NaN` when undefined for the chosen horizon
    pub compound_return: f64,
    pub yearly: Vec<ReturnComparisonRow>,
}

/// Run the full analysis for `request`.
///
/// Fails only when the request names a region missing from `taxes`.
pub fn analyze_investment(
    request: &InvestmentRequest,
    taxes: &RegionalTaxTable,
    costs: &AcquisitionCosts,
) -> Result<InvestmentAnalysis, TableError> {
    let tax = taxes
        .get(&request.region)
        .ok_or_else(|| TableError::UnknownRegion(request.region.clone()))?;

    let financed_amount = request.property_price * request.financing_pct / 100.0;
    let terms = LoanTerms::from_annual(financed_amount, request.annual_rate_pct, request.term_years);
    let monthly_payment = ScheduleSummary::from_rows(&schedule(&terms)).map(|s| s.monthly_payment);

    let acquisition = AcquisitionBreakdown::compute(
        request.property_price,
        request.financing_pct,
        tax,
        costs,
        request.extra_contribution,
    );
    let snapshot = InvestmentSnapshot::from_rental(&request.rental, monthly_payment.unwrap_or(0.0));

    let simple_return = cash_on_cash(snapshot.annual_cashflow, acquisition.total);
    let horizon_years = request.horizon_years.unwrap_or(request.term_years);

    Ok(InvestmentAnalysis {
        financed_amount,
        monthly_payment,
        acquisition,
        snapshot,
        simple_return,
        horizon_years,
        compound_return: compound_equivalent(simple_return, horizon_years),
        yearly: return_comparison(simple_return, horizon_years),
    })
}
