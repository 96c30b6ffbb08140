//! Rental investment analysis
//!
//! - Initial contribution (down payment, taxes, fees, commission)
//! - Annual cash flow including the mortgage
//! - Cash-on-cash return and its compounded equivalent

mod acquisition;
mod analysis;
mod cashflow;
mod ratios;

pub use acquisition::{AcquisitionBreakdown, AcquisitionCosts};
pub use analysis::{analyze_investment, InvestmentAnalysis, InvestmentRequest};
pub use cashflow::{InvestmentSnapshot, RentalInputs};
pub use ratios::{cash_on_cash, compound_equivalent, return_comparison, ReturnComparisonRow};
