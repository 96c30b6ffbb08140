//! Mortgage Calculator - amortization schedules and mortgage comparisons
//!
//! This library provides:
//! - Constant-rate amortization schedules that fully amortize to zero
//! - Mixed (fixed then variable) mortgage interest and the phase-2 rate
//!   that matches a fixed loan's total interest
//! - Insurance premium estimates by bilinear interpolation over a rate table
//! - Rental investment cash flow, cash-on-cash return and its compounded
//!   equivalent
//!
//! Every calculation is a pure function of its inputs.

pub mod amortization;
pub mod error;
pub mod investment;
pub mod mixed;
pub mod rates;
pub mod reference;
pub mod scenario;

// Re-export commonly used types
pub use amortization::{schedule, AmortizationRow, LoanTerms, ScheduleSummary};
pub use error::TableError;
pub use investment::{cash_on_cash, compound_equivalent, InvestmentRequest, InvestmentSnapshot};
pub use mixed::{mixed_total_interest, solve_rate2_for_equal_interest, MixedLoanSpec, MixedMortgageSolver};
pub use reference::{premium, PremiumTable, ReferenceData, RegionalTaxTable};
pub use scenario::ScenarioRunner;
