//! Mixed (fixed then variable) mortgages
//!
//! - Two-phase interest totals
//! - Bisection solver for the phase-2 rate that matches a fixed loan's interest
//! - Side-by-side fixed vs mixed comparison

mod solver;
mod comparison;

pub use solver::{
    mixed_total_interest, solve_rate2_for_equal_interest, MixedInterest, MixedLoanSpec,
    MixedMortgageSolver, RateSolution, SolverConfig,
};
pub use comparison::{
    compare_fixed_vs_mixed, phase_payments, FixedLoanSummary, MixedComparison, MixedLoanSummary,
    PhasePayments,
};
