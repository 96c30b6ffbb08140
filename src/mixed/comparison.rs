//! Fixed-rate loan vs mixed loan at the equal-interest phase-2 rate

use serde::{Deserialize, Serialize};

use super::solver::{mixed_total_interest, MixedLoanSpec, MixedMortgageSolver, RateSolution};
use crate::amortization::{schedule, LoanTerms, ScheduleSummary};
use crate::rates::{annual_pct_from_monthly, level_payment};

/// Monthly payments of each phase of a mixed loan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhasePayments {
    /// Level payment at the phase-1 rate over the whole term
    pub phase1: f64,
    /// Payment re-amortizing the carried balance; 0 without a phase 2
    pub phase2: f64,
}

/// Payments of both phases of `spec`
pub fn phase_payments(spec: &MixedLoanSpec) -> PhasePayments {
    if !(spec.principal > 0.0) || spec.total_months == 0 {
        return PhasePayments { phase1: 0.0, phase2: 0.0 };
    }

    let phase1 = level_payment(spec.principal, spec.phase1_rate, spec.total_months);
    let n2 = spec.phase2_months();
    let phase2 = if n2 > 0 {
        let carried = mixed_total_interest(spec).balance_after_phase1;
        level_payment(carried, spec.phase2_rate, n2)
    } else {
        0.0
    };

    PhasePayments { phase1, phase2 }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixedLoanSummary {
    pub monthly_payment: f64,
    pub principal: f64,
    pub total_interest: f64,
    /// Principal plus interest
    pub total_repaid: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MixedLoanSummary {
    pub phase1_payment: f64,
    /// Absent when no phase-2 rate was solved
    pub phase2_payment: Option<f64>,
    pub phase1_interest: f64,
    /// Absent when no phase-2 rate was solved
    pub phase2_interest: Option<f64>,
    pub balance_after_phase1: f64,
    pub principal: f64,
    pub total_interest: f64,
    pub total_repaid: f64,
}

/// Full fixed vs mixed comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MixedComparison {
    pub total_months: u32,
    pub phase1_months: u32,
    pub fixed: FixedLoanSummary,
    pub solution: RateSolution,
    /// Solved phase-2 rate as a nominal annual percentage
    pub phase2_annual_pct: Option<f64>,
    pub mixed: MixedLoanSummary,
    /// Mixed total interest minus fixed total interest (~0 when solved)
    pub difference: f64,
}

/// Compare a fixed loan at `reference_rate` with a mixed loan whose first
/// `phase1_months` pay `phase1_rate` and whose second phase is solved for.
///
/// Returns `None` for a non-positive principal or a zero term. When no rate
/// is found the mixed detail is evaluated with a 0% second phase.
pub fn compare_fixed_vs_mixed(
    solver: &MixedMortgageSolver,
    principal: f64,
    total_months: u32,
    reference_rate: f64,
    phase1_rate: f64,
    phase1_months: u32,
) -> Option<MixedComparison> {
    let fixed_rows = schedule(&LoanTerms::new(principal, reference_rate, total_months));
    let fixed_summary = ScheduleSummary::from_rows(&fixed_rows)?;

    let solution = solver.solve(
        principal,
        total_months,
        reference_rate,
        phase1_rate,
        phase1_months,
    );

    let spec = MixedLoanSpec {
        principal,
        total_months,
        phase1_rate,
        phase1_months,
        phase2_rate: solution.phase2_rate.unwrap_or(0.0),
    };
    let detail = mixed_total_interest(&spec);
    let payments = phase_payments(&spec);
    let solved = solution.phase2_rate.is_some();

    let fixed = FixedLoanSummary {
        monthly_payment: fixed_summary.monthly_payment,
        principal,
        total_interest: solution.target_interest,
        total_repaid: principal + solution.target_interest,
    };

    let mixed = MixedLoanSummary {
        phase1_payment: payments.phase1,
        phase2_payment: solved.then_some(payments.phase2),
        phase1_interest: detail.phase1_interest,
        phase2_interest: solved.then_some(detail.phase2_interest),
        balance_after_phase1: detail.balance_after_phase1,
        principal,
        total_interest: detail.total_interest,
        total_repaid: principal + detail.total_interest,
    };

    Some(MixedComparison {
        total_months,
        phase1_months,
        fixed,
        solution,
        phase2_annual_pct: solution.phase2_rate.map(annual_pct_from_monthly),
        mixed,
        difference: detail.total_interest - solution.target_interest,
    })
}
