//! Two-phase interest and the equal-interest rate solver

use serde::{Deserialize, Serialize};

use crate::amortization::{schedule, LoanTerms};
use crate::rates::level_payment;

/// A loan paying `phase1_rate` for `phase1_months`, then `phase2_rate`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MixedLoanSpec {
    pub principal: f64,
    pub total_months: u32,
    /// Monthly rate of the fixed phase
    pub phase1_rate: f64,
    /// Length of the fixed phase, 0..=total_months
    pub phase1_months: u32,
    /// Monthly rate of the variable phase
    pub phase2_rate: f64,
}

impl MixedLoanSpec {
    /// Same loan with a different phase-2 rate
    pub fn with_phase2_rate(self, phase2_rate: f64) -> Self {
        Self { phase2_rate, ..self }
    }

    pub fn phase2_months(&self) -> u32 {
        self.total_months.saturating_sub(self.phase1_months)
    }
}

/// Interest split of a mixed loan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MixedInterest {
    pub total_interest: f64,
    pub phase1_interest: f64,
    pub phase2_interest: f64,
    /// Balance carried into phase 2
    pub balance_after_phase1: f64,
    /// Balance left after the last phase-2 payment. Phase 2 is not corrected
    /// row by row, so this is a float residual close to zero, not exactly zero.
    pub residual_balance: f64,
}

impl MixedInterest {
    fn identity(principal: f64) -> Self {
        Self {
            total_interest: 0.0,
            phase1_interest: 0.0,
            phase2_interest: 0.0,
            balance_after_phase1: principal,
            residual_balance: principal,
        }
    }
}

/// Total interest of a two-phase loan.
///
/// The phase-1 payment is the level payment of a fixed loan at `phase1_rate`
/// over the whole term; only `phase1_months` of it are applied. Phase 2
/// re-amortizes the carried balance at `phase2_rate` over the remaining months.
/// Invalid specs (non-positive principal, zero term, fixed phase longer than
/// the term) return zero interest with the principal untouched.
pub fn mixed_total_interest(spec: &MixedLoanSpec) -> MixedInterest {
    let p = spec.principal;
    let n = spec.total_months;
    let m1 = spec.phase1_months;

    if !(p > 0.0) || n == 0 || m1 > n {
        return MixedInterest::identity(p);
    }

    let r1 = spec.phase1_rate;
    let payment1 = level_payment(p, r1, n);

    let mut balance = p;
    let mut phase1_interest = 0.0;
    for _ in 0..m1 {
        let interest = if r1 != 0.0 { balance * r1 } else { 0.0 };
        let principal_paid = if r1 != 0.0 { payment1 - interest } else { payment1 };
        balance -= principal_paid;
        phase1_interest += interest;
    }

    let n2 = n - m1;
    if n2 == 0 {
        return MixedInterest {
            total_interest: phase1_interest,
            phase1_interest,
            phase2_interest: 0.0,
            balance_after_phase1: 0.0,
            residual_balance: 0.0,
        };
    }

    let r2 = spec.phase2_rate;
    let payment2 = level_payment(balance, r2, n2);

    let mut remaining = balance;
    let mut phase2_interest = 0.0;
    for _ in 0..n2 {
        let interest = if r2 != 0.0 { remaining * r2 } else { 0.0 };
        let principal_paid = if r2 != 0.0 { payment2 - interest } else { payment2 };
        remaining -= principal_paid;
        phase2_interest += interest;
    }

    MixedInterest {
        total_interest: phase1_interest + phase2_interest,
        phase1_interest,
        phase2_interest,
        balance_after_phase1: balance,
        residual_balance: remaining,
    }
}

/// Bisection settings for the phase-2 rate search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Initial upper bound of the bracket (monthly rate)
    pub initial_upper: f64,
    /// Factor applied to the upper bound while no sign change is found
    pub expansion_factor: f64,
    pub max_expansions: u32,
    pub max_iterations: u32,
    /// Stop when |f(mid)| falls below this
    pub tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            initial_upper: 2.0 / 12.0, // ~200% annual
            expansion_factor: 1.5,
            max_expansions: 20,
            max_iterations: 80,
            tolerance: 1e-8,
        }
    }
}

/// Outcome of the equal-interest search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateSolution {
    /// Solved monthly phase-2 rate; `None` when there is no phase 2 or no
    /// sign change could be bracketed
    pub phase2_rate: Option<f64>,
    /// Total interest of the reference fixed loan
    pub target_interest: f64,
    /// Mixed-loan interest at the solved rate (at 0% when unsolved)
    pub total_interest: f64,
    pub phase1_interest: f64,
    pub phase2_interest: f64,
}

/// Root finder for the phase-2 rate of a mixed loan
#[derive(Debug, Clone, Default)]
pub struct MixedMortgageSolver {
    config: SolverConfig,
}

impl MixedMortgageSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Find the phase-2 monthly rate giving the same total interest as a
    /// fixed loan at `reference_rate` over `total_months`.
    pub fn solve(
        &self,
        principal: f64,
        total_months: u32,
        reference_rate: f64,
        phase1_rate: f64,
        phase1_months: u32,
    ) -> RateSolution {
        let reference = schedule(&LoanTerms::new(principal, reference_rate, total_months));
        let target = reference.iter().map(|r| r.interest).sum::<f64>();

        let base = MixedLoanSpec {
            principal,
            total_months,
            phase1_rate,
            phase1_months,
            phase2_rate: 0.0,
        };

        if phase1_months >= total_months {
            return Self::unsolved(target, &base);
        }

        let f = |rate2: f64| mixed_total_interest(&base.with_phase2_rate(rate2)).total_interest - target;

        let mut lo = 0.0;
        let mut hi = self.config.initial_upper;
        let mut f_lo = f(lo);
        let mut f_hi = f(hi);

        let mut expansions = 0;
        while f_lo * f_hi > 0.0 && expansions < self.config.max_expansions {
            hi *= self.config.expansion_factor;
            f_hi = f(hi);
            expansions += 1;
        }

        if f_lo * f_hi > 0.0 {
            log::warn!(
                "No sign change for phase-2 rate up to {:.6} monthly after {} expansions",
                hi,
                expansions
            );
            return Self::unsolved(target, &base);
        }

        let mut iterations = 0;
        while iterations < self.config.max_iterations {
            iterations += 1;
            let mid = (lo + hi) / 2.0;
            let f_mid = f(mid);

            if f_mid.abs() < self.config.tolerance {
                lo = mid;
                hi = mid;
                break;
            }

            if f_lo * f_mid <= 0.0 {
                hi = mid;
                f_hi = f_mid;
            } else {
                lo = mid;
                f_lo = f_mid;
            }
        }

        let rate2 = (lo + hi) / 2.0;
        log::debug!(
            "Phase-2 rate {:.10} after {} expansions, {} iterations (f_hi={:.3e})",
            rate2,
            expansions,
            iterations,
            f_hi
        );

        let mixed = mixed_total_interest(&base.with_phase2_rate(rate2));
        RateSolution {
            phase2_rate: Some(rate2),
            target_interest: target,
            total_interest: mixed.total_interest,
            phase1_interest: mixed.phase1_interest,
            phase2_interest: mixed.phase2_interest,
        }
    }

    fn unsolved(target: f64, base: &MixedLoanSpec) -> RateSolution {
        let mixed = mixed_total_interest(base);
        RateSolution {
            phase2_rate: None,
            target_interest: target,
            total_interest: mixed.total_interest,
            phase1_interest: mixed.phase1_interest,
            phase2_interest: mixed.phase2_interest,
        }
    }
}

/// Solve with the default bisection settings
pub fn solve_rate2_for_equal_interest(
    principal: f64,
    total_months: u32,
    reference_rate: f64,
    phase1_rate: f64,
    phase1_months: u32,
) -> RateSolution {
    MixedMortgageSolver::default().solve(
        principal,
        total_months,
        reference_rate,
        phase1_rate,
        phase1_months,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::ScheduleSummary;
    use approx::assert_abs_diff_eq;

    fn fixed_interest(principal: f64, rate: f64, months: u32) -> f64 {
        let rows = schedule(&LoanTerms::new(principal, rate, months));
        ScheduleSummary::from_rows(&rows).unwrap().total_interest
    }

    #[test]
    fn test_full_term_fixed_phase_matches_fixed_loan() {
        let r = 0.025 / 12.0;
        let spec = MixedLoanSpec {
            principal: 150_000.0,
            total_months: 300,
            phase1_rate: r,
            phase1_months: 300,
            phase2_rate: 0.5,
        };
        let mixed = mixed_total_interest(&spec);

        assert_eq!(mixed.phase2_interest, 0.0);
        assert_eq!(mixed.total_interest, mixed.phase1_interest);
        assert_eq!(mixed.balance_after_phase1, 0.0);
        assert_abs_diff_eq!(mixed.total_interest, fixed_interest(150_000.0, r, 300), epsilon = 1e-6);
    }

    #[test]
    fn test_interest_split_adds_up() {
        let spec = MixedLoanSpec {
            principal: 150_000.0,
            total_months: 300,
            phase1_rate: 0.025 / 12.0,
            phase1_months: 60,
            phase2_rate: 0.03 / 12.0,
        };
        let mixed = mixed_total_interest(&spec);

        assert_eq!(mixed.total_interest, mixed.phase1_interest + mixed.phase2_interest);
        assert!((mixed.phase1_interest - 17_365.77).abs() < 0.01);
        assert!((mixed.balance_after_phase1 - 126_990.27).abs() < 0.01);
        assert!((mixed.total_interest - 59_403.90).abs() < 0.01);
    }

    #[test]
    fn test_phase2_residual_is_near_zero_not_forced() {
        let spec = MixedLoanSpec {
            principal: 150_000.0,
            total_months: 300,
            phase1_rate: 0.025 / 12.0,
            phase1_months: 60,
            phase2_rate: 0.04 / 12.0,
        };
        let mixed = mixed_total_interest(&spec);
        assert!(mixed.residual_balance.abs() < 1e-6, "residual {}", mixed.residual_balance);
    }

    #[test]
    fn test_zero_rates() {
        let spec = MixedLoanSpec {
            principal: 12_000.0,
            total_months: 24,
            phase1_rate: 0.0,
            phase1_months: 12,
            phase2_rate: 0.0,
        };
        let mixed = mixed_total_interest(&spec);
        assert_eq!(mixed.total_interest, 0.0);
        assert_abs_diff_eq!(mixed.balance_after_phase1, 6_000.0, epsilon = 1e-9);
        assert_abs_diff_eq!(mixed.residual_balance, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_invalid_specs_return_identity() {
        let spec = MixedLoanSpec {
            principal: 100_000.0,
            total_months: 120,
            phase1_rate: 0.002,
            phase1_months: 121,
            phase2_rate: 0.003,
        };
        let mixed = mixed_total_interest(&spec);
        assert_eq!(mixed.total_interest, 0.0);
        assert_eq!(mixed.balance_after_phase1, 100_000.0);

        let zero_term = MixedLoanSpec { total_months: 0, phase1_months: 0, ..spec };
        assert_eq!(mixed_total_interest(&zero_term).total_interest, 0.0);

        let no_principal = MixedLoanSpec { principal: 0.0, phase1_months: 60, ..spec };
        assert_eq!(mixed_total_interest(&no_principal).balance_after_phase1, 0.0);
    }

    #[test]
    fn test_solver_matches_fixed_interest() {
        let solution = solve_rate2_for_equal_interest(
            150_000.0,
            300,
            0.03 / 12.0,
            0.025 / 12.0,
            60,
        );

        let rate2 = solution.phase2_rate.expect("rate should be bracketed");
        let spec = MixedLoanSpec {
            principal: 150_000.0,
            total_months: 300,
            phase1_rate: 0.025 / 12.0,
            phase1_months: 60,
            phase2_rate: rate2,
        };
        let achieved = mixed_total_interest(&spec).total_interest;

        assert_abs_diff_eq!(achieved, solution.target_interest, epsilon = 1e-6);
        assert_abs_diff_eq!(solution.target_interest, fixed_interest(150_000.0, 0.03 / 12.0, 300), epsilon = 1e-9);
        // A cheaper first phase needs a dearer second phase
        assert!(rate2 > 0.03 / 12.0);
        assert!((rate2 * 1200.0 - 3.2598).abs() < 1e-3, "annual {}", rate2 * 1200.0);
    }

    #[test]
    fn test_solved_rate_amortizes_phase2() {
        let solution = solve_rate2_for_equal_interest(150_000.0, 300, 0.03 / 12.0, 0.025 / 12.0, 60);
        let spec = MixedLoanSpec {
            principal: 150_000.0,
            total_months: 300,
            phase1_rate: 0.025 / 12.0,
            phase1_months: 60,
            phase2_rate: solution.phase2_rate.unwrap(),
        };
        let mixed = mixed_total_interest(&spec);

        assert!(mixed.residual_balance.abs() < 1e-6, "residual {}", mixed.residual_balance);
    }

    #[test]
    fn test_zero_root_amortizes_phase2() {
        // 0% reference and 0% phase 1: bisection walks down to a vanishing rate
        let solution = solve_rate2_for_equal_interest(1e6, 360, 0.0, 0.0, 60);
        let rate2 = solution.phase2_rate.expect("zero is a valid solution");
        assert!(rate2 >= 0.0 && rate2 < 1e-12, "rate2 {}", rate2);

        let spec = MixedLoanSpec {
            principal: 1e6,
            total_months: 360,
            phase1_rate: 0.0,
            phase1_months: 60,
            phase2_rate: rate2,
        };
        let mixed = mixed_total_interest(&spec);

        assert_abs_diff_eq!(mixed.balance_after_phase1, 1e6 * 300.0 / 360.0, epsilon = 1e-6);
        assert!(mixed.residual_balance.abs() < 1e-6, "residual {}", mixed.residual_balance);
        assert!(mixed.total_interest.abs() < 1e-6);
        assert_eq!(solution.target_interest, 0.0);
    }

    #[test]
    fn test_solver_without_phase2() {
        let solution = solve_rate2_for_equal_interest(100_000.0, 240, 0.0025, 0.002, 240);
        assert!(solution.phase2_rate.is_none());
        assert_eq!(solution.phase2_interest, 0.0);
        assert_eq!(solution.total_interest, solution.phase1_interest);
    }

    #[test]
    fn test_solver_reports_unbracketed_root() {
        // Zero-rate reference: any positive phase-1 rate already overshoots
        let solution = solve_rate2_for_equal_interest(100_000.0, 240, 0.0, 0.10 / 12.0, 120);
        assert!(solution.phase2_rate.is_none());
        assert_eq!(solution.target_interest, 0.0);
        assert!(solution.phase1_interest > 0.0);
    }

    #[test]
    fn test_solver_distinguishes_zero_rate_solution() {
        // Reference is zero-rate and phase 1 is zero-rate: f(0) == 0 exactly
        let solution = solve_rate2_for_equal_interest(50_000.0, 120, 0.0, 0.0, 60);
        let rate2 = solution.phase2_rate.expect("zero is a valid solution");
        assert!(rate2.abs() < 1e-12);
    }

    #[test]
    fn test_custom_config_caps_iterations() {
        let solver = MixedMortgageSolver::new(SolverConfig {
            max_iterations: 5,
            ..SolverConfig::default()
        });
        let coarse = solver.solve(150_000.0, 300, 0.03 / 12.0, 0.025 / 12.0, 60);
        let fine = solve_rate2_for_equal_interest(150_000.0, 300, 0.03 / 12.0, 0.025 / 12.0, 60);

        let coarse_err = (coarse.total_interest - coarse.target_interest).abs();
        let fine_err = (fine.total_interest - fine.target_interest).abs();
        assert!(coarse_err > fine_err);
    }
}
