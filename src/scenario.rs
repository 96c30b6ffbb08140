//! Scenario runner for repeated calculations
//!
//! Pre-loads reference tables once, then allows running many schedules,
//! comparisons and investment analyses without re-reading CSV files.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::amortization::{schedule, AmortizationRow, LoanTerms, ScheduleSummary};
use crate::error::TableError;
use crate::investment::{analyze_investment, InvestmentAnalysis, InvestmentRequest};
use crate::mixed::{compare_fixed_vs_mixed, MixedComparison, MixedMortgageSolver};
use crate::reference::ReferenceData;

/// One point of a rate sweep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub monthly_rate: f64,
    /// `None` when the loan produces no schedule
    pub summary: Option<ScheduleSummary>,
}

/// Pre-loaded scenario runner
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::from_csv()?;
///
/// for pct in [2.5, 3.0, 3.5] {
///     let terms = LoanTerms::from_annual(150_000.0, pct, 25);
///     let summary = runner.summarize(&terms);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    reference: ReferenceData,
}

impl ScenarioRunner {
    /// Create runner with built-in reference tables
    pub fn new() -> Self {
        Self::default()
    }

    /// Create runner by loading tables from CSV files
    pub fn from_csv() -> Result<Self, TableError> {
        Ok(Self {
            reference: ReferenceData::from_csv()?,
        })
    }

    /// Create runner from a specific tables directory
    pub fn from_csv_path(path: &std::path::Path) -> Result<Self, TableError> {
        Ok(Self {
            reference: ReferenceData::from_csv_path(path)?,
        })
    }

    /// Create runner with pre-built reference data
    pub fn with_reference_data(reference: ReferenceData) -> Self {
        Self { reference }
    }

    pub fn schedule(&self, terms: &LoanTerms) -> Vec<AmortizationRow> {
        schedule(terms)
    }

    pub fn summarize(&self, terms: &LoanTerms) -> Option<ScheduleSummary> {
        ScheduleSummary::from_rows(&schedule(terms))
    }

    /// Solver configured from the reference data
    pub fn solver(&self) -> MixedMortgageSolver {
        MixedMortgageSolver::new(self.reference.solver)
    }

    /// Fixed vs mixed comparison, see [`compare_fixed_vs_mixed`]
    pub fn compare(
        &self,
        principal: f64,
        total_months: u32,
        reference_rate: f64,
        phase1_rate: f64,
        phase1_months: u32,
    ) -> Option<MixedComparison> {
        compare_fixed_vs_mixed(
            &self.solver(),
            principal,
            total_months,
            reference_rate,
            phase1_rate,
            phase1_months,
        )
    }

    /// Estimated annual insurance premium
    pub fn premium(&self, age: f64, capital: f64) -> f64 {
        self.reference.premium_table.estimate(age, capital)
    }

    pub fn analyze_investment(&self, request: &InvestmentRequest) -> Result<InvestmentAnalysis, TableError> {
        analyze_investment(
            request,
            &self.reference.regional_taxes,
            &self.reference.acquisition_costs,
        )
    }

    /// Summaries of the same loan at several monthly rates, computed in parallel
    pub fn rate_sweep(&self, principal: f64, term_months: u32, monthly_rates: &[f64]) -> Vec<SweepPoint> {
        monthly_rates
            .par_iter()
            .map(|&monthly_rate| SweepPoint {
                monthly_rate,
                summary: self.summarize(&LoanTerms::new(principal, monthly_rate, term_months)),
            })
            .collect()
    }

    /// Get reference to the tables for inspection
    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    /// Get mutable reference to the tables for customization
    pub fn reference_mut(&mut self) -> &mut ReferenceData {
        &mut self.reference
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::investment::RentalInputs;
    use crate::rates::monthly_rate_from_annual_pct;

    #[test]
    fn test_rate_sweep() {
        let runner = ScenarioRunner::new();
        let rates: Vec<f64> = [0.0, 2.0, 3.0, 4.0].iter().map(|&p| monthly_rate_from_annual_pct(p)).collect();

        let points = runner.rate_sweep(100_000.0, 240, &rates);
        assert_eq!(points.len(), 4);

        // Order is preserved and interest grows with the rate
        assert_eq!(points[0].monthly_rate, 0.0);
        let interest: Vec<f64> = points.iter().map(|p| p.summary.unwrap().total_interest).collect();
        assert_eq!(interest[0], 0.0);
        assert!(interest.windows(2).all(|w| w[1] > w[0]));
        assert!((interest[2] - 33_103.42).abs() < 0.01);
    }

    #[test]
    fn test_rate_sweep_invalid_loan() {
        let runner = ScenarioRunner::new();
        let points = runner.rate_sweep(0.0, 240, &[0.0025]);
        assert!(points[0].summary.is_none());
    }

    #[test]
    fn test_runner_uses_custom_solver_config() {
        let mut runner = ScenarioRunner::new();
        runner.reference_mut().solver.max_expansions = 0;
        runner.reference_mut().solver.initial_upper = 0.0001;

        // Bracket too narrow and no expansion allowed
        let cmp = runner
            .compare(150_000.0, 300, 0.03 / 12.0, 0.025 / 12.0, 60)
            .unwrap();
        assert!(cmp.solution.phase2_rate.is_none());
    }

    #[test]
    fn test_runner_operations() {
        let runner = ScenarioRunner::from_csv().unwrap();

        assert_eq!(runner.premium(40.0, 150_000.0), 285.0);
        assert!(runner.compare(100_000.0, 240, 0.0025, 0.002, 60).is_some());

        let request = InvestmentRequest {
            property_price: 150_000.0,
            financing_pct: 80.0,
            term_years: 25,
            annual_rate_pct: 3.0,
            region: "Galicia".into(),
            extra_contribution: 10_000.0,
            rental: RentalInputs {
                monthly_rent: 850.0,
                ..RentalInputs::default()
            },
            horizon_years: Some(10),
        };
        let analysis = runner.analyze_investment(&request).unwrap();
        assert_eq!(analysis.acquisition.extra_contribution, 10_000.0);
        assert_eq!(analysis.yearly.len(), 10);
    }
}
