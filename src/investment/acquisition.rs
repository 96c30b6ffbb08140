//! Initial cash needed to buy a financed property

use serde::{Deserialize, Serialize};

use crate::reference::RegionalTax;

/// Fixed purchase fees and the lender's opening commission
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AcquisitionCosts {
    pub registry_and_notary: f64,
    pub appraisal: f64,
    pub agency: f64,
    /// Fraction of the financed amount
    pub opening_commission_rate: f64,
}

impl AcquisitionCosts {
    pub fn fixed_fees(&self) -> f64 {
        self.registry_and_notary + self.appraisal + self.agency
    }
}

impl Default for AcquisitionCosts {
    fn default() -> Self {
        Self {
            registry_and_notary: 1500.0,
            appraisal: 400.0,
            agency: 400.0,
            opening_commission_rate: 0.02,
        }
    }
}

/// Itemized initial contribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcquisitionBreakdown {
    pub price: f64,
    /// Financed share of the price, in percent
    pub financing_pct: f64,
    pub financed_amount: f64,
    /// Unfinanced share of the price, in percent
    pub down_payment_pct: f64,
    pub down_payment: f64,
    pub region: String,
    pub transfer_tax_rate: f64,
    pub stamp_duty_rate: f64,
    pub taxes: f64,
    pub registry_and_notary: f64,
    pub appraisal: f64,
    pub agency: f64,
    pub fixed_fees: f64,
    pub opening_commission: f64,
    /// Renovation or other up-front spending
    pub extra_contribution: f64,
    /// Total cash the buyer puts in
    pub total: f64,
}

impl AcquisitionBreakdown {
    pub fn compute(
        price: f64,
        financing_pct: f64,
        tax: &RegionalTax,
        costs: &AcquisitionCosts,
        extra_contribution: f64,
    ) -> Self {
        let financed_amount = price * financing_pct / 100.0;
        let down_payment_pct = 100.0 - financing_pct;
        let down_payment = price * down_payment_pct / 100.0;
        let taxes = price * tax.combined_rate();
        let fixed_fees = costs.fixed_fees();
        let opening_commission = financed_amount * costs.opening_commission_rate;

        Self {
            price,
            financing_pct,
            financed_amount,
            down_payment_pct,
            down_payment,
            region: tax.region.clone(),
            transfer_tax_rate: tax.transfer_tax,
            stamp_duty_rate: tax.stamp_duty,
            taxes,
            registry_and_notary: costs.registry_and_notary,
            appraisal: costs.appraisal,
            agency: costs.agency,
            fixed_fees,
            opening_commission,
            extra_contribution,
            total: down_payment + taxes + fixed_fees + opening_commission + extra_contribution,
        }
    }
}
