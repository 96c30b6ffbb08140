//! Annual rental income and expenses

use serde::{Deserialize, Serialize};

/// Rental income and running costs as the owner quotes them
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RentalInputs {
    pub monthly_rent: f64,
    pub monthly_community_fee: f64,
    pub monthly_insurance: f64,
    /// Annual property tax (IBI)
    pub annual_property_tax: f64,
    pub annual_maintenance: f64,
}

/// Annualized income, expenses (mortgage included) and cash flow
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InvestmentSnapshot {
    pub annual_income: f64,
    pub annual_mortgage: f64,
    /// Property tax, community, maintenance and insurance
    pub other_annual_expenses: f64,
    pub annual_expenses: f64,
    pub annual_cashflow: f64,
}

impl InvestmentSnapshot {
    /// Annualize `rental` against a monthly mortgage payment
    pub fn from_rental(rental: &RentalInputs, monthly_mortgage_payment: f64) -> Self {
        let annual_income = rental.monthly_rent * 12.0;
        let annual_mortgage = monthly_mortgage_payment * 12.0;
        let other_annual_expenses = rental.annual_property_tax
            + rental.monthly_community_fee * 12.0
            + rental.annual_maintenance
            + rental.monthly_insurance * 12.0;
        let annual_expenses = other_annual_expenses + annual_mortgage;

        Self {
            annual_income,
            annual_mortgage,
            other_annual_expenses,
            annual_expenses,
            annual_cashflow: annual_income - annual_expenses,
        }
    }
}
