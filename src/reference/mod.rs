//! Static reference data: premium grid, regional taxes, acquisition fees

mod premium;
mod taxes;
pub mod loader;

pub use premium::{premium, PremiumTable};
pub use taxes::{RegionalTax, RegionalTaxTable};
pub use loader::LoadedTables;

use std::path::Path;

use crate::error::TableError;
use crate::investment::AcquisitionCosts;
use crate::mixed::SolverConfig;

/// Container for all read-only reference data used by the calculators
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub premium_table: PremiumTable,
    pub regional_taxes: RegionalTaxTable,
    pub acquisition_costs: AcquisitionCosts,
    pub solver: SolverConfig,
}

impl ReferenceData {
    /// Load tables from CSV files in the default location (data/tables/)
    pub fn from_csv() -> Result<Self, TableError> {
        Self::from_csv_path(Path::new(loader::DEFAULT_TABLES_PATH))
    }

    /// Load tables from CSV files in a specific directory; fees and solver
    /// settings keep their defaults
    pub fn from_csv_path(path: &Path) -> Result<Self, TableError> {
        let loaded = LoadedTables::load_from(path)?;

        Ok(Self {
            premium_table: loaded.premium_table,
            regional_taxes: loaded.regional_taxes,
            ..Self::default()
        })
    }
}
