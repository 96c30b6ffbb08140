//! CSV-based reference table loader
//!
//! Loads the premium grid and regional tax rates from CSV files in data/tables/

use std::fs::File;
use std::path::Path;

use super::{PremiumTable, RegionalTax, RegionalTaxTable};
use crate::error::TableError;

/// Default path to the reference tables directory
pub const DEFAULT_TABLES_PATH: &str = "data/tables";

pub const PREMIUM_TABLE_FILE: &str = "premium_table.csv";
pub const REGIONAL_TAXES_FILE: &str = "regional_taxes.csv";

fn open_reader(path: &Path) -> Result<csv::Reader<File>, TableError> {
    let file = File::open(path).map_err(|source| TableError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(csv::Reader::from_reader(file))
}

fn parse_number(value: &str, context: impl FnOnce() -> String) -> Result<f64, TableError> {
    value.trim().parse().map_err(|_| TableError::Parse {
        value: value.to_string(),
        context: context(),
    })
}

/// Load the premium grid.
///
/// Header: `age,<capital_1>,<capital_2>,...`; one row per tabulated age.
pub fn load_premium_table(path: &Path) -> Result<PremiumTable, TableError> {
    let file_path = path.join(PREMIUM_TABLE_FILE);
    let csv_err = |source: csv::Error| TableError::Csv {
        path: file_path.clone(),
        source,
    };
    let mut reader = open_reader(&file_path)?;

    let headers = reader.headers().map_err(csv_err)?.clone();
    let capitals = headers
        .iter()
        .skip(1)
        .map(|h| parse_number(h, || "premium table header".to_string()))
        .collect::<Result<Vec<_>, _>>()?;

    let mut ages = Vec::new();
    let mut premiums = Vec::new();

    for result in reader.records() {
        let record = result.map_err(csv_err)?;
        let age_field = record.get(0).unwrap_or_default();
        let age: u32 = age_field.trim().parse().map_err(|_| TableError::Parse {
            value: age_field.to_string(),
            context: "premium table age column".to_string(),
        })?;

        let row = record
            .iter()
            .skip(1)
            .map(|v| parse_number(v, || format!("premium table row for age {}", age)))
            .collect::<Result<Vec<_>, _>>()?;

        ages.push(age);
        premiums.push(row);
    }

    log::debug!(
        "Loaded premium table: {} ages x {} capitals",
        ages.len(),
        capitals.len()
    );
    PremiumTable::new(ages, capitals, premiums)
}

/// Raw CSV row of regional_taxes.csv
#[derive(Debug, serde::Deserialize)]
struct TaxRow {
    region: String,
    transfer_tax: f64,
    stamp_duty: f64,
}

/// Load regional tax rates (`region,transfer_tax,stamp_duty`)
pub fn load_regional_taxes(path: &Path) -> Result<RegionalTaxTable, TableError> {
    let file_path = path.join(REGIONAL_TAXES_FILE);
    let mut reader = open_reader(&file_path)?;

    let mut entries = Vec::new();
    for result in reader.deserialize() {
        let row: TaxRow = result.map_err(|source| TableError::Csv {
            path: file_path.clone(),
            source,
        })?;
        entries.push(RegionalTax {
            region: row.region,
            transfer_tax: row.transfer_tax,
            stamp_duty: row.stamp_duty,
        });
    }

    log::debug!("Loaded {} regional tax rates", entries.len());
    RegionalTaxTable::new(entries)
}

/// All reference tables loaded from one directory
pub struct LoadedTables {
    pub premium_table: PremiumTable,
    pub regional_taxes: RegionalTaxTable,
}

impl LoadedTables {
    /// Load all tables from the default path
    pub fn load_default() -> Result<Self, TableError> {
        Self::load_from(Path::new(DEFAULT_TABLES_PATH))
    }

    /// Load all tables from a specific path
    pub fn load_from(path: &Path) -> Result<Self, TableError> {
        Ok(Self {
            premium_table: load_premium_table(path)?,
            regional_taxes: load_regional_taxes(path)?,
        })
    }
}
