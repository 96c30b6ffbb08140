//! Regional acquisition taxes
//!
//! Each region charges a transfer tax (ITP, or VAT for new builds) and a
//! stamp duty (AJD), both as fractions of the purchase price.

use serde::{Deserialize, Serialize};

use crate::error::TableError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalTax {
    pub region: String,
    /// ITP / VAT as a fraction of the price
    pub transfer_tax: f64,
    /// AJD as a fraction of the price
    pub stamp_duty: f64,
}

impl RegionalTax {
    pub fn combined_rate(&self) -> f64 {
        self.transfer_tax + self.stamp_duty
    }
}

/// Ordered lookup of regional tax rates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalTaxTable {
    entries: Vec<RegionalTax>,
}

impl RegionalTaxTable {
    /// Build from entries, rejecting duplicate region names
    pub fn new(entries: Vec<RegionalTax>) -> Result<Self, TableError> {
        for (i, entry) in entries.iter().enumerate() {
            if entries[..i].iter().any(|e| e.region == entry.region) {
                return Err(TableError::DuplicateRegion(entry.region.clone()));
            }
        }
        Ok(Self { entries })
    }

    /// Spanish autonomous communities plus VAT for new homes
    pub fn default_spain() -> Self {
        let rates: [(&str, f64, f64); 18] = [
            ("IVA (Vivienda nueva)", 0.10, 0.012),
            ("Andalucía", 0.07, 0.015),
            ("Aragón", 0.085, 0.012),
            ("Asturias", 0.08, 0.015),
            ("Baleares", 0.08, 0.0075),
            ("Canarias", 0.065, 0.015),
            ("Cantabria", 0.08, 0.015),
            ("Castilla León", 0.08, 0.015),
            ("Castilla la Mancha", 0.09, 0.015),
            ("Cataluña", 0.10, 0.015),
            ("Comunidad Valenciana", 0.10, 0.015),
            ("Extremadura", 0.08, 0.015),
            ("Galicia", 0.10, 0.015),
            ("Comunidad de Madrid", 0.06, 0.0075),
            ("Murcia", 0.08, 0.015),
            ("Navarra", 0.06, 0.005),
            ("País Vasco", 0.07, 0.005),
            ("La Rioja", 0.07, 0.01),
        ];

        Self {
            entries: rates
                .iter()
                .map(|&(region, transfer_tax, stamp_duty)| RegionalTax {
                    region: region.to_string(),
                    transfer_tax,
                    stamp_duty,
                })
                .collect(),
        }
    }

    pub fn get(&self, region: &str) -> Option<&RegionalTax> {
        self.entries.iter().find(|e| e.region == region)
    }

    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.region.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RegionalTaxTable {
    fn default() -> Self {
        Self::default_spain()
    }
}
