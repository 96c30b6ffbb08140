//! Insurance premium estimates from an age x capital table
//!
//! Premiums are read off a grid of tabulated ages and insured capitals by
//! bilinear interpolation. Outside the grid the boundary segment's slope is
//! extended, so extreme inputs can give large or negative values; treat
//! those as advisory only.

use serde::{Deserialize, Serialize};

use crate::error::TableError;

/// Annual premiums by tabulated age (rows) and insured capital (columns)
///
/// Deserialization goes through [`PremiumTable::new`], so a decoded table
/// satisfies the same shape and ordering checks as a built one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPremiumTable")]
pub struct PremiumTable {
    ages: Vec<u32>,
    capitals: Vec<f64>,
    /// premiums[age_index][capital_index]
    premiums: Vec<Vec<f64>>,
}

/// Unchecked wire form of [`PremiumTable`]
#[derive(Deserialize)]
struct RawPremiumTable {
    ages: Vec<u32>,
    capitals: Vec<f64>,
    premiums: Vec<Vec<f64>>,
}

impl TryFrom<RawPremiumTable> for PremiumTable {
    type Error = TableError;

    fn try_from(raw: RawPremiumTable) -> Result<Self, Self::Error> {
        Self::new(raw.ages, raw.capitals, raw.premiums)
    }
}

impl PremiumTable {
    /// Build a table, checking that both axes are non-empty and strictly
    /// ascending and that every row has one value per capital breakpoint
    pub fn new(ages: Vec<u32>, capitals: Vec<f64>, premiums: Vec<Vec<f64>>) -> Result<Self, TableError> {
        if ages.is_empty() || capitals.is_empty() {
            return Err(TableError::Shape("premium table needs at least one age and one capital".into()));
        }
        if capitals.iter().any(|c| !c.is_finite()) {
            return Err(TableError::Shape("capital breakpoints must be finite".into()));
        }
        if ages.windows(2).any(|w| w[1] <= w[0]) {
            return Err(TableError::Unordered { axis: "age" });
        }
        if capitals.windows(2).any(|w| !(w[1] > w[0])) {
            return Err(TableError::Unordered { axis: "capital" });
        }
        if premiums.len() != ages.len() {
            return Err(TableError::Shape(format!(
                "{} premium rows for {} ages",
                premiums.len(),
                ages.len()
            )));
        }
        if let Some((i, row)) = premiums.iter().enumerate().find(|(_, row)| row.len() != capitals.len()) {
            return Err(TableError::Shape(format!(
                "row for age {} has {} values, expected {}",
                ages[i],
                row.len(),
                capitals.len()
            )));
        }

        Ok(Self { ages, capitals, premiums })
    }

    /// Illustrative annual life-cover premiums shipped with the crate
    pub fn default_table() -> Self {
        Self {
            ages: vec![20, 30, 40, 50, 60, 65],
            capitals: vec![50_000.0, 100_000.0, 150_000.0, 200_000.0, 300_000.0],
            premiums: vec![
                vec![45.0, 80.0, 115.0, 150.0, 220.0],      // 20
                vec![60.0, 110.0, 160.0, 210.0, 310.0],     // 30
                vec![105.0, 195.0, 285.0, 375.0, 555.0],    // 40
                vec![230.0, 440.0, 650.0, 860.0, 1280.0],   // 50
                vec![520.0, 1020.0, 1520.0, 2020.0, 3020.0], // 60
                vec![790.0, 1560.0, 2330.0, 3100.0, 4640.0], // 65
            ],
        }
    }

    pub fn ages(&self) -> &[u32] {
        &self.ages
    }

    pub fn capitals(&self) -> &[f64] {
        &self.capitals
    }

    /// Tabulated premium at exact breakpoint indices
    pub fn value(&self, age_idx: usize, capital_idx: usize) -> Option<f64> {
        self.premiums.get(age_idx)?.get(capital_idx).copied()
    }

    /// Estimated premium for any `(age, capital)` pair
    pub fn estimate(&self, age: f64, capital: f64) -> f64 {
        let age_axis: Vec<f64> = self.ages.iter().map(|&a| a as f64).collect();
        let (a0, a1) = bracket(&age_axis, age);
        let (c0, c1) = bracket(&self.capitals, capital);

        let across_capital = |row: &[f64]| {
            lerp(capital, self.capitals[c0], self.capitals[c1], row[c0], row[c1])
        };
        let low = across_capital(&self.premiums[a0]);
        let high = across_capital(&self.premiums[a1]);

        lerp(age, age_axis[a0], age_axis[a1], low, high)
    }
}

impl Default for PremiumTable {
    fn default() -> Self {
        Self::default_table()
    }
}

/// Estimate a premium from `table`
pub fn premium(age: f64, capital: f64, table: &PremiumTable) -> f64 {
    table.estimate(age, capital)
}

/// Indices of the breakpoints used to interpolate at `x`.
///
/// Below the first breakpoint the two lowest are used, above the last the two
/// highest; inside, the nearest breakpoints at or below and at or above `x`
/// (the same index when `x` hits a breakpoint).
fn bracket(axis: &[f64], x: f64) -> (usize, usize) {
    let last = axis.len() - 1;
    if last == 0 {
        return (0, 0);
    }
    if x <= axis[0] {
        return (0, 1);
    }
    if x >= axis[last] {
        return (last - 1, last);
    }

    let upper = axis.partition_point(|&v| v < x).clamp(1, last);
    if axis[upper] == x {
        (upper, upper)
    } else {
        (upper - 1, upper)
    }
}

/// Linear interpolation through `(x0, y0)` and `(x1, y1)`, exact at both ends
fn lerp(x: f64, x0: f64, x1: f64, y0: f64, y1: f64) -> f64 {
    if x0 == x1 {
        return y0;
    }
    let t = (x - x0) / (x1 - x0);
    y0 * (1.0 - t) + y1 * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_exact_at_breakpoints() {
        let table = PremiumTable::default_table();
        for (i, &age) in table.ages().iter().enumerate() {
            for (j, &capital) in table.capitals().iter().enumerate() {
                assert_eq!(
                    table.estimate(age as f64, capital),
                    table.value(i, j).unwrap(),
                    "age {} capital {}",
                    age,
                    capital
                );
            }
        }
    }

    #[test]
    fn test_bilinear_midpoint() {
        let table = PremiumTable::default_table();
        // Midway between ages 30/40 and capitals 100k/150k
        let expected = (110.0 + 160.0 + 195.0 + 285.0) / 4.0;
        assert_abs_diff_eq!(table.estimate(35.0, 125_000.0), expected, epsilon = 1e-9);
    }

    #[test]
    fn test_interpolation_along_one_axis() {
        let table = PremiumTable::default_table();
        assert_abs_diff_eq!(table.estimate(45.0, 100_000.0), (195.0 + 440.0) / 2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(table.estimate(50.0, 250_000.0), (860.0 + 1280.0) / 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_extrapolation_below_minimum_age() {
        let table = PremiumTable::default_table();
        // Slope between ages 20 and 30 at 100k is 3.0 per year
        assert_abs_diff_eq!(table.estimate(18.0, 100_000.0), 80.0 - 2.0 * 3.0, epsilon = 1e-9);
        // Far enough below, the extrapolation turns negative without failing
        assert!(table.estimate(-100.0, 100_000.0) < 0.0);
    }

    #[test]
    fn test_extrapolation_above_bounds() {
        let table = PremiumTable::default_table();
        // Ages 60-65 at 300k: slope 324 per year
        assert_abs_diff_eq!(table.estimate(70.0, 300_000.0), 4640.0 + 5.0 * 324.0, epsilon = 1e-9);
        // Capitals 200k-300k at age 20: 0.0007 per unit
        assert_abs_diff_eq!(table.estimate(20.0, 400_000.0), 290.0, epsilon = 1e-9);
        assert!(table.estimate(1e6, 1e9).is_finite());
    }

    #[test]
    fn test_single_breakpoint_axis() {
        let table = PremiumTable::new(vec![40], vec![100_000.0, 200_000.0], vec![vec![200.0, 400.0]]).unwrap();
        assert_abs_diff_eq!(table.estimate(25.0, 150_000.0), 300.0, epsilon = 1e-9);
        assert_abs_diff_eq!(premium(80.0, 150_000.0, &table), 300.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rejects_malformed_tables() {
        assert!(matches!(
            PremiumTable::new(vec![30, 20], vec![1.0], vec![vec![1.0], vec![2.0]]),
            Err(TableError::Unordered { axis: "age" })
        ));
        assert!(matches!(
            PremiumTable::new(vec![20], vec![2.0, 1.0], vec![vec![1.0, 2.0]]),
            Err(TableError::Unordered { axis: "capital" })
        ));
        assert!(matches!(
            PremiumTable::new(vec![20, 30], vec![1.0, 2.0], vec![vec![1.0, 2.0], vec![3.0]]),
            Err(TableError::Shape(_))
        ));
        assert!(matches!(PremiumTable::new(vec![], vec![], vec![]), Err(TableError::Shape(_))));
        assert!(matches!(
            PremiumTable::new(vec![20], vec![f64::NAN], vec![vec![1.0]]),
            Err(TableError::Shape(_))
        ));
    }

    #[test]
    fn test_json_round_trip_keeps_table() {
        let table = PremiumTable::default_table();
        let json = serde_json::to_string(&table).unwrap();
        let decoded: PremiumTable = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, table);
        assert_eq!(decoded.estimate(40.0, 150_000.0), 285.0);
    }

    #[test]
    fn test_json_rejects_invalid_tables() {
        let invalid = [
            r#"{"ages":[],"capitals":[],"premiums":[]}"#,
            r#"{"ages":[30,20],"capitals":[1000.0],"premiums":[[1.0],[2.0]]}"#,
            r#"{"ages":[20],"capitals":[2000.0,1000.0],"premiums":[[1.0,2.0]]}"#,
            r#"{"ages":[20,30],"capitals":[1000.0,2000.0],"premiums":[[1.0,2.0],[3.0]]}"#,
        ];
        for json in invalid {
            let result = serde_json::from_str::<PremiumTable>(json);
            assert!(result.is_err(), "accepted {}", json);
        }
    }
}
