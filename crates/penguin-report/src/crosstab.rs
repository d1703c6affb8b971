//! Species × island cross-tabulations.
//!
//! [`ContingencyTable`] counts rows per (species, island) pair and backs both
//! the report table and the stacked percentage chart. [`PivotTable`] holds the
//! mean body mass per pair.
//!
//! Keys are sorted lexicographically. In the contingency table a missing
//! category is counted under its own `NaN` key (sorted last) so the cells
//! always add up to the number of rows.

use crate::error::{ReportError, Result};
use crate::reporting::markdown::{Cell, MarkdownTable};
use crate::types::{BODY_MASS, ISLAND, MISSING_LABEL, SPECIES};
use crate::utils::{category_values, numeric_values};
use polars::prelude::*;
use serde::Serialize;
use tracing::debug;

const COUNT_ALIAS: &str = "count";
const MEAN_ALIAS: &str = "mean";

fn sort_keys(keys: &mut [String]) {
    keys.sort_by(|a, b| {
        (a == MISSING_LABEL)
            .cmp(&(b == MISSING_LABEL))
            .then_with(|| a.cmp(b))
    });
}

/// Distinct sorted keys of a grouped key column.
fn distinct_keys(values: &[Option<String>]) -> Vec<String> {
    let mut keys: Vec<String> = values.iter().flatten().cloned().collect();
    sort_keys(&mut keys);
    keys.dedup();
    keys
}

fn position(keys: &[String], key: &str) -> Option<usize> {
    keys.iter().position(|k| k == key)
}

// =============================================================================
// Contingency table
// =============================================================================

/// Row counts per (species, island).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContingencyTable {
    /// Row keys.
    pub species: Vec<String>,
    /// Column keys.
    pub islands: Vec<String>,
    /// `counts[species][island]`.
    pub counts: Vec<Vec<usize>>,
}

impl ContingencyTable {
    /// Count rows of `df` per (species, island).
    pub fn compute(df: &DataFrame) -> Result<Self> {
        let grouped = df
            .clone()
            .lazy()
            .select([
                col(SPECIES).fill_null(lit(MISSING_LABEL)),
                col(ISLAND).fill_null(lit(MISSING_LABEL)),
            ])
            .group_by([col(SPECIES), col(ISLAND)])
            .agg([len().alias(COUNT_ALIAS)])
            .collect()?;

        let species_keys = category_values(&grouped, SPECIES)?;
        let island_keys = category_values(&grouped, ISLAND)?;
        let counts = numeric_values(&grouped, COUNT_ALIAS)?;

        let species = distinct_keys(&species_keys);
        let islands = distinct_keys(&island_keys);
        let mut table = vec![vec![0usize; islands.len()]; species.len()];

        for ((s, i), count) in species_keys.iter().zip(&island_keys).zip(&counts) {
            let (Some(s), Some(i), Some(count)) = (s, i, count) else {
                continue;
            };
            if let (Some(r), Some(c)) = (position(&species, s), position(&islands, i)) {
                table[r][c] = *count as usize;
            }
        }

        debug!(
            "Contingency table: {} species x {} islands",
            species.len(),
            islands.len()
        );
        Ok(Self {
            species,
            islands,
            counts: table,
        })
    }

    /// True if there are no cells.
    pub fn is_empty(&self) -> bool {
        self.species.is_empty() || self.islands.is_empty()
    }

    /// Count for a pair, zero when either key is unknown.
    pub fn get(&self, species: &str, island: &str) -> usize {
        match (position(&self.species, species), position(&self.islands, island)) {
            (Some(r), Some(c)) => self.counts[r][c],
            _ => 0,
        }
    }

    /// Sum of every cell.
    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    /// Per-island totals.
    pub fn column_totals(&self) -> Vec<usize> {
        (0..self.islands.len())
            .map(|c| self.counts.iter().map(|row| row[c]).sum())
            .collect()
    }

    /// Column-normalized percentages, transposed: `shares[island][species]`.
    ///
    /// Each island's shares add up to 100.
    ///
    /// # Errors
    ///
    /// [`ReportError::NoChartData`] if the table is empty or an island has
    /// no rows.
    pub fn column_shares(&self) -> Result<Vec<Vec<f64>>> {
        if self.is_empty() {
            return Err(ReportError::NoChartData(
                "contingency table is empty".to_string(),
            ));
        }

        let totals = self.column_totals();
        if let Some(c) = totals.iter().position(|t| *t == 0) {
            return Err(ReportError::NoChartData(format!(
                "island '{}' has no observations",
                self.islands[c]
            )));
        }

        Ok(totals
            .iter()
            .enumerate()
            .map(|(c, total)| {
                self.counts
                    .iter()
                    .map(|row| row[c] as f64 / *total as f64 * 100.0)
                    .collect()
            })
            .collect())
    }

    pub fn to_markdown(&self) -> String {
        let mut table =
            MarkdownTable::new(std::iter::once(SPECIES.to_string()).chain(self.islands.clone()));
        for (name, row) in self.species.iter().zip(&self.counts) {
            let mut cells = vec![Cell::from(name.as_str())];
            cells.extend(row.iter().map(|c| Cell::from(*c)));
            table.push_row(cells);
        }
        table.to_markdown()
    }
}

// =============================================================================
// Pivot table
// =============================================================================

/// Mean body mass per (species, island).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PivotTable {
    pub species: Vec<String>,
    pub islands: Vec<String>,
    /// `means[species][island]`, `None` for a pair with no usable mass.
    pub means: Vec<Vec<Option<f64>>>,
}

impl PivotTable {
    /// Average `body_mass_g` per pair. Rows missing either key are ignored.
    pub fn compute(df: &DataFrame) -> Result<Self> {
        let grouped = df
            .clone()
            .lazy()
            .filter(col(SPECIES).is_not_null().and(col(ISLAND).is_not_null()))
            .group_by([col(SPECIES), col(ISLAND)])
            .agg([col(BODY_MASS).cast(DataType::Float64).mean().alias(MEAN_ALIAS)])
            .collect()?;

        let species_keys = category_values(&grouped, SPECIES)?;
        let island_keys = category_values(&grouped, ISLAND)?;
        let means = numeric_values(&grouped, MEAN_ALIAS)?;

        let species = distinct_keys(&species_keys);
        let islands = distinct_keys(&island_keys);
        let mut table = vec![vec![None; islands.len()]; species.len()];

        for ((s, i), mean) in species_keys.iter().zip(&island_keys).zip(&means) {
            let (Some(s), Some(i)) = (s, i) else {
                continue;
            };
            if let (Some(r), Some(c)) = (position(&species, s), position(&islands, i)) {
                table[r][c] = mean.filter(|m| m.is_finite());
            }
        }

        Ok(Self {
            species,
            islands,
            means: table,
        })
    }

    pub fn get(&self, species: &str, island: &str) -> Option<f64> {
        let r = position(&self.species, species)?;
        let c = position(&self.islands, island)?;
        self.means[r][c]
    }

    pub fn to_markdown(&self) -> String {
        let mut table =
            MarkdownTable::new(std::iter::once(SPECIES.to_string()).chain(self.islands.clone()));
        for (name, row) in self.species.iter().zip(&self.means) {
            let mut cells = vec![Cell::from(name.as_str())];
            cells.extend(row.iter().map(|m| Cell::float(*m)));
            table.push_row(cells);
        }
        table.to_markdown()
    }
}
