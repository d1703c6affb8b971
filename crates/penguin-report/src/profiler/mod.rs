//! Descriptive statistics for the observation table.
//!
//! This module provides the tables shown in the data summary part of the
//! report:
//! - the first rows of the dataset ([`head_table`])
//! - a per-column summary ([`describe`], [`describe_table`])
//! - per-column missing counts ([`missing_summary`])
//! - the pairwise Pearson matrix used by the heatmap ([`correlation_matrix`])
//!
//! All functions are pure; numeric columns are read as `Float64`, every
//! other column as text.

pub mod statistics;

use crate::error::Result;
use crate::reporting::markdown::{Cell, MarkdownTable};
use crate::utils::{category_values, is_numeric_dtype, numeric_values, present_values};
use polars::prelude::*;
use serde::Serialize;
use tracing::debug;

/// Row labels of the describe table, in order.
pub const DESCRIBE_ROWS: [&str; 11] = [
    "count", "unique", "top", "freq", "mean", "std", "min", "25%", "50%", "75%", "max",
];

// =============================================================================
// Head
// =============================================================================

/// First `n` rows with a leading positional index column.
pub fn head_table(df: &DataFrame, n: usize) -> Result<MarkdownTable> {
    let head = df.head(Some(n));
    let names: Vec<String> = head
        .get_column_names()
        .into_iter()
        .map(|c| c.to_string())
        .collect();

    let mut columns: Vec<Vec<Cell>> = Vec::with_capacity(names.len());
    for name in &names {
        let dtype = head.column(name)?.dtype().clone();
        let cells = if is_numeric_dtype(&dtype) {
            numeric_values(&head, name)?
                .into_iter()
                .map(Cell::float)
                .collect()
        } else {
            category_values(&head, name)?
                .into_iter()
                .map(Cell::text)
                .collect()
        };
        columns.push(cells);
    }

    let mut table = MarkdownTable::new(std::iter::once(String::new()).chain(names));
    for row in 0..head.height() {
        let mut cells = vec![Cell::Int(row as i64)];
        cells.extend(columns.iter().map(|c| c[row].clone()));
        table.push_row(cells);
    }
    Ok(table)
}

// =============================================================================
// Describe
// =============================================================================

/// Summary of one column. Numeric columns fill the moment and quantile
/// fields; text columns fill `unique`, `top` and `freq`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnDescription {
    pub name: String,
    pub count: usize,
    pub unique: Option<usize>,
    pub top: Option<String>,
    pub freq: Option<usize>,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub q50: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

impl ColumnDescription {
    fn empty(name: &str, count: usize) -> Self {
        Self {
            name: name.to_string(),
            count,
            unique: None,
            top: None,
            freq: None,
            mean: None,
            std: None,
            min: None,
            q25: None,
            q50: None,
            q75: None,
            max: None,
        }
    }

    fn numeric(name: &str, values: &[f64]) -> Self {
        let sorted = statistics::sorted(values);
        Self {
            mean: statistics::mean(&sorted),
            std: statistics::std_dev(&sorted),
            min: sorted.first().copied(),
            q25: statistics::quantile_sorted(&sorted, 0.25),
            q50: statistics::quantile_sorted(&sorted, 0.5),
            q75: statistics::quantile_sorted(&sorted, 0.75),
            max: sorted.last().copied(),
            ..Self::empty(name, sorted.len())
        }
    }

    fn categorical(name: &str, values: &[Option<String>]) -> Self {
        let present: Vec<&str> = values.iter().flatten().map(String::as_str).collect();
        let mut description = Self::empty(name, present.len());

        if !present.is_empty() {
            let mut distinct = present.clone();
            distinct.sort_unstable();
            distinct.dedup();
            description.unique = Some(distinct.len());
        }
        if let Some((top, freq)) = statistics::mode(present.iter().copied()) {
            description.top = Some(top.to_string());
            description.freq = Some(freq);
        }
        description
    }

    /// Cells in [`DESCRIBE_ROWS`] order.
    fn cells(&self) -> [Cell; 11] {
        let count = |v: Option<usize>| v.map_or(Cell::Missing, Cell::from);
        [
            Cell::from(self.count),
            count(self.unique),
            Cell::text(self.top.clone()),
            count(self.freq),
            Cell::float(self.mean),
            Cell::float(self.std),
            Cell::float(self.min),
            Cell::float(self.q25),
            Cell::float(self.q50),
            Cell::float(self.q75),
            Cell::float(self.max),
        ]
    }
}

/// Describe every column of `df`, in column order.
pub fn describe(df: &DataFrame) -> Result<Vec<ColumnDescription>> {
    let mut descriptions = Vec::with_capacity(df.width());

    for column in df.get_columns() {
        let name = column.name().as_str();
        let description = if is_numeric_dtype(column.dtype()) {
            let values = numeric_values(df, name)?;
            ColumnDescription::numeric(name, &present_values(&values))
        } else {
            ColumnDescription::categorical(name, &category_values(df, name)?)
        };
        descriptions.push(description);
    }

    debug!("Described {} columns", descriptions.len());
    Ok(descriptions)
}

/// Describe table: one column per dataset column, rows as in
/// [`DESCRIBE_ROWS`]. Cells that do not apply render as `nan`.
pub fn describe_table(df: &DataFrame) -> Result<MarkdownTable> {
    let descriptions = describe(df)?;
    let columns: Vec<[Cell; 11]> = descriptions.iter().map(ColumnDescription::cells).collect();

    let mut table = MarkdownTable::new(
        std::iter::once(String::new()).chain(descriptions.iter().map(|d| d.name.clone())),
    );
    for (row, label) in DESCRIBE_ROWS.iter().enumerate() {
        let mut cells = vec![Cell::from(*label)];
        cells.extend(columns.iter().map(|c| c[row].clone()));
        table.push_row(cells);
    }
    Ok(table)
}

// =============================================================================
// Missing values
// =============================================================================

/// Null counts per column, in column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingSummary {
    /// Total number of rows.
    pub rows: usize,
    /// `(column, null count)` pairs.
    pub counts: Vec<(String, usize)>,
}

impl MissingSummary {
    /// Null count of a column, if the column exists.
    pub fn count(&self, column: &str) -> Option<usize> {
        self.counts
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, count)| *count)
    }

    /// Sum over all columns.
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, count)| count).sum()
    }

    pub fn to_markdown(&self) -> String {
        let mut table = MarkdownTable::new(["", "missing_count"]);
        for (name, count) in &self.counts {
            table.push_row(vec![Cell::from(name.as_str()), Cell::from(*count)]);
        }
        table.to_markdown()
    }
}

/// Count nulls per column.
pub fn missing_summary(df: &DataFrame) -> MissingSummary {
    let counts = df
        .get_columns()
        .iter()
        .map(|c| (c.name().to_string(), c.null_count()))
        .collect();

    MissingSummary {
        rows: df.height(),
        counts,
    }
}

// =============================================================================
// Correlation
// =============================================================================

/// Square matrix of pairwise Pearson coefficients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    /// Row-major values; `None` where the coefficient is undefined.
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn size(&self) -> usize {
        self.columns.len()
    }

    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        self.values.get(row)?.get(column).copied().flatten()
    }
}

/// Pairwise-complete Pearson correlation between `columns`.
pub fn correlation_matrix(df: &DataFrame, columns: &[&str]) -> Result<CorrelationMatrix> {
    let data: Vec<Vec<Option<f64>>> = columns
        .iter()
        .map(|name| numeric_values(df, name))
        .collect::<Result<_>>()?;

    let values = data
        .iter()
        .map(|xs| {
            data.iter()
                .map(|ys| statistics::pearson(xs, ys))
                .collect()
        })
        .collect();

    Ok(CorrelationMatrix {
        columns: columns.iter().map(|c| c.to_string()).collect(),
        values,
    })
}
