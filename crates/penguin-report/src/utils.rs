//! Shared column helpers over polars frames.
//!
//! Statistics and chart code work on plain vectors; these helpers pull
//! typed values out of a `DataFrame` once and group them by category.

use crate::error::{Result, ResultExt};
use crate::types::MISSING_LABEL;
use polars::prelude::*;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

// =============================================================================
// Column extraction
// =============================================================================

/// Read a column as optional floats, casting if needed.
pub fn numeric_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let series = df
        .column(name)
        .context(format!("Reading numeric column '{name}'"))?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    Ok(series.f64()?.into_iter().collect())
}

/// Read a column as optional strings, casting if needed.
pub fn category_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let series = df
        .column(name)
        .context(format!("Reading categorical column '{name}'"))?
        .as_materialized_series()
        .cast(&DataType::String)?;
    Ok(series
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect())
}

/// Non-null values of a numeric column.
pub fn present_values(values: &[Option<f64>]) -> Vec<f64> {
    values.iter().flatten().copied().filter(|v| v.is_finite()).collect()
}

// =============================================================================
// Grouping
// =============================================================================

/// Distinct non-null categories in order of first appearance.
pub fn categories_in_order(values: &[Option<String>]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for value in values.iter().flatten() {
        if !seen.iter().any(|s| s == value) {
            seen.push(value.clone());
        }
    }
    seen
}

/// Group numeric values by category, keeping only rows where both are present.
///
/// Groups follow first-appearance order of the category over the whole
/// column, so a category whose values are all missing still yields an
/// empty group and keeps its color and position.
pub fn group_by_category(
    categories: &[Option<String>],
    values: &[Option<f64>],
) -> Vec<(String, Vec<f64>)> {
    let mut groups: Vec<(String, Vec<f64>)> = categories_in_order(categories)
        .into_iter()
        .map(|c| (c, Vec::new()))
        .collect();

    for (category, value) in categories.iter().zip(values.iter()) {
        let (Some(category), Some(value)) = (category, value) else {
            continue;
        };
        if !value.is_finite() {
            continue;
        }
        if let Some((_, bucket)) = groups.iter_mut().find(|(name, _)| name == category) {
            bucket.push(*value);
        }
    }

    groups
}

/// Count rows per category in first-appearance order.
///
/// With `include_missing`, nulls are counted under [`MISSING_LABEL`] as the
/// last bucket (only if any are present).
pub fn value_counts_in_order(
    values: &[Option<String>],
    include_missing: bool,
) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = categories_in_order(values)
        .into_iter()
        .map(|c| (c, 0))
        .collect();
    let mut missing = 0usize;

    for value in values {
        match value {
            Some(v) => {
                if let Some((_, count)) = counts.iter_mut().find(|(name, _)| name == v) {
                    *count += 1;
                }
            }
            None => missing += 1,
        }
    }

    if include_missing && missing > 0 {
        counts.push((MISSING_LABEL.to_string(), missing));
    }
    counts
}

// =============================================================================
// Tests
// =============================================================================
