//! Shared utilities for the cleaning pipeline.
//!
//! Column lookups, dtype checks and null filling used by both strategies.

use crate::error::{CleaningError, Result};
use crate::types::CleaningStep;
use polars::prelude::*;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a DataType is numeric (integer or float).
///
/// Booleans are not numeric.
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

/// Names of the numeric columns of `df`, in column order.
pub fn numeric_column_names(df: &DataFrame) -> Vec<PlSmallStr> {
    df.get_columns()
        .iter()
        .filter(|col| is_numeric_dtype(col.dtype()))
        .map(|col| col.name().clone())
        .collect()
}

// =============================================================================
// Column Utilities
// =============================================================================

/// Fail with [`CleaningError::ColumnMissing`] for the first name not in `df`.
pub fn require_columns(df: &DataFrame, columns: &[&str], step: CleaningStep) -> Result<()> {
    match columns
        .iter()
        .find(|name| df.get_column_index(name).is_none())
    {
        Some(missing) => Err(CleaningError::column_missing(step, *missing)),
        None => Ok(()),
    }
}

/// Return a copy of `df` without `columns`.
///
/// Every column must be present; the input frame is left untouched.
pub fn drop_columns(df: &DataFrame, columns: &[&str], step: CleaningStep) -> Result<DataFrame> {
    require_columns(df, columns, step)?;

    let mut result = df.clone();
    for name in columns {
        result = result.drop(name)?;
    }
    Ok(result)
}

// =============================================================================
// Null Filling
// =============================================================================

/// Replace nulls in a numeric series with `fill_value`.
///
/// The result is `Float64` and keeps the series name.
pub fn fill_numeric_nulls(series: &Series, fill_value: f64) -> PolarsResult<Series> {
    let values = series.cast(&DataType::Float64)?;
    let filled: Float64Chunked = values
        .f64()?
        .into_iter()
        .map(|v| Some(v.unwrap_or(fill_value)))
        .collect();

    Ok(filled.with_name(series.name().clone()).into_series())
}

/// Turn float `NaN` values into nulls so they count as missing.
///
/// Non-float series are returned unchanged. Float series come back as `Float64`.
pub fn nan_to_null(series: &Series) -> PolarsResult<Series> {
    if !matches!(series.dtype(), DataType::Float32 | DataType::Float64) {
        return Ok(series.clone());
    }

    let values = series.cast(&DataType::Float64)?;
    let cleaned: Float64Chunked = values
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect();

    Ok(cleaned.with_name(series.name().clone()).into_series())
}

/// Replace nulls in a series with the string `fill_value`.
///
/// Non-string series are cast to `String` first.
pub fn fill_string_nulls(series: &Series, fill_value: &str) -> PolarsResult<Series> {
    let values = series.cast(&DataType::String)?;
    let filled: StringChunked = values
        .str()?
        .into_iter()
        .map(|v| Some(v.unwrap_or(fill_value)))
        .collect();

    Ok(filled.with_name(series.name().clone()).into_series())
}
