//! Statistical imputation methods.
//!
//! Provides median imputation for numeric columns and constant imputation
//! for text columns. Both operate on a working copy owned by the caller.

use crate::error::{CleaningError, Result};
use crate::utils::{fill_numeric_nulls, fill_string_nulls, is_numeric_dtype, nan_to_null};
use polars::prelude::*;

/// What median imputation did to a column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MedianOutcome {
    /// Nulls were replaced with the median of the non-null values.
    Filled { median: f64, count: usize },
    /// The column had no nulls and was left as-is, dtype included.
    NoMissing,
    /// The column had no non-null values, so the median is undefined and
    /// the column was left as-is.
    Undefined,
}

/// Statistical imputation methods for filling missing values.
pub struct StatisticalImputer;

impl StatisticalImputer {
    /// Apply median imputation to a numeric column.
    ///
    /// The median is computed from the column's current non-null values.
    /// Float `NaN` counts as missing: it is excluded from the median and filled.
    /// With `strict` set, an undefined median is an error instead of a no-op.
    pub fn apply_numeric_median(
        df: &mut DataFrame,
        col_name: &str,
        strict: bool,
    ) -> Result<MedianOutcome> {
        let series = nan_to_null(df.column(col_name)?.as_materialized_series())?;
        let null_count = series.null_count();

        // A column read with no values at all has the Null dtype
        let median = if series.dtype() == &DataType::Null {
            None
        } else if is_numeric_dtype(series.dtype()) {
            if null_count == 0 {
                return Ok(MedianOutcome::NoMissing);
            }
            series.median()
        } else {
            return Err(CleaningError::Imputation {
                column: col_name.to_string(),
                reason: format!("expected a numeric column, found {}", series.dtype()),
            });
        };

        match median {
            Some(median) => {
                let filled = fill_numeric_nulls(&series, median)?;
                df.replace(col_name, filled)?;
                Ok(MedianOutcome::Filled {
                    median,
                    count: null_count,
                })
            }
            None if strict && null_count > 0 => Err(CleaningError::Imputation {
                column: col_name.to_string(),
                reason: "no valid values to compute a median from".to_string(),
            }),
            None => Ok(MedianOutcome::Undefined),
        }
    }

    /// Replace nulls in a column with a constant string.
    ///
    /// Returns the number of values filled. The column becomes a `String`
    /// column if it was not one already.
    pub fn apply_constant_imputation(
        df: &mut DataFrame,
        col_name: &str,
        fill_value: &str,
    ) -> Result<usize> {
        let series = df.column(col_name)?.as_materialized_series().clone();
        let null_count = series.null_count();

        if null_count > 0 {
            let filled = fill_string_nulls(&series, fill_value)?;
            df.replace(col_name, filled)?;
        }

        Ok(null_count)
    }
}
