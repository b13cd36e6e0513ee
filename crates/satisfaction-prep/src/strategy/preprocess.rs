use super::DataStrategy;
use crate::error::Result;
use crate::imputers::{MedianOutcome, StatisticalImputer};
use crate::types::CleaningStep;
use crate::utils::{drop_columns, numeric_column_names, require_columns};
use polars::prelude::*;
use tracing::{debug, info, warn};

/// Order timestamps dropped before any other processing.
pub const TIMESTAMP_COLUMNS: [&str; 5] = [
    "order_approved_at",
    "order_delivered_carrier_date",
    "order_delivered_customer_date",
    "order_estimated_delivery_date",
    "order_purchase_timestamp",
];

/// Product dimensions whose nulls are replaced with the column median.
pub const MEDIAN_IMPUTED_COLUMNS: [&str; 4] = [
    "product_weight_g",
    "product_length_cm",
    "product_height_cm",
    "product_width_cm",
];

/// Free-text review column.
pub const REVIEW_TEXT_COLUMN: &str = "review_comment_message";

/// Value used for a missing review text.
pub const REVIEW_FILL_VALUE: &str = "No Review";

/// Numeric identifiers dropped after the numeric filter.
///
/// `custopmer_zip_code_prefix` is spelled as it appears in the source data.
pub const IDENTIFIER_COLUMNS: [&str; 2] = ["custopmer_zip_code_prefix", "order_item_id"];

/// Cleans a raw order table into a numeric feature table.
///
/// Steps, in order:
/// 1. drop [`TIMESTAMP_COLUMNS`]
/// 2. median-impute [`MEDIAN_IMPUTED_COLUMNS`]
/// 3. fill [`REVIEW_TEXT_COLUMN`] with [`REVIEW_FILL_VALUE`]
/// 4. keep numeric columns only
/// 5. drop [`IDENTIFIER_COLUMNS`]
///
/// Every dropped or imputed column must be present. The input table is not
/// modified and the row count is preserved.
#[derive(Debug, Clone, Default)]
pub struct PreProcessStrategy {
    strict_imputation: bool,
}

impl PreProcessStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail when a median-imputed column has no non-null values.
    pub fn with_strict_imputation(mut self, strict: bool) -> Self {
        self.strict_imputation = strict;
        self
    }

    fn impute_dimensions(&self, df: &mut DataFrame) -> Result<()> {
        require_columns(df, &MEDIAN_IMPUTED_COLUMNS, CleaningStep::ImputeMedian)?;

        for col_name in MEDIAN_IMPUTED_COLUMNS {
            match StatisticalImputer::apply_numeric_median(df, col_name, self.strict_imputation)? {
                MedianOutcome::Filled { median, count } => {
                    debug!("Filled {} nulls in '{}' with median {:.2}", count, col_name, median);
                }
                MedianOutcome::NoMissing => {}
                MedianOutcome::Undefined => {
                    warn!("'{}' has no values; median undefined, column left as-is", col_name);
                }
            }
        }
        Ok(())
    }

    fn impute_review_text(&self, df: &mut DataFrame) -> Result<()> {
        require_columns(df, &[REVIEW_TEXT_COLUMN], CleaningStep::ImputeReviewText)?;

        let filled =
            StatisticalImputer::apply_constant_imputation(df, REVIEW_TEXT_COLUMN, REVIEW_FILL_VALUE)?;
        debug!("Filled {} missing reviews with '{}'", filled, REVIEW_FILL_VALUE);
        Ok(())
    }
}

impl DataStrategy for PreProcessStrategy {
    type Output = DataFrame;

    fn name(&self) -> &'static str {
        "preprocess"
    }

    fn handle_data(&self, data: &DataFrame) -> Result<DataFrame> {
        info!("Preprocessing table with shape {:?}", data.shape());

        debug!("Step 1: dropping timestamp columns");
        let mut df = drop_columns(data, &TIMESTAMP_COLUMNS, CleaningStep::DropTimestamps)?;

        debug!("Step 2: median imputation");
        self.impute_dimensions(&mut df)?;

        debug!("Step 3: review text imputation");
        self.impute_review_text(&mut df)?;

        debug!("Step 4: selecting numeric columns");
        let before = df.width();
        let df = df.select(numeric_column_names(&df))?;
        debug!("Removed {} non-numeric columns", before - df.width());

        debug!("Step 5: dropping identifier columns");
        let df = drop_columns(&df, &IDENTIFIER_COLUMNS, CleaningStep::DropIdentifiers)?;

        info!("Preprocessing complete, shape {:?}", df.shape());
        Ok(df)
    }
}
