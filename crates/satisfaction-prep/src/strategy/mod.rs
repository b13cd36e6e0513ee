//! Data strategies.
//!
//! A strategy turns one table into a derived output. Two strategies exist:
//!
//! - [`PreProcessStrategy`] - drops unused columns, imputes missing values and
//!   keeps only numeric columns
//! - [`DivideStrategy`] - separates the label and partitions rows into
//!   train and test sets
//!
//! Use the concrete types with [`DataCleaning`](crate::pipeline::DataCleaning)
//! when the strategy is known at compile time, or [`CleaningStrategy`] when it
//! is chosen at run time.

mod divide;
mod preprocess;

pub use divide::DivideStrategy;
pub use preprocess::{
    IDENTIFIER_COLUMNS, MEDIAN_IMPUTED_COLUMNS, PreProcessStrategy, REVIEW_FILL_VALUE,
    REVIEW_TEXT_COLUMN, TIMESTAMP_COLUMNS,
};

use crate::error::{CleaningError, Result};
use crate::types::TrainTestSplit;
use polars::prelude::*;

/// A unit of work that transforms a table.
///
/// Implementations must not mutate the input table.
pub trait DataStrategy {
    /// What the strategy produces.
    type Output;

    /// Short name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Transform `data`.
    fn handle_data(&self, data: &DataFrame) -> Result<Self::Output>;
}

/// A strategy chosen at run time.
#[derive(Debug, Clone)]
pub enum CleaningStrategy {
    Preprocess(PreProcessStrategy),
    Divide(DivideStrategy),
}

/// Output of a [`CleaningStrategy`].
#[derive(Debug, Clone)]
pub enum StrategyOutput {
    Cleaned(DataFrame),
    Split(TrainTestSplit),
}

impl StrategyOutput {
    /// Unwrap a cleaned table, failing if this is a split.
    pub fn into_cleaned(self) -> Result<DataFrame> {
        match self {
            Self::Cleaned(df) => Ok(df),
            Self::Split(_) => Err(CleaningError::OutputMismatch {
                expected: "cleaned table",
                found: "split",
            }),
        }
    }

    /// Unwrap a split, failing if this is a cleaned table.
    pub fn into_split(self) -> Result<TrainTestSplit> {
        match self {
            Self::Split(split) => Ok(split),
            Self::Cleaned(_) => Err(CleaningError::OutputMismatch {
                expected: "split",
                found: "cleaned table",
            }),
        }
    }
}

impl From<PreProcessStrategy> for CleaningStrategy {
    fn from(strategy: PreProcessStrategy) -> Self {
        Self::Preprocess(strategy)
    }
}

impl From<DivideStrategy> for CleaningStrategy {
    fn from(strategy: DivideStrategy) -> Self {
        Self::Divide(strategy)
    }
}

impl DataStrategy for CleaningStrategy {
    type Output = StrategyOutput;

    fn name(&self) -> &'static str {
        match self {
            Self::Preprocess(s) => s.name(),
            Self::Divide(s) => s.name(),
        }
    }

    fn handle_data(&self, data: &DataFrame) -> Result<StrategyOutput> {
        match self {
            Self::Preprocess(s) => s.handle_data(data).map(StrategyOutput::Cleaned),
            Self::Divide(s) => s.handle_data(data).map(StrategyOutput::Split),
        }
    }
}

static_assertions::assert_impl_all!(CleaningStrategy: Send, Sync);
static_assertions::assert_impl_all!(StrategyOutput: Send);

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_table() -> DataFrame {
        df![
            "order_approved_at" => ["a"; 5],
            "order_delivered_carrier_date" => ["b"; 5],
            "order_delivered_customer_date" => ["c"; 5],
            "order_estimated_delivery_date" => ["d"; 5],
            "order_purchase_timestamp" => ["e"; 5],
            "product_weight_g" => [Some(100.0), None, Some(300.0), Some(200.0), Some(50.0)],
            "product_length_cm" => [10.0, 20.0, 30.0, 40.0, 50.0],
            "product_height_cm" => [1.0, 2.0, 3.0, 4.0, 5.0],
            "product_width_cm" => [5.0, 4.0, 3.0, 2.0, 1.0],
            "review_comment_message" => [Some("ok"), None, None, Some("bad"), Some("good")],
            "custopmer_zip_code_prefix" => [1000i64, 2000, 3000, 4000, 5000],
            "order_item_id" => [1i64, 1, 2, 1, 3],
            "price" => [9.5, 19.5, 29.5, 39.5, 49.5],
            "review_score" => [5i64, 4, 3, 2, 1],
        ]
        .unwrap()
    }

    #[test]
    fn test_enum_dispatches_preprocess() {
        let strategy: CleaningStrategy = PreProcessStrategy::default().into();
        assert_eq!(strategy.name(), "preprocess");

        let cleaned = strategy
            .handle_data(&raw_table())
            .unwrap()
            .into_cleaned()
            .unwrap();
        assert_eq!(cleaned.height(), 5);
        assert!(cleaned.column("review_comment_message").is_err());
    }

    #[test]
    fn test_enum_dispatches_divide() {
        let strategy: CleaningStrategy = DivideStrategy::default().into();
        assert_eq!(strategy.name(), "divide");

        let cleaned = PreProcessStrategy::default().handle_data(&raw_table()).unwrap();
        let split = strategy
            .handle_data(&cleaned)
            .unwrap()
            .into_split()
            .unwrap();

        // floor(5 * 0.2) = 1
        assert_eq!(split.x_test.height(), 1);
        assert_eq!(split.x_train.height(), 4);
    }

    #[test]
    fn test_output_variant_mismatch() {
        let output = StrategyOutput::Cleaned(raw_table());
        let err = output.into_split().unwrap_err();

        assert!(matches!(
            err,
            CleaningError::OutputMismatch {
                expected: "split",
                found: "cleaned table"
            }
        ));
        assert_eq!(err.error_code(), "OUTPUT_MISMATCH");
    }

    #[test]
    fn test_split_output_is_not_a_cleaned_table() {
        let split = DivideStrategy::default()
            .handle_data(&PreProcessStrategy::default().handle_data(&raw_table()).unwrap())
            .unwrap();

        let err = StrategyOutput::Split(split).into_cleaned().unwrap_err();

        assert_eq!(err.error_code(), "OUTPUT_MISMATCH");
        assert_eq!(err.to_string(), "Expected cleaned table output, got split");
    }
}
