//! Customer Satisfaction Data Preparation
//!
//! Cleans a raw order/review table and splits it into train and test sets
//! for a review-score model, built on Polars.
//!
//! # Overview
//!
//! - **Strategies**: [`PreProcessStrategy`] drops unused columns, imputes
//!   missing values and keeps numeric columns; [`DivideStrategy`] separates the
//!   `review_score` label and partitions rows with a seeded shuffle
//! - **Context**: [`DataCleaning`] runs one strategy over one table and
//!   reports failures with the strategy name attached
//! - **Step**: [`clean_df`] chains both strategies
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use satisfaction_prep::{clean_df, CleaningConfig};
//! use polars::prelude::*;
//!
//! let df = CsvReadOptions::default()
//!     .with_has_header(true)
//!     .try_into_reader_with_file_path(Some("orders.csv".into()))?
//!     .finish()?;
//!
//! let split = clean_df(&df, &CleaningConfig::default())?;
//! let (x_train, x_test, y_train, y_test) = split.into_parts();
//! ```
//!
//! # Choosing a strategy at run time
//!
//! ```rust,ignore
//! use satisfaction_prep::{CleaningStrategy, DataCleaning, PreProcessStrategy};
//!
//! let strategy = CleaningStrategy::from(PreProcessStrategy::new());
//! let cleaned = DataCleaning::new(&df, strategy).handle_data()?.into_cleaned()?;
//! ```
//!
//! # Errors
//!
//! Every operation returns [`CleaningResult`]. A missing column is reported
//! as [`CleaningError::ColumnMissing`] naming the step and column; nothing
//! is swallowed.

pub mod config;
pub mod error;
pub mod imputers;
pub mod pipeline;
pub mod strategy;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use config::{CleaningConfig, CleaningConfigBuilder, ConfigValidationError};
pub use error::{CleaningError, Result as CleaningResult, ResultExt};
pub use imputers::{MedianOutcome, StatisticalImputer};
pub use pipeline::{DataCleaning, clean_df, clean_df_with_summary};
pub use strategy::{
    CleaningStrategy, DataStrategy, DivideStrategy, PreProcessStrategy, StrategyOutput,
};
pub use types::{CleaningStep, CleaningSummary, TrainTestSplit};
pub use utils::{fill_numeric_nulls, fill_string_nulls, is_numeric_dtype};
