//! The cleaning step: preprocess, then split.

use super::DataCleaning;
use crate::config::CleaningConfig;
use crate::error::{Result, ResultExt};
use crate::strategy::{DivideStrategy, PreProcessStrategy};
use crate::types::{CleaningSummary, TrainTestSplit};
use polars::prelude::*;
use tracing::{error, info};

/// Clean a raw order table and divide it into train and test sets.
///
/// Returns `(X_train, X_test, y_train, y_test)` packed in a [`TrainTestSplit`].
pub fn clean_df(df: &DataFrame, config: &CleaningConfig) -> Result<TrainTestSplit> {
    clean_df_with_summary(df, config).map(|(split, _)| split)
}

/// Like [`clean_df`], also returning a [`CleaningSummary`] of the run.
pub fn clean_df_with_summary(
    df: &DataFrame,
    config: &CleaningConfig,
) -> Result<(TrainTestSplit, CleaningSummary)> {
    let result = run(df, config);
    match &result {
        Ok((split, _)) => info!(
            "Data cleaning completed: {} train rows, {} test rows",
            split.x_train.height(),
            split.x_test.height()
        ),
        Err(e) => error!("Error in cleaning data: {}", e),
    }
    result
}

fn run(df: &DataFrame, config: &CleaningConfig) -> Result<(TrainTestSplit, CleaningSummary)> {
    config.validate()?;

    let preprocess = PreProcessStrategy::new().with_strict_imputation(config.strict_imputation);
    let cleaned = DataCleaning::new(df, preprocess)
        .handle_data()
        .context("Preprocessing raw data")?;

    let split = DataCleaning::new(&cleaned, DivideStrategy::from_config(config))
        .handle_data()
        .context("Dividing cleaned data")?;

    let summary =
        CleaningSummary::new(df, &cleaned, &split, config.test_size, config.random_state);
    Ok((split, summary))
}
