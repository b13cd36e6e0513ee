//! Pipeline module.
//!
//! This module provides the strategy context and the `clean_df` step that
//! chains preprocessing and splitting.

mod context;
mod steps;

pub use context::DataCleaning;
pub use steps::{clean_df, clean_df_with_summary};
