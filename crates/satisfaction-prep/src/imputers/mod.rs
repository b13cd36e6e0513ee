//! Imputation module for handling missing values.
//!
//! Median imputation for numeric columns and constant imputation for text.

mod statistical;

pub use statistical::{MedianOutcome, StatisticalImputer};
