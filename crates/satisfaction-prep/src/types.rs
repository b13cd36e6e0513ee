use chrono::Local;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A named step of the cleaning pipeline, used to report where a failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleaningStep {
    /// Dropping the order timestamp columns
    DropTimestamps,
    /// Median imputation of the product dimension columns
    ImputeMedian,
    /// Constant imputation of the review text
    ImputeReviewText,
    /// Dropping the identifier columns left after the numeric filter
    DropIdentifiers,
    /// Separating the label column from the features
    ExtractLabel,
}

impl CleaningStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DropTimestamps => "drop_timestamps",
            Self::ImputeMedian => "impute_median",
            Self::ImputeReviewText => "impute_review_text",
            Self::DropIdentifiers => "drop_identifiers",
            Self::ExtractLabel => "extract_label",
        }
    }
}

impl fmt::Display for CleaningStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four-way result of a train/test split.
///
/// `train_indices` and `test_indices` are row positions in the table that
/// was split, in the order the rows appear in the partitions.
#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    pub x_train: DataFrame,
    pub x_test: DataFrame,
    pub y_train: Series,
    pub y_test: Series,
    pub train_indices: Vec<usize>,
    pub test_indices: Vec<usize>,
}

impl TrainTestSplit {
    /// Consume the split into `(X_train, X_test, y_train, y_test)`.
    pub fn into_parts(self) -> (DataFrame, DataFrame, Series, Series) {
        (self.x_train, self.x_test, self.y_train, self.y_test)
    }

    /// Total number of rows across both partitions.
    pub fn total_rows(&self) -> usize {
        self.x_train.height() + self.x_test.height()
    }

    /// Names of the feature columns.
    pub fn feature_names(&self) -> Vec<String> {
        self.x_train
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }
}

/// Summary of a cleaning run, emitted by the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningSummary {
    pub generated_at: String,
    pub input_shape: (usize, usize),
    pub cleaned_shape: (usize, usize),
    pub label_column: String,
    pub feature_columns: Vec<String>,
    pub train_rows: usize,
    pub test_rows: usize,
    pub test_size: f64,
    pub random_state: u64,
}

impl CleaningSummary {
    pub fn new(
        input: &DataFrame,
        cleaned: &DataFrame,
        split: &TrainTestSplit,
        test_size: f64,
        random_state: u64,
    ) -> Self {
        Self {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_shape: input.shape(),
            cleaned_shape: cleaned.shape(),
            label_column: split.y_train.name().to_string(),
            feature_columns: split.feature_names(),
            train_rows: split.x_train.height(),
            test_rows: split.x_test.height(),
            test_size,
            random_state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_split() -> TrainTestSplit {
        TrainTestSplit {
            x_train: df!["price" => [1.0, 2.0, 3.0]].unwrap(),
            x_test: df!["price" => [4.0]].unwrap(),
            y_train: Series::new("review_score".into(), [5i64, 4, 1]),
            y_test: Series::new("review_score".into(), [3i64]),
            train_indices: vec![2, 0, 3],
            test_indices: vec![1],
        }
    }

    #[test]
    fn test_step_display_matches_serde() {
        let json = serde_json::to_string(&CleaningStep::ImputeReviewText).unwrap();
        assert_eq!(json, format!("\"{}\"", CleaningStep::ImputeReviewText));
    }

    #[test]
    fn test_split_accessors() {
        let split = sample_split();
        assert_eq!(split.total_rows(), 4);
        assert_eq!(split.feature_names(), vec!["price".to_string()]);

        let (x_train, x_test, y_train, y_test) = split.into_parts();
        assert_eq!(x_train.height(), y_train.len());
        assert_eq!(x_test.height(), y_test.len());
    }

    #[test]
    fn test_summary_from_split() {
        let split = sample_split();
        let input = df!["price" => [1.0, 2.0, 3.0, 4.0], "text" => ["a", "b", "c", "d"]].unwrap();
        let cleaned = df!["price" => [1.0, 2.0, 3.0, 4.0]].unwrap();

        let summary = CleaningSummary::new(&input, &cleaned, &split, 0.2, 42);
        assert_eq!(summary.input_shape, (4, 2));
        assert_eq!(summary.cleaned_shape, (4, 1));
        assert_eq!(summary.label_column, "review_score");
        assert_eq!(summary.train_rows, 3);
        assert_eq!(summary.test_rows, 1);
    }
}
