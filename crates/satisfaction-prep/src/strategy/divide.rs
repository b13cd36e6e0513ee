use super::DataStrategy;
use crate::config::{CleaningConfig, DEFAULT_RANDOM_STATE, DEFAULT_TARGET_COLUMN, DEFAULT_TEST_SIZE};
use crate::error::{CleaningError, Result};
use crate::types::{CleaningStep, TrainTestSplit};
use polars::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, info};

/// Relative slack when deciding that `rows * test_size` is an integer.
const ROUNDING_TOLERANCE: f64 = 1e-9;

/// Separates the label column and partitions rows into train and test sets.
///
/// The row order is a permutation of `0..rows` produced by
/// [`SliceRandom::shuffle`] (Fisher-Yates, last element first) driven by
/// `StdRng::seed_from_u64(random_state)`. With rand 0.8 `StdRng` is ChaCha12,
/// so the permutation is stable for a given seed as long as the rand minor
/// version is unchanged.
///
/// The test partition holds `floor(rows * test_size)` rows. The first
/// `rows - n_test` shuffled positions form the train partition and the rest
/// form the test partition.
#[derive(Debug, Clone)]
pub struct DivideStrategy {
    target_column: String,
    test_size: f64,
    random_state: u64,
}

impl Default for DivideStrategy {
    fn default() -> Self {
        Self {
            target_column: DEFAULT_TARGET_COLUMN.to_string(),
            test_size: DEFAULT_TEST_SIZE,
            random_state: DEFAULT_RANDOM_STATE,
        }
    }
}

impl DivideStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a configuration.
    ///
    /// The configuration is not validated here; a `test_size` outside `(0, 1)`
    /// makes [`partition_indices`](Self::partition_indices) fail with
    /// [`CleaningError::InsufficientRows`].
    pub fn from_config(config: &CleaningConfig) -> Self {
        Self {
            target_column: config.target_column.clone(),
            test_size: config.test_size,
            random_state: config.random_state,
        }
    }

    pub fn target_column(&self) -> &str {
        &self.target_column
    }

    /// Number of test rows for a table of `rows` rows.
    ///
    /// `floor(rows * test_size)`, except that a product within rounding error
    /// of an integer counts as that integer (`100 * 0.29` is `29`, not `28`).
    pub fn test_rows(&self, rows: usize) -> usize {
        let exact = rows as f64 * self.test_size;
        let nearest = exact.round();
        if (exact - nearest).abs() <= ROUNDING_TOLERANCE * nearest.abs().max(1.0) {
            nearest as usize
        } else {
            exact.floor() as usize
        }
    }

    /// Shuffled row positions split into `(train, test)`.
    pub fn partition_indices(&self, rows: usize) -> Result<(Vec<usize>, Vec<usize>)> {
        let n_test = self.test_rows(rows);
        if n_test == 0 || n_test >= rows {
            return Err(CleaningError::InsufficientRows {
                rows,
                test_size: self.test_size,
            });
        }
        let n_train = rows - n_test;

        let mut indices: Vec<usize> = (0..rows).collect();
        let mut rng = StdRng::seed_from_u64(self.random_state);
        indices.shuffle(&mut rng);

        let test = indices.split_off(n_train);
        Ok((indices, test))
    }
}

fn to_idx(indices: &[usize]) -> IdxCa {
    IdxCa::from_vec(
        "idx".into(),
        indices.iter().map(|&i| i as IdxSize).collect(),
    )
}

impl DataStrategy for DivideStrategy {
    type Output = TrainTestSplit;

    fn name(&self) -> &'static str {
        "divide"
    }

    fn handle_data(&self, data: &DataFrame) -> Result<TrainTestSplit> {
        info!(
            "Dividing table with shape {:?} on label '{}'",
            data.shape(),
            self.target_column
        );

        let labels = data
            .column(&self.target_column)
            .map_err(|_| {
                CleaningError::column_missing(CleaningStep::ExtractLabel, &self.target_column)
            })?
            .as_materialized_series()
            .clone();
        let features = data.drop(&self.target_column)?;

        let (train_indices, test_indices) = self.partition_indices(data.height())?;
        debug!(
            "Partitioned {} rows into {} train / {} test",
            data.height(),
            train_indices.len(),
            test_indices.len()
        );

        let train_idx = to_idx(&train_indices);
        let test_idx = to_idx(&test_indices);

        let split = TrainTestSplit {
            x_train: features.take(&train_idx)?,
            x_test: features.take(&test_idx)?,
            y_train: labels.take(&train_idx)?,
            y_test: labels.take(&test_idx)?,
            train_indices,
            test_indices,
        };

        info!(
            "Split complete: X_train {:?}, X_test {:?}",
            split.x_train.shape(),
            split.x_test.shape()
        );
        Ok(split)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn numbered_table(rows: usize) -> DataFrame {
        let ids: Vec<i64> = (0..rows as i64).collect();
        let prices: Vec<f64> = (0..rows).map(|i| i as f64 * 1.5).collect();
        let scores: Vec<i64> = (0..rows as i64).map(|i| i % 5 + 1).collect();
        df![
            "row_id" => ids,
            "price" => prices,
            "review_score" => scores,
        ]
        .unwrap()
    }

    fn i64_values(series: &Series) -> Vec<i64> {
        series.i64().unwrap().into_no_null_iter().collect()
    }

    #[test]
    fn test_split_sizes_for_100_rows() {
        let split = DivideStrategy::new().handle_data(&numbered_table(100)).unwrap();

        assert_eq!(split.x_test.height(), 20);
        assert_eq!(split.x_train.height(), 80);
        assert_eq!(split.y_test.len(), 20);
        assert_eq!(split.y_train.len(), 80);
    }

    #[test]
    fn test_partition_is_disjoint_and_exhaustive() {
        let split = DivideStrategy::new().handle_data(&numbered_table(100)).unwrap();

        let train: HashSet<usize> = split.train_indices.iter().copied().collect();
        let test: HashSet<usize> = split.test_indices.iter().copied().collect();

        assert!(train.is_disjoint(&test));
        let all: HashSet<usize> = train.union(&test).copied().collect();
        assert_eq!(all, (0..100).collect::<HashSet<usize>>());
    }

    #[test]
    fn test_label_removed_from_features() {
        let split = DivideStrategy::new().handle_data(&numbered_table(10)).unwrap();

        assert!(split.x_train.column("review_score").is_err());
        assert!(split.x_test.column("review_score").is_err());
        assert_eq!(split.y_train.name().as_str(), "review_score");
    }

    #[test]
    fn test_rows_and_labels_stay_aligned() {
        let table = numbered_table(50);
        let split = DivideStrategy::new().handle_data(&table).unwrap();
        let original_scores = i64_values(table.column("review_score").unwrap().as_materialized_series());

        let test_ids = i64_values(split.x_test.column("row_id").unwrap().as_materialized_series());
        let test_scores = i64_values(&split.y_test);

        for ((&pos, &row_id), &score) in split.test_indices.iter().zip(&test_ids).zip(&test_scores) {
            assert_eq!(row_id as usize, pos);
            assert_eq!(score, original_scores[pos]);
        }
    }

    #[test]
    fn test_same_seed_is_reproducible() {
        let table = numbered_table(40);
        let first = DivideStrategy::new().handle_data(&table).unwrap();
        let second = DivideStrategy::new().handle_data(&table).unwrap();

        assert_eq!(first.train_indices, second.train_indices);
        assert_eq!(first.test_indices, second.test_indices);
        assert!(first.x_test.equals(&second.x_test));
    }

    #[test]
    fn test_different_seed_changes_partition() {
        let config = CleaningConfig::builder().random_state(7).build().unwrap();
        let default = DivideStrategy::new().partition_indices(100).unwrap();
        let other = DivideStrategy::from_config(&config)
            .partition_indices(100)
            .unwrap();

        assert_ne!(default.1, other.1);
    }

    #[test]
    fn test_test_rows_floors() {
        let strategy = DivideStrategy::new();
        assert_eq!(strategy.test_rows(100), 20);
        assert_eq!(strategy.test_rows(9), 1);
        assert_eq!(strategy.test_rows(14), 2);
        assert_eq!(strategy.test_rows(4), 0);
    }

    #[test]
    fn test_test_rows_tolerates_binary_rounding() {
        let config = CleaningConfig::builder().test_size(0.29).build().unwrap();
        let strategy = DivideStrategy::from_config(&config);

        // 100.0 * 0.29 == 28.999999999999996
        assert_eq!(strategy.test_rows(100), 29);
        assert_eq!(strategy.test_rows(99), 28);

        let config = CleaningConfig::builder().test_size(0.57).build().unwrap();
        assert_eq!(DivideStrategy::from_config(&config).test_rows(100), 57);
    }

    #[test]
    fn test_out_of_range_test_size_is_an_error() {
        let table = numbered_table(10);

        for test_size in [1.5, 1.0, -0.5, f64::NAN] {
            let config = CleaningConfig {
                test_size,
                ..CleaningConfig::default()
            };
            let err = DivideStrategy::from_config(&config)
                .handle_data(&table)
                .unwrap_err();
            assert!(
                matches!(err, CleaningError::InsufficientRows { rows: 10, .. }),
                "test_size {test_size}: {err}"
            );
        }
    }

    #[test]
    fn test_missing_label_column() {
        let table = numbered_table(10).drop("review_score").unwrap();

        let err = DivideStrategy::new().handle_data(&table).unwrap_err();

        assert_eq!(err.missing_column(), Some("review_score"));
        assert_eq!(err.failed_step(), Some(CleaningStep::ExtractLabel));
    }

    #[test]
    fn test_custom_target_column() {
        let config = CleaningConfig::builder().target_column("price").build().unwrap();
        let split = DivideStrategy::from_config(&config)
            .handle_data(&numbered_table(10))
            .unwrap();

        assert_eq!(split.y_train.name().as_str(), "price");
        assert!(split.x_train.column("review_score").is_ok());
    }

    #[test]
    fn test_too_few_rows() {
        let err = DivideStrategy::new().handle_data(&numbered_table(4)).unwrap_err();
        assert!(matches!(
            err,
            CleaningError::InsufficientRows { rows: 4, .. }
        ));
    }
}
