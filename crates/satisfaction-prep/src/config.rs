//! Configuration types for the cleaning pipeline.
//!
//! This module provides configuration options using the builder pattern.
//! The dropped and imputed column sets are fixed by the input schema and
//! are not configurable; only the split and the strictness of median
//! imputation are.

use serde::{Deserialize, Serialize};

/// Default fraction of rows assigned to the test partition.
pub const DEFAULT_TEST_SIZE: f64 = 0.2;

/// Default seed for the row shuffle.
pub const DEFAULT_RANDOM_STATE: u64 = 42;

/// Default label column.
pub const DEFAULT_TARGET_COLUMN: &str = "review_score";

/// Configuration for the cleaning pipeline.
///
/// Use [`CleaningConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use satisfaction_prep::config::CleaningConfig;
///
/// let config = CleaningConfig::builder()
///     .test_size(0.25)
///     .random_state(7)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningConfig {
    /// Fraction of rows placed in the test partition (exclusive 0.0 - 1.0).
    /// The test partition holds `floor(rows * test_size)` rows.
    /// Default: 0.2
    pub test_size: f64,

    /// Seed for the row shuffle.
    /// Default: 42
    pub random_state: u64,

    /// Column extracted as the label series.
    /// Default: "review_score"
    pub target_column: String,

    /// Fail instead of leaving a column untouched when its median is undefined
    /// (the column has no non-null values).
    /// Default: false
    pub strict_imputation: bool,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            test_size: DEFAULT_TEST_SIZE,
            random_state: DEFAULT_RANDOM_STATE,
            target_column: DEFAULT_TARGET_COLUMN.to_string(),
            strict_imputation: false,
        }
    }
}

impl CleaningConfig {
    /// Create a new configuration builder.
    pub fn builder() -> CleaningConfigBuilder {
        CleaningConfigBuilder::default()
    }

    /// Load a configuration from a JSON document.
    ///
    /// Missing fields take their default values. The result is validated.
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        let config: CleaningConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(ConfigValidationError::InvalidTestSize(self.test_size));
        }

        if self.target_column.trim().is_empty() {
            return Err(ConfigValidationError::EmptyTargetColumn);
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid test_size: {0} (must be strictly between 0.0 and 1.0)")]
    InvalidTestSize(f64),

    #[error("Target column name must not be empty")]
    EmptyTargetColumn,
}

/// Builder for [`CleaningConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct CleaningConfigBuilder {
    test_size: Option<f64>,
    random_state: Option<u64>,
    target_column: Option<String>,
    strict_imputation: Option<bool>,
}

impl CleaningConfigBuilder {
    /// Set the fraction of rows placed in the test partition.
    ///
    /// # Arguments
    /// * `test_size` - Value strictly between 0.0 and 1.0 (e.g., 0.2 = 20%)
    pub fn test_size(mut self, test_size: f64) -> Self {
        self.test_size = Some(test_size);
        self
    }

    /// Set the shuffle seed.
    pub fn random_state(mut self, seed: u64) -> Self {
        self.random_state = Some(seed);
        self
    }

    /// Set the label column.
    pub fn target_column(mut self, column: impl Into<String>) -> Self {
        self.target_column = Some(column.into());
        self
    }

    /// Enable or disable strict median imputation.
    pub fn strict_imputation(mut self, strict: bool) -> Self {
        self.strict_imputation = Some(strict);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `CleaningConfig` or an error if validation fails.
    pub fn build(self) -> Result<CleaningConfig, ConfigValidationError> {
        let config = CleaningConfig {
            test_size: self.test_size.unwrap_or(DEFAULT_TEST_SIZE),
            random_state: self.random_state.unwrap_or(DEFAULT_RANDOM_STATE),
            target_column: self
                .target_column
                .unwrap_or_else(|| DEFAULT_TARGET_COLUMN.to_string()),
            strict_imputation: self.strict_imputation.unwrap_or(false),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CleaningConfig::default();
        assert_eq!(config.test_size, 0.2);
        assert_eq!(config.random_state, 42);
        assert_eq!(config.target_column, "review_score");
        assert!(!config.strict_imputation);
    }

    #[test]
    fn test_builder_defaults_match_default() {
        let config = CleaningConfig::builder().build().unwrap();
        assert_eq!(config, CleaningConfig::default());
    }

    #[test]
    fn test_builder_custom_values() {
        let config = CleaningConfig::builder()
            .test_size(0.3)
            .random_state(7)
            .target_column("label")
            .strict_imputation(true)
            .build()
            .unwrap();

        assert_eq!(config.test_size, 0.3);
        assert_eq!(config.random_state, 7);
        assert_eq!(config.target_column, "label");
        assert!(config.strict_imputation);
    }

    #[test]
    fn test_validation_invalid_test_size() {
        for bad in [0.0, 1.0, -0.1, 1.5, f64::NAN] {
            let result = CleaningConfig::builder().test_size(bad).build();
            assert!(matches!(
                result,
                Err(ConfigValidationError::InvalidTestSize(_))
            ));
        }
    }

    #[test]
    fn test_validation_empty_target() {
        let result = CleaningConfig::builder().target_column("  ").build();
        assert!(matches!(
            result,
            Err(ConfigValidationError::EmptyTargetColumn)
        ));
    }

    #[test]
    fn test_config_from_partial_json() {
        let config = CleaningConfig::from_json(r#"{ "random_state": 1234 }"#).unwrap();
        assert_eq!(config.random_state, 1234);
        assert_eq!(config.test_size, 0.2);
        assert_eq!(config.target_column, "review_score");
    }

    #[test]
    fn test_config_from_invalid_json() {
        let err = CleaningConfig::from_json(r#"{ "test_size": 2.0 }"#).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CONFIG");

        let err = CleaningConfig::from_json("not json").unwrap_err();
        assert_eq!(err.error_code(), "JSON_ERROR");
    }

    #[test]
    fn test_config_serialization() {
        let config = CleaningConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: CleaningConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
