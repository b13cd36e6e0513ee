//! Custom error types for the cleaning and splitting pipeline.
//!
//! This module provides the error hierarchy using `thiserror`. Every
//! strategy returns a typed error naming the step and column that failed,
//! and the pipeline context wraps it in [`CleaningError::Transformation`]
//! so callers also learn which strategy was running.
//!
//! Errors are serializable so the CLI can emit them as JSON.

use crate::config::ConfigValidationError;
use crate::types::CleaningStep;
use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for the cleaning pipeline.
#[derive(Error, Debug)]
pub enum CleaningError {
    /// An expected column was absent at the given step.
    #[error("Column '{column}' not found during {step}")]
    ColumnMissing { step: CleaningStep, column: String },

    /// A column could not be imputed.
    #[error("Failed to impute missing values in column '{column}': {reason}")]
    Imputation { column: String, reason: String },

    /// The table is too small to produce non-empty train and test partitions.
    #[error("Cannot split {rows} rows with test_size {test_size}: a partition would be empty")]
    InsufficientRows { rows: usize, test_size: f64 },

    /// A strategy output was unwrapped as the wrong kind.
    #[error("Expected {expected} output, got {found}")]
    OutputMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// A strategy failed while handling data.
    #[error("{strategy} strategy failed: {source}")]
    Transformation {
        strategy: &'static str,
        #[source]
        source: Box<CleaningError>,
    },

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration failed validation.
    #[error(transparent)]
    Config(#[from] ConfigValidationError),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<CleaningError>,
    },
}

impl CleaningError {
    /// Shorthand for a missing-column error.
    pub fn column_missing(step: CleaningStep, column: impl Into<String>) -> Self {
        CleaningError::ColumnMissing {
            step,
            column: column.into(),
        }
    }

    /// Wrap an error raised by the named strategy.
    pub fn transformation(strategy: &'static str, source: CleaningError) -> Self {
        CleaningError::Transformation {
            strategy,
            source: Box::new(source),
        }
    }

    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        CleaningError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Get a stable error code.
    ///
    /// Wrapping variants report the code of the error they wrap.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ColumnMissing { .. } => "COLUMN_MISSING",
            Self::Imputation { .. } => "IMPUTATION_FAILED",
            Self::InsufficientRows { .. } => "INSUFFICIENT_ROWS",
            Self::OutputMismatch { .. } => "OUTPUT_MISMATCH",
            Self::InvalidConfig(_) | Self::Config(_) => "INVALID_CONFIG",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::Transformation { source, .. } | Self::WithContext { source, .. } => {
                source.error_code()
            }
        }
    }

    /// Strip `Transformation` and `WithContext` wrappers.
    pub fn root_cause(&self) -> &CleaningError {
        match self {
            Self::Transformation { source, .. } | Self::WithContext { source, .. } => {
                source.root_cause()
            }
            other => other,
        }
    }

    /// The column name, if the root cause is a missing column.
    pub fn missing_column(&self) -> Option<&str> {
        match self.root_cause() {
            Self::ColumnMissing { column, .. } => Some(column.as_str()),
            _ => None,
        }
    }

    /// The step that failed, if the root cause is a missing column.
    pub fn failed_step(&self) -> Option<CleaningStep> {
        match self.root_cause() {
            Self::ColumnMissing { step, .. } => Some(*step),
            _ => None,
        }
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for CleaningError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("CleaningError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for cleaning operations.
pub type Result<T> = std::result::Result<T, CleaningError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| CleaningError::Polars(e).with_context(context))
    }
}
