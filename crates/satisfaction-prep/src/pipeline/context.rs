//! Strategy context.

use crate::error::{CleaningError, Result};
use crate::strategy::DataStrategy;
use polars::prelude::*;
use tracing::{debug, error};

/// Runs one strategy over one table.
///
/// The strategy is fixed at construction and the context is consumed by
/// [`DataCleaning::handle_data`], so each instance runs exactly once.
///
/// # Example
///
/// ```rust,ignore
/// use satisfaction_prep::{DataCleaning, DivideStrategy, PreProcessStrategy};
///
/// let cleaned = DataCleaning::new(&raw, PreProcessStrategy::new()).handle_data()?;
/// let split = DataCleaning::new(&cleaned, DivideStrategy::new()).handle_data()?;
/// let (x_train, x_test, y_train, y_test) = split.into_parts();
/// ```
pub struct DataCleaning<'a, S: DataStrategy> {
    data: &'a DataFrame,
    strategy: S,
}

impl<'a, S: DataStrategy> DataCleaning<'a, S> {
    pub fn new(data: &'a DataFrame, strategy: S) -> Self {
        Self { data, strategy }
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    pub fn data(&self) -> &'a DataFrame {
        self.data
    }

    /// Run the strategy.
    ///
    /// Failures are logged and returned wrapped in
    /// [`CleaningError::Transformation`] carrying the strategy name.
    pub fn handle_data(self) -> Result<S::Output> {
        let name = self.strategy.name();
        debug!("Running {} strategy", name);

        self.strategy.handle_data(self.data).map_err(|e| {
            error!("Error in {} strategy: {}", name, e);
            CleaningError::transformation(name, e)
        })
    }
}
