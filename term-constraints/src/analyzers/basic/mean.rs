//! Mean analyzer for computing average values.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::analyzers::data::{first_row_f64, first_row_i64, quote_identifier};
use crate::analyzers::preconditions::{has_column, is_numeric, Precondition};
use crate::analyzers::{
    Analyzer, AnalyzerError, AnalyzerResult, AnalyzerState, Dataset, Entity, Metric,
};

/// Analyzer that computes the mean of a numeric column, ignoring NULLs.
///
/// A column without any non-null value yields an empty-state failure metric.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MeanAnalyzer {
    /// The column to analyze.
    column: String,
}

impl MeanAnalyzer {
    /// Creates a new mean analyzer for the specified column.
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }

    /// Returns the column being analyzed.
    pub fn column(&self) -> &str {
        &self.column
    }
}

/// State for the mean analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeanState {
    /// Sum of all non-null values.
    pub sum: f64,
    /// Count of non-null values.
    pub count: u64,
}

impl MeanState {
    /// Calculates the mean value.
    pub fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as f64)
        }
    }
}

impl AnalyzerState for MeanState {
    fn merge(states: Vec<Self>) -> AnalyzerResult<Self> {
        let sum = states.iter().map(|s| s.sum).sum();
        let count = states.iter().map(|s| s.count).sum();

        Ok(MeanState { sum, count })
    }

    fn is_empty(&self) -> bool {
        self.count == 0
    }
}

#[async_trait]
impl Analyzer for MeanAnalyzer {
    type State = MeanState;
    type Value = f64;

    #[instrument(skip(data), fields(analyzer = "mean", column = %self.column))]
    async fn compute_state_from(&self, data: &Dataset) -> AnalyzerResult<Option<Self::State>> {
        let column = quote_identifier(&self.column);
        let sql = format!(
            "SELECT SUM(CAST({column} AS DOUBLE)) AS sum, COUNT({column}) AS count FROM {}",
            data.quoted_table()
        );
        let batches = data.sql(&sql).await?;

        let count = first_row_i64(&batches, 1)?.unwrap_or(0) as u64;
        if count == 0 {
            return Ok(None);
        }
        let sum = first_row_f64(&batches, 0)?.unwrap_or(0.0);

        Ok(Some(MeanState { sum, count }))
    }

    fn compute_metric_from(&self, state: Option<&Self::State>) -> Metric<f64> {
        match state.and_then(MeanState::mean) {
            Some(mean) => Metric::success(Entity::Column, &self.column, "Mean", mean),
            None => crate::analyzers::empty_state_metric(self),
        }
    }

    fn to_failure_metric(&self, error: AnalyzerError) -> Metric<f64> {
        Metric::failure(Entity::Column, &self.column, "Mean", error)
    }

    fn name(&self) -> &str {
        "mean"
    }

    fn description(&self) -> &str {
        "Computes the average value of a numeric column"
    }

    fn columns(&self) -> Vec<&str> {
        vec![&self.column]
    }

    fn preconditions(&self) -> Vec<Precondition> {
        vec![has_column(&self.column), is_numeric(&self.column)]
    }
}
