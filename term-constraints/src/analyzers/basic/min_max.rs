//! Minimum and maximum analyzers for finding extreme values.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::analyzers::data::{first_row_f64, quote_identifier};
use crate::analyzers::preconditions::{has_column, is_numeric, Precondition};
use crate::analyzers::{
    Analyzer, AnalyzerError, AnalyzerResult, AnalyzerState, Dataset, Entity, Metric,
};

/// State for the minimum analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinState {
    /// Smallest non-null value seen.
    pub min_value: f64,
}

impl AnalyzerState for MinState {
    fn merge(states: Vec<Self>) -> AnalyzerResult<Self> {
        states
            .into_iter()
            .reduce(|a, b| if b.min_value < a.min_value { b } else { a })
            .ok_or_else(|| AnalyzerError::state_merge("no minimum states to merge"))
    }
}

/// State for the maximum analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaxState {
    /// Largest non-null value seen.
    pub max_value: f64,
}

impl AnalyzerState for MaxState {
    fn merge(states: Vec<Self>) -> AnalyzerResult<Self> {
        states
            .into_iter()
            .reduce(|a, b| if b.max_value > a.max_value { b } else { a })
            .ok_or_else(|| AnalyzerError::state_merge("no maximum states to merge"))
    }
}

async fn extreme_value(data: &Dataset, function: &str, column: &str) -> AnalyzerResult<Option<f64>> {
    let sql = format!(
        "SELECT {function}(CAST({} AS DOUBLE)) AS value FROM {}",
        quote_identifier(column),
        data.quoted_table()
    );
    let batches = data.sql(&sql).await?;
    first_row_f64(&batches, 0)
}

/// Analyzer that computes the minimum value of a numeric column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MinimumAnalyzer {
    /// The column to analyze.
    column: String,
}

impl MinimumAnalyzer {
    /// Creates a new minimum analyzer for the specified column.
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

#[async_trait]
impl Analyzer for MinimumAnalyzer {
    type State = MinState;
    type Value = f64;

    #[instrument(skip(data), fields(analyzer = "min", column = %self.column))]
    async fn compute_state_from(&self, data: &Dataset) -> AnalyzerResult<Option<Self::State>> {
        let min = extreme_value(data, "MIN", &self.column).await?;
        Ok(min.map(|min_value| MinState { min_value }))
    }

    fn compute_metric_from(&self, state: Option<&Self::State>) -> Metric<f64> {
        match state {
            Some(state) => Metric::success(Entity::Column, &self.column, "Minimum", state.min_value),
            None => crate::analyzers::empty_state_metric(self),
        }
    }

    fn to_failure_metric(&self, error: AnalyzerError) -> Metric<f64> {
        Metric::failure(Entity::Column, &self.column, "Minimum", error)
    }

    fn name(&self) -> &str {
        "min"
    }

    fn description(&self) -> &str {
        "Computes the minimum value of a numeric column"
    }

    fn columns(&self) -> Vec<&str> {
        vec![&self.column]
    }

    fn preconditions(&self) -> Vec<Precondition> {
        vec![has_column(&self.column), is_numeric(&self.column)]
    }
}

/// Analyzer that computes the maximum value of a numeric column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MaximumAnalyzer {
    /// The column to analyze.
    column: String,
}

impl MaximumAnalyzer {
    /// Creates a new maximum analyzer for the specified column.
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

#[async_trait]
impl Analyzer for MaximumAnalyzer {
    type State = MaxState;
    type Value = f64;

    #[instrument(skip(data), fields(analyzer = "max", column = %self.column))]
    async fn compute_state_from(&self, data: &Dataset) -> AnalyzerResult<Option<Self::State>> {
        let max = extreme_value(data, "MAX", &self.column).await?;
        Ok(max.map(|max_value| MaxState { max_value }))
    }

    fn compute_metric_from(&self, state: Option<&Self::State>) -> Metric<f64> {
        match state {
            Some(state) => Metric::success(Entity::Column, &self.column, "Maximum", state.max_value),
            None => crate::analyzers::empty_state_metric(self),
        }
    }

    fn to_failure_metric(&self, error: AnalyzerError) -> Metric<f64> {
        Metric::failure(Entity::Column, &self.column, "Maximum", error)
    }

    fn name(&self) -> &str {
        "max"
    }

    fn description(&self) -> &str {
        "Computes the maximum value of a numeric column"
    }

    fn columns(&self) -> Vec<&str> {
        vec![&self.column]
    }

    fn preconditions(&self) -> Vec<Precondition> {
        vec![has_column(&self.column), is_numeric(&self.column)]
    }
}
