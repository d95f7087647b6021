//! Completeness analyzer for measuring the fraction of non-null values.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::analyzers::data::{first_row_i64, quote_identifier};
use crate::analyzers::preconditions::{has_column, Precondition};
use crate::analyzers::{
    Analyzer, AnalyzerError, AnalyzerResult, AnalyzerState, Dataset, Entity, Metric,
};

/// Analyzer that computes the fraction of non-null values for a column.
///
/// Completeness is a fundamental data quality metric that measures
/// how much of the expected data is actually present.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompletenessAnalyzer {
    /// The column to analyze.
    column: String,
}

impl CompletenessAnalyzer {
    /// Creates a new completeness analyzer for the specified column.
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

/// State for the completeness analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletenessState {
    /// Total number of rows.
    pub total_count: u64,
    /// Number of non-null values.
    pub non_null_count: u64,
}

impl CompletenessState {
    /// Calculates the completeness fraction.
    pub fn completeness(&self) -> f64 {
        if self.total_count == 0 {
            1.0 // Empty dataset is considered complete
        } else {
            self.non_null_count as f64 / self.total_count as f64
        }
    }
}

impl AnalyzerState for CompletenessState {
    fn merge(states: Vec<Self>) -> AnalyzerResult<Self> {
        let total_count = states.iter().map(|s| s.total_count).sum();
        let non_null_count = states.iter().map(|s| s.non_null_count).sum();

        Ok(CompletenessState {
            total_count,
            non_null_count,
        })
    }

    fn is_empty(&self) -> bool {
        self.total_count == 0
    }
}

#[async_trait]
impl Analyzer for CompletenessAnalyzer {
    type State = CompletenessState;
    type Value = f64;

    #[instrument(skip(data), fields(analyzer = "completeness", column = %self.column))]
    async fn compute_state_from(&self, data: &Dataset) -> AnalyzerResult<Option<Self::State>> {
        let sql = format!(
            "SELECT COUNT(*) AS total_count, COUNT({}) AS non_null_count FROM {}",
            quote_identifier(&self.column),
            data.quoted_table()
        );
        let batches = data.sql(&sql).await?;

        let total_count = first_row_i64(&batches, 0)?.unwrap_or(0) as u64;
        let non_null_count = first_row_i64(&batches, 1)?.unwrap_or(0) as u64;

        Ok(Some(CompletenessState {
            total_count,
            non_null_count,
        }))
    }

    fn compute_metric_from(&self, state: Option<&Self::State>) -> Metric<f64> {
        match state {
            Some(state) => Metric::success(
                Entity::Column,
                &self.column,
                "Completeness",
                state.completeness(),
            ),
            None => crate::analyzers::empty_state_metric(self),
        }
    }

    fn to_failure_metric(&self, error: AnalyzerError) -> Metric<f64> {
        Metric::failure(Entity::Column, &self.column, "Completeness", error)
    }

    fn name(&self) -> &str {
        "completeness"
    }

    fn description(&self) -> &str {
        "Computes the fraction of non-null values in a column"
    }

    fn columns(&self) -> Vec<&str> {
        vec![&self.column]
    }

    fn preconditions(&self) -> Vec<Precondition> {
        vec![has_column(&self.column)]
    }
}
