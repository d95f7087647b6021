//! Size analyzer for counting rows in a dataset.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::analyzers::data::first_row_i64;
use crate::analyzers::{
    Analyzer, AnalyzerError, AnalyzerResult, AnalyzerState, Dataset, Entity, Metric,
};

/// Analyzer that computes the number of rows in a dataset.
///
/// # Example
///
/// ```rust,ignore
/// use term_constraints::analyzers::{basic::SizeAnalyzer, Analyzer, Dataset};
///
/// let metric = SizeAnalyzer::new().calculate(&dataset, None, None).await;
/// if let Ok(count) = metric.value() {
///     println!("Dataset has {count} rows");
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SizeAnalyzer;

impl SizeAnalyzer {
    /// Creates a new size analyzer.
    pub fn new() -> Self {
        Self
    }
}

/// State for the size analyzer containing the row count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeState {
    /// Number of rows counted.
    pub count: u64,
}

impl AnalyzerState for SizeState {
    fn merge(states: Vec<Self>) -> AnalyzerResult<Self> {
        let total_count = states.iter().map(|s| s.count).sum();
        Ok(SizeState { count: total_count })
    }

    fn is_empty(&self) -> bool {
        self.count == 0
    }
}

#[async_trait]
impl Analyzer for SizeAnalyzer {
    type State = SizeState;
    type Value = i64;

    #[instrument(skip(data), fields(analyzer = "size", table = %data.table_name()))]
    async fn compute_state_from(&self, data: &Dataset) -> AnalyzerResult<Option<Self::State>> {
        let sql = format!("SELECT COUNT(*) AS count FROM {}", data.quoted_table());
        let batches = data.sql(&sql).await?;

        let count = first_row_i64(&batches, 0)?.unwrap_or(0);
        Ok(Some(SizeState {
            count: count as u64,
        }))
    }

    fn compute_metric_from(&self, state: Option<&Self::State>) -> Metric<i64> {
        match state {
            Some(state) => Metric::success(Entity::Dataset, "*", "Size", state.count as i64),
            None => crate::analyzers::empty_state_metric(self),
        }
    }

    fn to_failure_metric(&self, error: AnalyzerError) -> Metric<i64> {
        Metric::failure(Entity::Dataset, "*", "Size", error)
    }

    fn name(&self) -> &str {
        "size"
    }

    fn description(&self) -> &str {
        "Computes the number of rows in the dataset"
    }
}
