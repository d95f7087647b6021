//! Shared fixtures for unit tests.

use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use async_trait::async_trait;
use datafusion::prelude::SessionContext;
use serde::{Deserialize, Serialize};

use crate::analyzers::{
    Analyzer, AnalyzerError, AnalyzerResult, AnalyzerState, Dataset, Entity, Metric,
};

/// Registers a small table with columns `item`, `att1`, `att2` and `price`.
pub fn sample_dataset() -> Dataset {
    let ctx = SessionContext::new();

    let batch = RecordBatch::try_new(
        Arc::new(Schema::new(vec![
            Field::new("item", DataType::Int64, false),
            Field::new("att1", DataType::Utf8, true),
            Field::new("att2", DataType::Utf8, true),
            Field::new("price", DataType::Float64, true),
        ])),
        vec![
            Arc::new(Int64Array::from(vec![1, 2, 3, 4])) as ArrayRef,
            Arc::new(StringArray::from(vec![Some("a"), Some("b"), Some("c"), Some("a")])),
            Arc::new(StringArray::from(vec![Some("d"), None, Some("f"), None])),
            Arc::new(Float64Array::from(vec![
                Some(10.0),
                Some(20.0),
                Some(30.0),
                Some(40.0),
            ])),
        ],
    )
    .unwrap();

    ctx.register_batch("data", batch).unwrap();
    Dataset::with_default_table(ctx)
}

/// Yields `1.0` when its column exists and fails with
/// `requirement failed: Missing column {column}` otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SampleAnalyzer {
    pub column: String,
}

impl SampleAnalyzer {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleState {
    pub seen: u64,
}

impl AnalyzerState for SampleState {
    fn merge(states: Vec<Self>) -> AnalyzerResult<Self> {
        Ok(SampleState {
            seen: states.iter().map(|s| s.seen).sum(),
        })
    }
}

#[async_trait]
impl Analyzer for SampleAnalyzer {
    type State = SampleState;
    type Value = f64;

    async fn compute_state_from(&self, data: &Dataset) -> AnalyzerResult<Option<SampleState>> {
        let schema = data.schema().await?;
        if schema.field_with_name(&self.column).is_err() {
            return Err(AnalyzerError::precondition(format!(
                "Missing column {}",
                self.column
            )));
        }
        Ok(Some(SampleState { seen: 1 }))
    }

    fn compute_metric_from(&self, state: Option<&SampleState>) -> Metric<f64> {
        match state {
            Some(_) => Metric::success(Entity::Column, &self.column, "sample", 1.0),
            None => crate::analyzers::empty_state_metric(self),
        }
    }

    fn to_failure_metric(&self, error: AnalyzerError) -> Metric<f64> {
        Metric::failure(Entity::Column, &self.column, "sample", error)
    }

    fn name(&self) -> &str {
        "sample"
    }

    fn columns(&self) -> Vec<&str> {
        vec![&self.column]
    }
}
