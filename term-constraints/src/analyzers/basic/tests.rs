//! Tests for basic analyzers.

use super::*;
use crate::analyzers::{Analyzer, AnalyzerState, Dataset, Entity, InMemoryStateProvider};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use datafusion::prelude::*;
use std::sync::Arc;

/// Creates a test dataset with sample data.
fn create_test_dataset() -> Result<Dataset, datafusion::error::DataFusionError> {
    let ctx = SessionContext::new();

    let id_array = Int64Array::from(vec![Some(1), Some(2), Some(3), Some(4), None]);
    let value_array =
        Float64Array::from(vec![Some(10.0), Some(20.0), None, Some(30.0), Some(40.0)]);
    let name_array = StringArray::from(vec![Some("a"), Some("b"), Some("a"), None, Some("c")]);
    let empty_array = Float64Array::from(vec![None, None, None, None, None]);

    let batch = RecordBatch::try_new(
        Arc::new(Schema::new(vec![
            Field::new("id", DataType::Int64, true),
            Field::new("value", DataType::Float64, true),
            Field::new("name", DataType::Utf8, true),
            Field::new("nothing", DataType::Float64, true),
        ])),
        vec![
            Arc::new(id_array) as ArrayRef,
            Arc::new(value_array) as ArrayRef,
            Arc::new(name_array) as ArrayRef,
            Arc::new(empty_array) as ArrayRef,
        ],
    )?;

    ctx.register_batch("data", batch)?;
    Ok(Dataset::with_default_table(ctx))
}

mod size_tests {
    use super::*;

    #[tokio::test]
    async fn test_size_analyzer() {
        let data = create_test_dataset().unwrap();
        let analyzer = SizeAnalyzer::new();

        let state = analyzer.compute_state_from(&data).await.unwrap().unwrap();
        assert_eq!(state.count, 5);

        let metric = analyzer.calculate(&data, None, None).await;
        assert_eq!(metric.entity(), Entity::Dataset);
        assert_eq!(metric.name(), "Size");
        assert_eq!(*metric.value().as_ref().unwrap(), 5);
    }

    #[test]
    fn test_size_state_merge() {
        let states = vec![
            SizeState { count: 10 },
            SizeState { count: 20 },
            SizeState { count: 15 },
        ];

        let merged = SizeState::merge(states).unwrap();
        assert_eq!(merged.count, 45);
    }

    #[tokio::test]
    async fn test_size_on_unregistered_table_is_failure_metric() {
        let data = Dataset::new(SessionContext::new(), "missing_table");
        let metric = SizeAnalyzer::new().calculate(&data, None, None).await;

        assert!(!metric.is_success());
        assert!(metric.error_message().unwrap().contains("missing_table"));
    }
}

mod completeness_tests {
    use super::*;

    #[tokio::test]
    async fn test_completeness_analyzer() {
        let data = create_test_dataset().unwrap();

        let analyzer = CompletenessAnalyzer::new("id");
        let state = analyzer.compute_state_from(&data).await.unwrap().unwrap();
        assert_eq!(state.total_count, 5);
        assert_eq!(state.non_null_count, 4);

        let metric = analyzer.calculate(&data, None, None).await;
        assert_eq!(metric.instance(), "id");
        assert_eq!(*metric.value().as_ref().unwrap(), 0.8);
    }

    #[tokio::test]
    async fn test_completeness_missing_column() {
        let data = create_test_dataset().unwrap();
        let metric = CompletenessAnalyzer::new("someMissingColumn")
            .calculate(&data, None, None)
            .await;

        assert_eq!(
            metric.error_message().as_deref(),
            Some("requirement failed: Input data does not include column someMissingColumn!")
        );
    }

    #[test]
    fn test_completeness_state_merge() {
        let states = vec![
            CompletenessState {
                total_count: 10,
                non_null_count: 8,
            },
            CompletenessState {
                total_count: 20,
                non_null_count: 18,
            },
        ];

        let merged = CompletenessState::merge(states).unwrap();
        assert_eq!(merged.total_count, 30);
        assert_eq!(merged.non_null_count, 26);
        assert_eq!(merged.completeness(), 26.0 / 30.0);
    }

    #[test]
    fn test_analyzer_identity() {
        assert_eq!(CompletenessAnalyzer::new("a"), CompletenessAnalyzer::new("a"));
        assert_eq!(
            CompletenessAnalyzer::new("a").key(),
            CompletenessAnalyzer::new("a").key()
        );
        assert_ne!(
            CompletenessAnalyzer::new("a").key(),
            CompletenessAnalyzer::new("b").key()
        );
        assert_ne!(
            CompletenessAnalyzer::new("a").key(),
            MeanAnalyzer::new("a").key()
        );
        assert_eq!(CompletenessAnalyzer::new("a").key().to_string(), "completeness(a)");
    }
}

mod mean_tests {
    use super::*;

    #[tokio::test]
    async fn test_mean_analyzer() {
        let data = create_test_dataset().unwrap();
        let metric = MeanAnalyzer::new("value").calculate(&data, None, None).await;

        // (10 + 20 + 30 + 40) / 4
        assert_eq!(*metric.value().as_ref().unwrap(), 25.0);
    }

    #[tokio::test]
    async fn test_mean_of_all_null_column_is_empty_state() {
        let data = create_test_dataset().unwrap();
        let metric = MeanAnalyzer::new("nothing").calculate(&data, None, None).await;

        assert_eq!(
            metric.error_message().as_deref(),
            Some("Empty state for analyzer mean(nothing), all input values were NULL.")
        );
    }

    #[tokio::test]
    async fn test_mean_rejects_string_column() {
        let data = create_test_dataset().unwrap();
        let metric = MeanAnalyzer::new("name").calculate(&data, None, None).await;

        let message = metric.error_message().unwrap();
        assert!(message.starts_with("requirement failed: Expected type of column name"));
    }

    #[test]
    fn test_mean_state_merge() {
        let merged = MeanState::merge(vec![
            MeanState { sum: 10.0, count: 2 },
            MeanState { sum: 20.0, count: 3 },
        ])
        .unwrap();
        assert_eq!(merged.mean(), Some(6.0));
    }

    #[tokio::test]
    async fn test_mean_merges_loaded_state_and_persists() {
        let data = create_test_dataset().unwrap();
        let provider = InMemoryStateProvider::new();
        let analyzer = MeanAnalyzer::new("value");

        // First run stores sum=100, count=4
        let first = analyzer
            .calculate(&data, Some(&provider), Some(&provider))
            .await;
        assert_eq!(*first.value().as_ref().unwrap(), 25.0);

        // Second run merges: sum=200, count=8
        let second = analyzer
            .calculate(&data, Some(&provider), Some(&provider))
            .await;
        assert_eq!(*second.value().as_ref().unwrap(), 25.0);

        let stored: MeanState =
            serde_json::from_str(&provider.state_json(&analyzer.key()).unwrap()).unwrap();
        assert_eq!(stored, MeanState { sum: 200.0, count: 8 });
    }
}

mod min_max_tests {
    use super::*;

    #[tokio::test]
    async fn test_min_and_max() {
        let data = create_test_dataset().unwrap();

        let min = MinimumAnalyzer::new("id").calculate(&data, None, None).await;
        assert_eq!(*min.value().as_ref().unwrap(), 1.0);
        assert_eq!(min.name(), "Minimum");

        let max = MaximumAnalyzer::new("value").calculate(&data, None, None).await;
        assert_eq!(*max.value().as_ref().unwrap(), 40.0);
        assert_eq!(max.name(), "Maximum");
    }

    #[tokio::test]
    async fn test_min_of_all_null_column_is_empty_state() {
        let data = create_test_dataset().unwrap();
        let metric = MinimumAnalyzer::new("nothing").calculate(&data, None, None).await;
        assert!(metric
            .error_message()
            .unwrap()
            .starts_with("Empty state for analyzer min(nothing)"));
    }

    #[test]
    fn test_min_max_state_merge() {
        let min = MinState::merge(vec![
            MinState { min_value: 3.0 },
            MinState { min_value: -1.0 },
        ])
        .unwrap();
        assert_eq!(min.min_value, -1.0);

        let max = MaxState::merge(vec![
            MaxState { max_value: 3.0 },
            MaxState { max_value: 7.5 },
        ])
        .unwrap();
        assert_eq!(max.max_value, 7.5);

        assert!(MinState::merge(vec![]).is_err());
    }
}
