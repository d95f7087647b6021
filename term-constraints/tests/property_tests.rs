//! Property-based tests for constraint evaluation.
//!
//! Properties covered:
//! - a stored metric is judged exactly like `assertion(picker(value))`
//! - an empty context always yields the missing-analysis failure
//! - the hint only ever follows an assertion failure
//! - computing from data and reading from a runner's context agree

use std::sync::Arc;

use arrow::array::Float64Array;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use datafusion::prelude::*;
use proptest::prelude::*;
use term_constraints::analyzers::basic::{CompletenessAnalyzer, MeanAnalyzer, SizeAnalyzer};
use term_constraints::analyzers::{
    AnalysisRunner, AnalyzerContext, AnalyzerError, Dataset, Entity, Metric, MetricType,
};
use term_constraints::constraints::messages::MISSING_ANALYSIS;
use term_constraints::constraints::{AnalysisBasedConstraint, Assertion};
use term_constraints::core::ConstraintStatus;

fn context_with_mean(column: &str, value: f64) -> AnalyzerContext {
    let mut context = AnalyzerContext::new();
    context.insert(
        &MeanAnalyzer::new(column),
        Metric::success(Entity::Column, column, "Mean", value),
    );
    context
}

fn create_numeric_dataset(values: &[Option<f64>]) -> Dataset {
    let batch = RecordBatch::try_new(
        Arc::new(Schema::new(vec![Field::new(
            "test_column",
            DataType::Float64,
            true,
        )])),
        vec![Arc::new(Float64Array::from(values.to_vec()))],
    )
    .unwrap();

    let ctx = SessionContext::new();
    ctx.register_batch("data", batch).unwrap();
    Dataset::with_default_table(ctx)
}

fn assertion_strategy() -> impl Strategy<Value = Assertion> {
    prop_oneof![
        (-100.0..100.0).prop_map(Assertion::GreaterThan),
        (-100.0..100.0).prop_map(Assertion::LessThanOrEqual),
        (-100.0..100.0).prop_map(Assertion::NotEquals),
        (-100.0..0.0, 0.0..100.0).prop_map(|(lo, hi)| Assertion::Between(lo, hi)),
    ]
}

proptest! {
    /// Success iff the assertion holds on the picked value; otherwise the
    /// exact template with the picked value and the hint.
    #[test]
    fn test_stored_metric_judgment(
        value in -1000.0f64..1000.0,
        offset in -10.0f64..10.0,
        assertion in assertion_strategy(),
        hint in proptest::option::of("[a-z ]{1,20}"),
    ) {
        let mut constraint = AnalysisBasedConstraint::new(
            MeanAnalyzer::new("price"),
            assertion.clone().into_fn(),
        )
        .with_value_picker(move |v| v + offset);
        if let Some(hint) = &hint {
            constraint = constraint.with_hint(hint.clone());
        }

        let result = constraint.evaluate(&context_with_mean("price", value));
        let picked = value + offset;

        if assertion.evaluate(picked) {
            prop_assert_eq!(result.status, ConstraintStatus::Success);
            prop_assert!(result.message.is_none());
        } else {
            let mut expected = format!(
                "Value: {} does not meet the constraint requirement!",
                picked.render()
            );
            if let Some(hint) = &hint {
                expected.push(' ');
                expected.push_str(hint);
            }
            prop_assert_eq!(result.status, ConstraintStatus::Failure);
            prop_assert_eq!(result.message, Some(expected));
        }
    }

    /// Without a metric the assertion, picker and hint never matter.
    #[test]
    fn test_empty_context_is_always_missing_analysis(
        column in "[a-z]{1,8}",
        accept in any::<bool>(),
        hint in proptest::option::of("[a-z]{1,10}"),
    ) {
        let mut constraint =
            AnalysisBasedConstraint::new(CompletenessAnalyzer::new(column), move |_| accept)
                .with_fallible_value_picker(|_| Err("never called"));
        if let Some(hint) = hint {
            constraint = constraint.with_hint(hint);
        }

        let result = constraint.evaluate(&AnalyzerContext::new());
        prop_assert_eq!(result.status, ConstraintStatus::Failure);
        prop_assert_eq!(result.message.as_deref(), Some(MISSING_ANALYSIS));
    }

    /// A failure-valued metric is reported verbatim, hint or not.
    #[test]
    fn test_failure_metric_message_is_verbatim(
        message in "[A-Za-z0-9 ]{1,40}",
        hint in "[a-z]{1,10}",
    ) {
        let analyzer = MeanAnalyzer::new("price");
        let mut context = AnalyzerContext::new();
        context.insert(
            &analyzer,
            Metric::failure(Entity::Column, "price", "Mean", AnalyzerError::custom(message.clone())),
        );

        let result = AnalysisBasedConstraint::new(analyzer, |_| true)
            .with_hint(hint)
            .evaluate(&context);
        prop_assert_eq!(result.message, Some(message));
        prop_assert!(result.metric.is_some());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Computing from data and evaluating a runner's context agree.
    #[test]
    fn test_calculate_and_evaluate_agree(
        values in proptest::collection::vec(proptest::option::of(-50.0f64..50.0), 1..40),
        threshold in 0.0f64..=1.0,
        min_rows in 0i64..50,
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let data = create_numeric_dataset(&values);
            let context = AnalysisRunner::new()
                .add(CompletenessAnalyzer::new("test_column"))
                .add(SizeAnalyzer::new())
                .run(&data)
                .await;

            let completeness = AnalysisBasedConstraint::new(
                CompletenessAnalyzer::new("test_column"),
                move |c| c >= threshold,
            );
            let direct = completeness.calculate(&data).await;
            let stored = completeness.evaluate(&context);
            prop_assert_eq!(direct.status, stored.status);
            prop_assert_eq!(&direct.message, &stored.message);

            let non_null = values.iter().filter(|v| v.is_some()).count();
            let expected = non_null as f64 / values.len() as f64;
            prop_assert_eq!(direct.status.is_success(), expected >= threshold);

            let size = AnalysisBasedConstraint::new(SizeAnalyzer::new(), move |n| n >= min_rows);
            let direct = size.calculate(&data).await;
            let stored = size.evaluate(&context);
            prop_assert_eq!(direct.status, stored.status);
            prop_assert_eq!(&direct.message, &stored.message);
            prop_assert_eq!(direct.status.is_success(), values.len() as i64 >= min_rows);

            Ok(())
        })?;
    }
}
