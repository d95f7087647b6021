//! Constraints judged on the metric of a single analyzer.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use super::messages::ConstraintFailure;
use crate::analyzers::{Analyzer, AnalyzerContext, Dataset, Metric, MetricType};
use crate::core::{Constraint, ConstraintMetadata, ConstraintResult};
use crate::log_constraint;
use crate::logging::{truncate_field, LogConfig};

/// Error returned by a value picker.
pub type PickerError = Box<dyn std::error::Error + Send + Sync>;

/// Predicate the (picked) metric value must satisfy.
pub type AssertionFn<V> = Arc<dyn Fn(V) -> bool + Send + Sync>;

/// Derives the value to assert on from the metric value.
pub type ValuePicker<V> = Arc<dyn Fn(V) -> Result<V, PickerError> + Send + Sync>;

/// A constraint made of an analyzer and an assertion on its metric.
///
/// The metric comes either from the data directly ([`calculate`]) or from a
/// context filled by an earlier analysis run ([`evaluate`]). Both paths judge
/// the metric the same way:
///
/// 1. a failure-valued metric fails the constraint with the metric's message;
/// 2. the value picker, if any, derives the value to assert on; if it fails,
///    the constraint fails with a "Can't retrieve the value to assert on"
///    message;
/// 3. the assertion decides; a rejected value is reported together with the
///    hint, if one was given.
///
/// # Example
///
/// ```rust
/// use term_constraints::analyzers::{basic::CompletenessAnalyzer, AnalyzerContext, Entity, Metric};
/// use term_constraints::constraints::AnalysisBasedConstraint;
///
/// let analyzer = CompletenessAnalyzer::new("email");
/// let constraint = AnalysisBasedConstraint::new(analyzer.clone(), |v| v >= 0.95)
///     .with_hint("Most customers should have an email address.");
///
/// let mut context = AnalyzerContext::new();
/// context.insert(&analyzer, Metric::success(Entity::Column, "email", "Completeness", 0.5));
///
/// let result = constraint.evaluate(&context);
/// assert_eq!(
///     result.message.as_deref(),
///     Some("Value: 0.5 does not meet the constraint requirement! Most customers should have an email address.")
/// );
/// ```
///
/// [`calculate`]: AnalysisBasedConstraint::calculate
/// [`evaluate`]: AnalysisBasedConstraint::evaluate
pub struct AnalysisBasedConstraint<A: Analyzer> {
    analyzer: A,
    assertion: AssertionFn<A::Value>,
    value_picker: Option<ValuePicker<A::Value>>,
    hint: Option<String>,
    name: String,
    log_config: LogConfig,
}

impl<A: Analyzer> AnalysisBasedConstraint<A> {
    /// Creates a constraint asserting `assertion` on the analyzer's metric.
    pub fn new<F>(analyzer: A, assertion: F) -> Self
    where
        F: Fn(A::Value) -> bool + Send + Sync + 'static,
    {
        let name = analyzer.key().to_string();
        Self {
            analyzer,
            assertion: Arc::new(assertion),
            value_picker: None,
            hint: None,
            name,
            log_config: LogConfig::default(),
        }
    }

    /// Asserts on `picker(value)` instead of the metric value itself.
    pub fn with_value_picker<F>(self, picker: F) -> Self
    where
        F: Fn(A::Value) -> A::Value + Send + Sync + 'static,
    {
        self.with_fallible_value_picker(move |value| Ok::<_, PickerError>(picker(value)))
    }

    /// Asserts on the value returned by a picker that may fail.
    ///
    /// A picker error fails the constraint with
    /// `Can't retrieve the value to assert on: {error}!`.
    pub fn with_fallible_value_picker<F, E>(mut self, picker: F) -> Self
    where
        F: Fn(A::Value) -> Result<A::Value, E> + Send + Sync + 'static,
        E: Into<PickerError>,
    {
        let picker: ValuePicker<A::Value> =
            Arc::new(move |value: A::Value| -> Result<A::Value, PickerError> {
                picker(value).map_err(Into::into)
            });
        self.value_picker = Some(picker);
        self
    }

    /// Appends `hint` to the message when the assertion rejects the value.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Replaces the logging configuration.
    pub fn with_log_config(mut self, config: LogConfig) -> Self {
        self.log_config = config;
        self
    }

    pub fn analyzer(&self) -> &A {
        &self.analyzer
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    /// Computes the analyzer's metric from `data` and judges it.
    ///
    /// Nothing is loaded or persisted.
    #[instrument(skip(self, data), fields(constraint = %self.name, table = %data.table_name()))]
    pub async fn calculate(&self, data: &Dataset) -> ConstraintResult {
        let metric = self.analyzer.calculate(data, None, None).await;
        self.pick_value_and_assert(metric)
    }

    /// Judges the metric stored in `context` for this constraint's analyzer.
    ///
    /// A context without such a metric fails the constraint with
    /// `Missing Analysis, can't run the constraint!`.
    #[instrument(skip(self, context), fields(constraint = %self.name, metrics = context.len()))]
    pub fn evaluate(&self, context: &AnalyzerContext) -> ConstraintResult {
        match context.metric(&self.analyzer) {
            Some(metric) => self.pick_value_and_assert(metric),
            None => self.report(Err(ConstraintFailure::MissingAnalysis), None),
        }
    }

    fn pick_value_and_assert(&self, metric: Metric<A::Value>) -> ConstraintResult {
        let outcome = self.judge(&metric);
        self.report(outcome, Some(metric))
    }

    fn judge(&self, metric: &Metric<A::Value>) -> Result<(), ConstraintFailure> {
        let value = metric
            .value()
            .as_ref()
            .map_err(|e| ConstraintFailure::DataComputation(e.message()))?
            .clone();

        let value = match &self.value_picker {
            Some(picker) => picker(value)
                .map_err(|e| ConstraintFailure::ProblematicMetricPicker(e.to_string()))?,
            None => value,
        };

        if (self.assertion)(value.clone()) {
            Ok(())
        } else {
            Err(ConstraintFailure::AssertionFailed {
                value: value.render(),
                hint: self.hint.clone(),
            })
        }
    }

    fn report(
        &self,
        outcome: Result<(), ConstraintFailure>,
        metric: Option<Metric<A::Value>>,
    ) -> ConstraintResult {
        let metric = metric.map(Metric::into_erased);
        match outcome {
            Ok(()) => {
                log_constraint!(
                    self.log_config,
                    constraint = %self.name,
                    result.status = "success",
                    "Constraint passed"
                );
                ConstraintResult::success(metric)
            }
            Err(failure) => {
                let message = failure.to_string();
                log_constraint!(
                    self.log_config,
                    constraint = %self.name,
                    result.status = "failure",
                    failure.kind = failure.kind(),
                    failure.message = %truncate_field(&message, self.log_config.max_field_length),
                    "Constraint failed"
                );
                ConstraintResult::failure(message, metric)
            }
        }
    }
}

impl<A: Analyzer> fmt::Debug for AnalysisBasedConstraint<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalysisBasedConstraint")
            .field("analyzer", &self.analyzer)
            .field("has_value_picker", &self.value_picker.is_some())
            .field("hint", &self.hint)
            .finish()
    }
}

#[async_trait]
impl<A: Analyzer> Constraint for AnalysisBasedConstraint<A> {
    async fn calculate(&self, data: &Dataset) -> ConstraintResult {
        AnalysisBasedConstraint::calculate(self, data).await
    }

    fn evaluate(&self, context: &AnalyzerContext) -> ConstraintResult {
        AnalysisBasedConstraint::evaluate(self, context)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn metadata(&self) -> ConstraintMetadata {
        let mut metadata = ConstraintMetadata::for_columns(self.analyzer.columns())
            .with_custom("analyzer", self.analyzer.name());
        if !self.analyzer.description().is_empty() {
            metadata = metadata.with_description(self.analyzer.description());
        }
        if let Some(hint) = &self.hint {
            metadata = metadata.with_custom("hint", hint);
        }
        metadata
    }
}
