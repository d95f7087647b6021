//! Context for storing analyzer computation results.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::errors::AnalyzerResult;
use super::metric::{Entity, Metric};
use super::traits::{Analyzer, AnalyzerKey};
use super::types::MetricValue;

/// Metrics computed by a prior analysis run, keyed by analyzer identity.
///
/// Constraints only read from a context; it is built once (usually by the
/// [`AnalysisRunner`](super::AnalysisRunner)) and then shared.
///
/// # Example
///
/// ```rust
/// use term_constraints::analyzers::{basic::CompletenessAnalyzer, AnalyzerContext, Entity, Metric};
///
/// let analyzer = CompletenessAnalyzer::new("user_id");
/// let mut context = AnalyzerContext::new();
/// context.insert(&analyzer, Metric::success(Entity::Column, "user_id", "Completeness", 0.98));
///
/// let metric = context.metric(&analyzer).unwrap();
/// assert_eq!(*metric.value().as_ref().unwrap(), 0.98);
/// assert!(context.metric(&CompletenessAnalyzer::new("email")).is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct AnalyzerContext {
    metrics: HashMap<AnalyzerKey, Metric<MetricValue>>,
    metadata: AnalysisMetadata,
}

impl AnalyzerContext {
    /// Creates a new empty analyzer context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new context with the given dataset name.
    pub fn with_dataset(dataset_name: impl Into<String>) -> Self {
        Self {
            metrics: HashMap::new(),
            metadata: AnalysisMetadata::with_dataset(dataset_name),
        }
    }

    /// Stores the metric computed by `analyzer`, replacing any previous one.
    pub fn insert<A: Analyzer + ?Sized>(&mut self, analyzer: &A, metric: Metric<A::Value>) {
        self.metrics.insert(analyzer.key(), metric.into_erased());
    }

    /// Stores an already type-erased metric under `key`.
    pub fn insert_erased(&mut self, key: AnalyzerKey, metric: Metric<MetricValue>) {
        self.metrics.insert(key, metric);
    }

    /// Retrieves the metric for an analyzer equal to `analyzer`.
    ///
    /// A stored metric whose value has a different type than the analyzer
    /// produces is treated as absent.
    pub fn metric<A: Analyzer + ?Sized>(&self, analyzer: &A) -> Option<Metric<A::Value>> {
        self.metrics
            .get(&analyzer.key())
            .and_then(|metric| metric.downcast::<A::Value>())
    }

    /// Retrieves a type-erased metric by key.
    pub fn metric_by_key(&self, key: &AnalyzerKey) -> Option<&Metric<MetricValue>> {
        self.metrics.get(key)
    }

    pub fn contains(&self, key: &AnalyzerKey) -> bool {
        self.metrics.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Iterates over all stored metrics in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&AnalyzerKey, &Metric<MetricValue>)> {
        self.metrics.iter()
    }

    /// Returns the analysis metadata.
    pub fn metadata(&self) -> &AnalysisMetadata {
        &self.metadata
    }

    /// Returns a mutable reference to the analysis metadata.
    pub fn metadata_mut(&mut self) -> &mut AnalysisMetadata {
        &mut self.metadata
    }

    /// Merges another context into this one.
    ///
    /// Metrics from the other context overwrite metrics with the same key.
    pub fn merge(&mut self, other: AnalyzerContext) {
        self.metrics.extend(other.metrics);
        self.metadata.merge(other.metadata);
    }

    /// Rows for every success-valued metric, sorted by analyzer key.
    pub fn success_metrics(&self) -> Vec<MetricRow> {
        let mut rows: Vec<(&AnalyzerKey, MetricRow)> = self
            .metrics
            .iter()
            .filter_map(|(key, metric)| {
                let value = metric.value().as_ref().ok()?.clone();
                Some((
                    key,
                    MetricRow {
                        entity: metric.entity(),
                        instance: metric.instance().to_string(),
                        name: metric.name().to_string(),
                        value,
                    },
                ))
            })
            .collect();
        rows.sort_by(|a, b| a.0.cmp(b.0));
        rows.into_iter().map(|(_, row)| row).collect()
    }

    /// Serializes every success-valued metric as a JSON array.
    pub fn success_metrics_as_json(&self) -> AnalyzerResult<String> {
        Ok(serde_json::to_string(&self.success_metrics())?)
    }
}

/// A flattened success metric, as exported by
/// [`AnalyzerContext::success_metrics`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRow {
    pub entity: Entity,
    pub instance: String,
    pub name: String,
    pub value: MetricValue,
}

/// Metadata about an analysis run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    /// Name of the dataset being analyzed.
    pub dataset_name: Option<String>,

    /// Timestamp when the analysis started.
    pub start_time: Option<chrono::DateTime<chrono::Utc>>,

    /// Timestamp when the analysis completed.
    pub end_time: Option<chrono::DateTime<chrono::Utc>>,
}

impl AnalysisMetadata {
    /// Creates metadata with a dataset name.
    pub fn with_dataset(name: impl Into<String>) -> Self {
        Self {
            dataset_name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Records the start time of the analysis.
    pub fn record_start(&mut self) {
        self.start_time = Some(chrono::Utc::now());
    }

    /// Records the end time of the analysis.
    pub fn record_end(&mut self) {
        self.end_time = Some(chrono::Utc::now());
    }

    /// Returns the duration of the analysis if both start and end times are recorded.
    pub fn duration(&self) -> Option<chrono::Duration> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }

    fn merge(&mut self, other: AnalysisMetadata) {
        if self.dataset_name.is_none() {
            self.dataset_name = other.dataset_name;
        }
        if self.start_time.is_none() {
            self.start_time = other.start_time;
        }
        if self.end_time.is_none() {
            self.end_time = other.end_time;
        }
    }
}
