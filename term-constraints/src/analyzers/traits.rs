//! Core analyzer traits for the Term framework.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use tracing::{debug, debug_span, warn, Instrument};

use super::data::Dataset;
use super::errors::{AnalyzerError, AnalyzerResult};
use super::metric::Metric;
use super::preconditions::{self, Precondition};
use super::state::{StateLoader, StatePersister};
use super::types::MetricType;

/// Value identity of an analyzer: its name plus every defining parameter.
///
/// Two analyzers with equal keys compute the same metric, which is what
/// makes lookups in an [`AnalyzerContext`](super::AnalyzerContext) work.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnalyzerKey {
    name: String,
    params: Vec<String>,
}

impl AnalyzerKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
        }
    }

    /// Appends a defining parameter (column, filter, ...).
    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.params.push(param.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// A file-name-safe rendering of the key.
    ///
    /// Parts are joined with `_`; every byte outside `[A-Za-z0-9]` is
    /// percent-encoded, so distinct keys never share a stem.
    pub fn file_stem(&self) -> String {
        std::iter::once(self.name.as_str())
            .chain(self.params.iter().map(String::as_str))
            .map(|part| {
                part.bytes().fold(String::with_capacity(part.len()), |mut out, b| {
                    if b.is_ascii_alphanumeric() {
                        out.push(char::from(b));
                    } else {
                        out.push_str(&format!("%{b:02X}"));
                    }
                    out
                })
            })
            .collect::<Vec<_>>()
            .join("_")
    }
}

impl fmt::Display for AnalyzerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.params.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}({})", self.name, self.params.join(","))
        }
    }
}

/// Core trait for analyzers that compute metrics from data.
///
/// An analyzer turns a [`Dataset`] into an intermediate state and the state
/// into a [`Metric`]. The entry point is [`calculate`](Analyzer::calculate),
/// which never fails: every error on the way is turned into a failure-valued
/// metric by [`to_failure_metric`](Analyzer::to_failure_metric).
///
/// # Type Parameters
///
/// * `State` - The state type that holds intermediate computation results
/// * `Value` - The value type of the produced metric
///
/// # Example
///
/// ```rust,ignore
/// use term_constraints::analyzers::*;
///
/// #[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// struct RowCount;
///
/// #[async_trait]
/// impl Analyzer for RowCount {
///     type State = SizeState;
///     type Value = i64;
///
///     async fn compute_state_from(&self, data: &Dataset) -> AnalyzerResult<Option<SizeState>> {
///         let batches = data.sql(&format!("SELECT COUNT(*) FROM {}", data.quoted_table())).await?;
///         // extract the count ...
///         Ok(Some(SizeState { count: 42 }))
///     }
///
///     fn compute_metric_from(&self, state: Option<&SizeState>) -> Metric<i64> {
///         match state {
///             Some(s) => Metric::success(Entity::Dataset, "*", "RowCount", s.count as i64),
///             None => self.to_failure_metric(AnalyzerError::empty_state(self.key().to_string())),
///         }
///     }
///
///     fn to_failure_metric(&self, error: AnalyzerError) -> Metric<i64> {
///         Metric::failure(Entity::Dataset, "*", "RowCount", error)
///     }
///
///     fn name(&self) -> &str {
///         "row_count"
///     }
/// }
/// ```
#[async_trait]
pub trait Analyzer: Send + Sync + Debug {
    /// The state type for incremental computation.
    type State: AnalyzerState;

    /// The value type of the metric produced by this analyzer.
    type Value: MetricType;

    /// Computes the state from the input data.
    ///
    /// `Ok(None)` means the data held nothing to aggregate (e.g. every value
    /// was NULL).
    async fn compute_state_from(&self, data: &Dataset) -> AnalyzerResult<Option<Self::State>>;

    /// Computes the final metric from an optional state.
    fn compute_metric_from(&self, state: Option<&Self::State>) -> Metric<Self::Value>;

    /// Represents an error as this analyzer's failure-valued metric.
    fn to_failure_metric(&self, error: AnalyzerError) -> Metric<Self::Value>;

    /// Returns the name of this analyzer.
    fn name(&self) -> &str;

    /// Returns a description of what this analyzer computes.
    fn description(&self) -> &str {
        ""
    }

    /// Returns the column(s) this analyzer operates on, if any.
    fn columns(&self) -> Vec<&str> {
        vec![]
    }

    /// Returns the value identity of this analyzer.
    ///
    /// Analyzers with parameters beyond their columns must override this.
    fn key(&self) -> AnalyzerKey {
        self.columns()
            .into_iter()
            .fold(AnalyzerKey::new(self.name()), AnalyzerKey::with_param)
    }

    /// Schema checks to run before computing anything.
    fn preconditions(&self) -> Vec<Precondition> {
        Vec::new()
    }

    /// Computes the metric for `data`.
    ///
    /// When a loader is given, the computed state is merged with the stored
    /// one; when a persister is given, the merged state is saved. Passing
    /// `None` for both computes from scratch and persists nothing.
    async fn calculate(
        &self,
        data: &Dataset,
        loader: Option<&dyn StateLoader>,
        persister: Option<&dyn StatePersister>,
    ) -> Metric<Self::Value> {
        let span = debug_span!("analyzer_calculate", analyzer = %self.key());
        match run_calculation(self, data, loader, persister)
            .instrument(span)
            .await
        {
            Ok(metric) => metric,
            Err(error) => {
                warn!(analyzer = %self.key(), error = %error, "Metric computation failed");
                self.to_failure_metric(error)
            }
        }
    }
}

async fn run_calculation<A>(
    analyzer: &A,
    data: &Dataset,
    loader: Option<&dyn StateLoader>,
    persister: Option<&dyn StatePersister>,
) -> AnalyzerResult<Metric<A::Value>>
where
    A: Analyzer + ?Sized,
{
    let checks = analyzer.preconditions();
    if !checks.is_empty() {
        let schema = data.schema().await?;
        preconditions::find_first_failing(&schema, &checks)?;
    }

    let computed = analyzer.compute_state_from(data).await?;
    let key = analyzer.key();

    let loaded = match loader {
        Some(loader) => match loader.load(&key).await? {
            Some(bytes) => Some(serde_json::from_slice::<A::State>(&bytes)?),
            None => None,
        },
        None => None,
    };

    let state = merge_optional(computed, loaded)?;

    if let (Some(persister), Some(state)) = (persister, state.as_ref()) {
        persister.persist(&key, serde_json::to_vec(state)?).await?;
        debug!(analyzer = %key, "Persisted analyzer state");
    }

    Ok(analyzer.compute_metric_from(state.as_ref()))
}

/// Trait for analyzer state that supports incremental computation.
///
/// States must be serializable so that they can be persisted and merged
/// with states computed on other partitions of the data.
pub trait AnalyzerState:
    Clone + Send + Sync + Debug + Serialize + for<'de> Deserialize<'de>
{
    /// Merges multiple states into a single state.
    fn merge(states: Vec<Self>) -> AnalyzerResult<Self>
    where
        Self: Sized;

    /// Returns whether this state represents an empty computation.
    fn is_empty(&self) -> bool {
        false
    }
}

/// Merges two optional states; a missing side leaves the other unchanged.
pub fn merge_optional<S: AnalyzerState>(
    first: Option<S>,
    second: Option<S>,
) -> AnalyzerResult<Option<S>> {
    match (first, second) {
        (Some(a), Some(b)) => S::merge(vec![a, b]).map(Some),
        (Some(a), None) => Ok(Some(a)),
        (None, b) => Ok(b),
    }
}

/// Builds the metric for a state-less computation of `analyzer`.
pub fn empty_state_metric<A: Analyzer + ?Sized>(analyzer: &A) -> Metric<A::Value> {
    analyzer.to_failure_metric(AnalyzerError::empty_state(analyzer.key().to_string()))
}

