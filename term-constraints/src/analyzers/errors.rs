//! Error types for the analyzer framework.

use std::sync::Arc;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Result type for analyzer operations.
pub type AnalyzerResult<T> = Result<T, AnalyzerError>;

/// Errors that can occur while an analyzer reads data or manages its state.
///
/// None of these escape [`Analyzer::calculate`](super::Analyzer::calculate):
/// they are captured into a failure-valued [`Metric`](super::Metric) instead.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// A requirement on the input data did not hold (missing column, wrong type).
    #[error("requirement failed: {0}")]
    Precondition(String),

    /// Error occurred while computing state from data.
    #[error("Failed to compute state: {0}")]
    StateComputation(String),

    /// Error occurred while computing metric from state.
    #[error("Failed to compute metric: {0}")]
    MetricComputation(String),

    /// Error occurred while merging states.
    #[error("Failed to merge states: {0}")]
    StateMerge(String),

    /// The analyzer produced no state, e.g. every input value was NULL.
    #[error("Empty state for analyzer {0}, all input values were NULL.")]
    EmptyState(String),

    /// DataFusion query execution error.
    #[error("Query execution failed: {0}")]
    QueryExecution(#[from] datafusion::error::DataFusionError),

    /// Arrow computation error.
    #[error("Arrow computation failed: {0}")]
    ArrowComputation(#[from] arrow::error::ArrowError),

    /// Data type mismatch or invalid data.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// A state loader or persister failed.
    #[error("State store error: {0}")]
    StateStore(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic analyzer error with custom message.
    #[error("{0}")]
    Custom(String),
}

impl AnalyzerError {
    /// Creates a precondition error; displayed as `requirement failed: {msg}`.
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    /// Creates a state computation error with the given message.
    pub fn state_computation(msg: impl Into<String>) -> Self {
        Self::StateComputation(msg.into())
    }

    /// Creates a metric computation error with the given message.
    pub fn metric_computation(msg: impl Into<String>) -> Self {
        Self::MetricComputation(msg.into())
    }

    /// Creates a state merge error with the given message.
    pub fn state_merge(msg: impl Into<String>) -> Self {
        Self::StateMerge(msg.into())
    }

    /// Creates an empty state error for the named analyzer.
    pub fn empty_state(analyzer: impl Into<String>) -> Self {
        Self::EmptyState(analyzer.into())
    }

    /// Creates an invalid data error with the given message.
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }

    /// Creates a state store error with the given message.
    pub fn state_store(msg: impl Into<String>) -> Self {
        Self::StateStore(msg.into())
    }

    /// Creates a custom error with the given message.
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }
}

/// Converts serde_json errors to AnalyzerError.
impl From<serde_json::Error> for AnalyzerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// The failure carried by a failure-valued metric.
///
/// Metrics are cloned freely (into contexts, into constraint results), so the
/// underlying [`AnalyzerError`] is shared rather than copied. Its message is
/// exposed unmodified.
#[derive(Error, Debug, Clone)]
#[error(transparent)]
pub struct MetricError(Arc<AnalyzerError>);

impl MetricError {
    /// Wraps an analyzer error.
    pub fn new(error: AnalyzerError) -> Self {
        Self(Arc::new(error))
    }

    /// Returns the wrapped analyzer error.
    pub fn analyzer_error(&self) -> &AnalyzerError {
        &self.0
    }

    /// Returns the error message exactly as the analyzer reported it.
    pub fn message(&self) -> String {
        self.0.to_string()
    }
}

impl From<AnalyzerError> for MetricError {
    fn from(error: AnalyzerError) -> Self {
        Self::new(error)
    }
}

impl Serialize for MetricError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.message())
    }
}
