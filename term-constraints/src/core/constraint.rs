//! Constraint trait and related types for validation rules.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Debug;

use crate::analyzers::{AnalyzerContext, Dataset, Metric, MetricValue};

/// The status of a constraint evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstraintStatus {
    /// The constraint check passed
    Success,
    /// The constraint check failed
    Failure,
}

impl ConstraintStatus {
    /// Returns true if this is a Success status.
    pub fn is_success(&self) -> bool {
        matches!(self, ConstraintStatus::Success)
    }

    /// Returns true if this is a Failure status.
    pub fn is_failure(&self) -> bool {
        matches!(self, ConstraintStatus::Failure)
    }
}

/// The result of evaluating a constraint.
///
/// A successful result never carries a message; a failed one always does.
#[derive(Debug, Clone, Serialize)]
pub struct ConstraintResult {
    /// The status of the constraint evaluation
    pub status: ConstraintStatus,
    /// Why the constraint failed
    pub message: Option<String>,
    /// The metric the judgment was based on, if one was obtained
    pub metric: Option<Metric<MetricValue>>,
}

impl ConstraintResult {
    /// Creates a successful constraint result.
    pub fn success(metric: Option<Metric<MetricValue>>) -> Self {
        Self {
            status: ConstraintStatus::Success,
            message: None,
            metric,
        }
    }

    /// Creates a failed constraint result.
    pub fn failure(message: impl Into<String>, metric: Option<Metric<MetricValue>>) -> Self {
        Self {
            status: ConstraintStatus::Failure,
            message: Some(message.into()),
            metric,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Metadata associated with a constraint.
///
/// This struct provides extensible metadata that can be attached to constraints
/// for better observability and reporting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConstraintMetadata {
    /// The column(s) this constraint operates on
    pub columns: Vec<String>,
    /// A human-readable description of what this constraint validates
    pub description: Option<String>,
    /// Additional key-value pairs for custom metadata
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub custom: HashMap<String, String>,
}

impl ConstraintMetadata {
    /// Creates a new metadata instance with no columns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates metadata for the given columns.
    pub fn for_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a custom metadata entry.
    pub fn with_custom(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom.insert(key.into(), value.into());
        self
    }
}

/// A validation constraint that can be judged against data or against the
/// metrics of a previous analysis run.
///
/// Neither entry point returns an error: every failure mode is reported as a
/// [`ConstraintStatus::Failure`] with a message.
///
/// # Examples
///
/// ```rust,ignore
/// use term_constraints::analyzers::{AnalyzerContext, Dataset};
/// use term_constraints::core::{Constraint, ConstraintResult};
/// use async_trait::async_trait;
///
/// #[derive(Debug)]
/// struct AlwaysPasses;
///
/// #[async_trait]
/// impl Constraint for AlwaysPasses {
///     async fn calculate(&self, _data: &Dataset) -> ConstraintResult {
///         ConstraintResult::success(None)
///     }
///
///     fn evaluate(&self, _context: &AnalyzerContext) -> ConstraintResult {
///         ConstraintResult::success(None)
///     }
///
///     fn name(&self) -> &str {
///         "always_passes"
///     }
/// }
/// ```
#[async_trait]
pub trait Constraint: Debug + Send + Sync {
    /// Computes the constraint's metric from `data` and judges it.
    async fn calculate(&self, data: &Dataset) -> ConstraintResult;

    /// Judges the constraint against metrics computed earlier.
    fn evaluate(&self, context: &AnalyzerContext) -> ConstraintResult;

    /// Returns the name of the constraint.
    fn name(&self) -> &str;

    /// Returns the metadata associated with this constraint.
    fn metadata(&self) -> ConstraintMetadata {
        ConstraintMetadata::new()
    }
}

/// A boxed constraint for use in collections.
pub type BoxedConstraint = Box<dyn Constraint>;
