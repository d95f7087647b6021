//! Prelude for commonly used types and traits.

pub use crate::analyzers::basic::{
    CompletenessAnalyzer, MaximumAnalyzer, MeanAnalyzer, MinimumAnalyzer, SizeAnalyzer,
};
pub use crate::analyzers::{
    AnalysisRunner, Analyzer, AnalyzerContext, AnalyzerError, Dataset, Entity, Metric,
    MetricValue,
};
pub use crate::constraints::{AnalysisBasedConstraint, Assertion, ConstraintFailure};
pub use crate::core::{Check, CheckStatus, Constraint, ConstraintResult, ConstraintStatus, Level};
pub use crate::error::{Result, TermError};
pub use crate::logging::LogConfig;
