//! Ready-made constraints over the basic analyzers.
//!
//! Each factory binds one analyzer to an assertion and an optional hint and
//! names the result after the analyzer, e.g. `CompletenessConstraint(completeness(email))`.
//!
//! ```rust
//! use term_constraints::constraints::{completeness_constraint, Assertion};
//! use term_constraints::core::Constraint;
//!
//! let constraint = completeness_constraint("email", Assertion::GreaterThan(0.9).into_fn(), None);
//! assert_eq!(constraint.name(), "CompletenessConstraint(completeness(email))");
//! ```

use crate::analyzers::basic::{
    CompletenessAnalyzer, MaximumAnalyzer, MeanAnalyzer, MinimumAnalyzer, SizeAnalyzer,
};
use crate::analyzers::Analyzer;

use super::{AnalysisBasedConstraint, NamedConstraint};

fn named<A, F>(label: &str, analyzer: A, assertion: F, hint: Option<&str>) -> NamedConstraint
where
    A: Analyzer + 'static,
    F: Fn(A::Value) -> bool + Send + Sync + 'static,
{
    let name = format!("{label}({})", analyzer.key());
    let mut constraint = AnalysisBasedConstraint::new(analyzer, assertion);
    if let Some(hint) = hint {
        constraint = constraint.with_hint(hint);
    }
    NamedConstraint::new(constraint, name)
}

/// Asserts on the number of rows.
pub fn size_constraint<F>(assertion: F, hint: Option<&str>) -> NamedConstraint
where
    F: Fn(i64) -> bool + Send + Sync + 'static,
{
    named("SizeConstraint", SizeAnalyzer::new(), assertion, hint)
}

/// Asserts on the fraction of non-null values in `column`.
pub fn completeness_constraint<F>(
    column: impl Into<String>,
    assertion: F,
    hint: Option<&str>,
) -> NamedConstraint
where
    F: Fn(f64) -> bool + Send + Sync + 'static,
{
    named(
        "CompletenessConstraint",
        CompletenessAnalyzer::new(column),
        assertion,
        hint,
    )
}

/// Asserts on the mean of the numeric `column`.
pub fn mean_constraint<F>(
    column: impl Into<String>,
    assertion: F,
    hint: Option<&str>,
) -> NamedConstraint
where
    F: Fn(f64) -> bool + Send + Sync + 'static,
{
    named("MeanConstraint", MeanAnalyzer::new(column), assertion, hint)
}

/// Asserts on the smallest value of the numeric `column`.
pub fn min_constraint<F>(
    column: impl Into<String>,
    assertion: F,
    hint: Option<&str>,
) -> NamedConstraint
where
    F: Fn(f64) -> bool + Send + Sync + 'static,
{
    named("MinimumConstraint", MinimumAnalyzer::new(column), assertion, hint)
}

/// Asserts on the largest value of the numeric `column`.
pub fn max_constraint<F>(
    column: impl Into<String>,
    assertion: F,
    hint: Option<&str>,
) -> NamedConstraint
where
    F: Fn(f64) -> bool + Send + Sync + 'static,
{
    named("MaximumConstraint", MaximumAnalyzer::new(column), assertion, hint)
}
