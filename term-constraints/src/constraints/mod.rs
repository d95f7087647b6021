//! Constraints judged on analyzer metrics.
//!
//! A constraint pairs an analyzer with an assertion on the metric it
//! produces. It can be judged in two ways that always agree:
//!
//! - **`calculate(data)`** computes the metric from a [`Dataset`](crate::analyzers::Dataset);
//! - **`evaluate(context)`** looks the metric up in an
//!   [`AnalyzerContext`](crate::analyzers::AnalyzerContext) filled by an
//!   earlier analysis run.
//!
//! Every judgment ends in success or in exactly one of the failures of
//! [`ConstraintFailure`], whose messages are fixed:
//!
//! | Failure | Message |
//! |---------|---------|
//! | metric failed | the analyzer's error message, verbatim |
//! | no metric in the context | `Missing Analysis, can't run the constraint!` |
//! | value picker failed | `Can't retrieve the value to assert on: {error}!` |
//! | assertion rejected value `v` | `Value: {v} does not meet the constraint requirement!` followed by the hint, if any |
//!
//! ## Example
//!
//! ```rust,no_run
//! use term_constraints::analyzers::{basic::MeanAnalyzer, AnalysisRunner, Dataset};
//! use term_constraints::constraints::{AnalysisBasedConstraint, Assertion};
//! use datafusion::prelude::*;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let ctx = SessionContext::new();
//! ctx.register_csv("data", "orders.csv", CsvReadOptions::new()).await?;
//! let data = Dataset::with_default_table(ctx);
//!
//! let constraint = AnalysisBasedConstraint::new(
//!     MeanAnalyzer::new("amount"),
//!     Assertion::Between(10.0, 500.0).into_fn(),
//! )
//! .with_hint("Average order value drifted.");
//!
//! // Straight from the data
//! let direct = constraint.calculate(&data).await;
//!
//! // From a previous run
//! let context = AnalysisRunner::new().add(MeanAnalyzer::new("amount")).run(&data).await;
//! let stored = constraint.evaluate(&context);
//!
//! assert_eq!(direct.status, stored.status);
//! assert_eq!(direct.message, stored.message);
//! # Ok(())
//! # }
//! ```

mod analysis_based;
mod assertion;
mod factories;
pub mod messages;
mod named;

pub use analysis_based::{AnalysisBasedConstraint, AssertionFn, PickerError, ValuePicker};
pub use assertion::Assertion;
pub use factories::{
    completeness_constraint, max_constraint, mean_constraint, min_constraint, size_constraint,
};
pub use messages::ConstraintFailure;
pub use named::NamedConstraint;
